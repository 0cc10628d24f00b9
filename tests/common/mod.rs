#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};

use nitelife_api::app::{router, AppState};
use nitelife_api::auth::password::hash_password;
use nitelife_api::config::AppConfig;
use nitelife_api::database::models::{Account, CreateEventRequest, Event, NewAccount, Ticket};
use nitelife_api::database::{DatabaseError, Storage};
use nitelife_api::filter::{ListQuery, SqlParam, SqlResult};

pub const SECRET: &[u8] = b"integration-test-secret";

/// In-memory `Storage` that records every query it is asked to run.
#[derive(Default)]
pub struct StubStore {
    accounts: Mutex<Vec<Account>>,
    events: Mutex<Vec<Event>>,
    pub list_calls: Mutex<Vec<SqlResult>>,
    pub delete_calls: Mutex<Vec<i64>>,
}

impl StubStore {
    pub fn add_account(&self, username: &str, password: &str) -> Account {
        let mut accounts = self.accounts.lock().unwrap();
        let account = Account {
            id: accounts.len() as i64 + 1,
            username: username.to_string(),
            password_hash: hash_password(password).unwrap(),
            display_name: username.to_string(),
            full_name: format!("{} Test", username),
            gender: 0,
            is_host: false,
            created_at: Utc::now(),
        };
        accounts.push(account.clone());
        account
    }

    pub fn list_count(&self) -> usize {
        self.list_calls.lock().unwrap().len()
    }

    pub fn last_list(&self) -> SqlResult {
        self.list_calls.lock().unwrap().last().cloned().unwrap()
    }

    fn record(&self, query: &ListQuery, base: &str, base_where: Option<&str>, base_params: Vec<SqlParam>) {
        let sql = query.to_sql(base, base_where, base_params);
        self.list_calls.lock().unwrap().push(sql);
    }
}

#[async_trait]
impl Storage for StubStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, DatabaseError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(DatabaseError::Conflict(account.username));
        }
        let created = Account {
            id: accounts.len() as i64 + 1,
            username: account.username,
            password_hash: account.password_hash,
            display_name: account.display_name,
            full_name: account.full_name,
            gender: account.gender,
            is_host: account.is_host,
            created_at: account.created_at,
        };
        accounts.push(created.clone());
        Ok(created)
    }

    async fn list_accounts(&self, query: &ListQuery) -> Result<Vec<Account>, DatabaseError> {
        self.record(query, "SELECT * FROM account", None, vec![]);
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, DatabaseError> {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("account {} not found", id)))
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>, DatabaseError> {
        Ok(self.accounts.lock().unwrap().iter().find(|a| a.username == username).cloned())
    }

    async fn delete_account_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        self.delete_calls.lock().unwrap().push(id);
        let mut accounts = self.accounts.lock().unwrap();
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        if accounts.len() == before {
            return Err(DatabaseError::NotFound(format!("account {} not found", id)));
        }
        Ok(())
    }

    async fn create_event(&self, event: CreateEventRequest) -> Result<Event, DatabaseError> {
        let mut events = self.events.lock().unwrap();
        let created = Event {
            id: events.len() as i64 + 1,
            host_id: event.host_id,
            name: event.name,
            description: event.description,
            capacity: event.capacity,
            start_at: event.start_at,
            end_at: event.end_at,
            location_name: event.location_name,
            location_address: event.location_address,
            location_city: event.location_city,
            location_state: event.location_state,
            location_country: event.location_country,
            location_zip: event.location_zip,
            created_at: Utc::now(),
        };
        events.push(created.clone());
        Ok(created)
    }

    async fn list_events(&self, query: &ListQuery) -> Result<Vec<Event>, DatabaseError> {
        self.record(query, "SELECT * FROM event", None, vec![]);
        Ok(self.events.lock().unwrap().clone())
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Event, DatabaseError> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("event {} not found", id)))
    }

    async fn list_tickets_by_account_id(&self, id: i64, query: &ListQuery) -> Result<Vec<Ticket>, DatabaseError> {
        self.record(
            query,
            "SELECT * FROM ticket",
            Some(r#""ticket"."owner_id" = $1"#),
            vec![SqlParam::Integer(id)],
        );
        Ok(vec![])
    }
}

pub struct TestServer {
    pub base_url: String,
    pub state: AppState,
    pub store: Arc<StubStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A valid token for `account_id`, signed with the server's secret.
    pub fn token_for(&self, account_id: i64) -> String {
        self.state.tokens().issue(account_id, Duration::hours(1)).unwrap().token
    }
}

/// Serve the real router over a fresh in-memory store on an unused port.
pub async fn spawn_server() -> Result<TestServer> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let store = Arc::new(StubStore::default());
    let state = AppState::new(AppConfig::with_secret(SECRET), store.clone())?;

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;
    let app = router(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(TestServer {
        base_url,
        state,
        store,
        client: reqwest::Client::new(),
    })
}
