mod common;

use anyhow::Result;
use nitelife_api::error::INVALID_QUERY_MESSAGE;
use nitelife_api::filter::SqlParam;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn list_without_query_applies_no_conditions() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/accounts")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let sql = server.store.last_list();
    assert_eq!(sql.query, "SELECT * FROM account");
    assert!(sql.params.is_empty());
    Ok(())
}

#[tokio::test]
async fn equality_filter_binds_value() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/accounts?username=alice")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let sql = server.store.last_list();
    assert_eq!(sql.query, r#"SELECT * FROM account WHERE "account"."username" = $1"#);
    assert_eq!(sql.params, vec![SqlParam::Text("alice".into())]);
    Ok(())
}

#[tokio::test]
async fn unknown_field_is_rejected_before_storage() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/accounts?password_hash=x")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], INVALID_QUERY_MESSAGE);
    assert!(!body.to_string().contains("password_hash"));
    assert_eq!(server.store.list_count(), 0);
    Ok(())
}

#[tokio::test]
async fn injection_attempt_is_only_a_bound_value() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .get(server.url("/accounts?username=alice%27%20OR%201%3D1--"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let sql = server.store.last_list();
    assert_eq!(sql.query, r#"SELECT * FROM account WHERE "account"."username" = $1"#);
    assert_eq!(sql.params, vec![SqlParam::Text("alice' OR 1=1--".into())]);
    Ok(())
}

#[tokio::test]
async fn events_sort_and_operators() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .get(server.url("/events?capacity__gte=100&sort=start_at:desc,name"))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let sql = server.store.last_list();
    assert_eq!(
        sql.query,
        r#"SELECT * FROM event WHERE "event"."capacity" >= $1 ORDER BY "event"."start_at" DESC, "event"."name" ASC"#
    );
    assert_eq!(sql.params, vec![SqlParam::Integer(100)]);
    Ok(())
}

#[tokio::test]
async fn bad_sort_direction_and_bad_value_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;

    for path in ["/events?sort=name:sideways", "/events?capacity=lots", "/events?capacity__like=1%25"] {
        let res = server.client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
    }
    assert_eq!(server.store.list_count(), 0);
    Ok(())
}
