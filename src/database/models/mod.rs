pub mod account;
pub mod event;
pub mod ticket;

pub use account::{Account, CreateAccountRequest, LoginRequest, NewAccount};
pub use event::{CreateEventRequest, Event};
pub use ticket::Ticket;
