//! Platform-independent core of the AutoFinance client: wire models, the
//! transaction list engine, the authorized remote client and session store,
//! form validation and display helpers.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod format;
pub mod listing;
pub mod models;
pub mod query;
pub mod routes;
pub mod session;
pub mod validation;

pub use api::{ApiRequest, AuthorizedClient, FinanceApi, RawResponse, RequestBody, Transport};
pub use auth::AuthService;
pub use config::ClientConfig;
pub use error::ApiError;
pub use listing::{FetchTicket, ResultPage, TransactionList};
pub use models::*;
pub use query::{ListParams, QueryState, SortField, SortOrder};
pub use routes::Route;
pub use session::{CredentialStorage, MemoryStorage, Session, SessionEvent};
pub use validation::ValidationError;
