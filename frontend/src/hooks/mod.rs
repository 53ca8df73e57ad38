pub mod use_router;
pub mod use_session;
pub mod use_transactions;
pub mod use_transient;

pub use use_router::use_router;
pub use use_session::use_session;
pub use use_transactions::use_transactions;
pub use use_transient::use_transient;
