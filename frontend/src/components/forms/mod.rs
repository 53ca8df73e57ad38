pub mod auth_forms;
pub mod multi_transaction_form;
pub mod transaction_rows;

pub use auth_forms::{LoginForm, SignupForm};
pub use multi_transaction_form::MultiTransactionForm;
