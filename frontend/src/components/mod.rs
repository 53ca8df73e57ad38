pub mod change_password_modal;
pub mod download_modal;
pub mod forms;
pub mod messages;
pub mod navigation;
pub mod profile_modal;
pub mod receipt_uploader;
pub mod transaction_detail_modal;
pub mod transactions;

pub use download_modal::DownloadModal;
pub use messages::{ErrorMessage, LoadingSpinner};
pub use navigation::Navigation;
pub use transaction_detail_modal::TransactionDetailModal;
