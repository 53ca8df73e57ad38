pub mod add_transactions;
pub mod analysis;
pub mod home;
pub mod login;
pub mod signup;
pub mod transactions;

pub use add_transactions::AddTransactionsPage;
pub use analysis::AnalysisPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use signup::SignupPage;
pub use transactions::TransactionsPage;
