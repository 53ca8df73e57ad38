pub mod filter_summary;
pub mod filters_sidebar;
pub mod pagination_controls;
pub mod search_bar;
pub mod totals_summary;
pub mod transaction_table;

pub use filter_summary::FilterSummary;
pub use filters_sidebar::FiltersSidebar;
pub use pagination_controls::PaginationControls;
pub use search_bar::SearchBar;
pub use totals_summary::TotalsSummary;
pub use transaction_table::TransactionTable;
