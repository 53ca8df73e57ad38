//! Transaction list engine.
//!
//! Owns the query fields, the visible result page and the loading/error
//! state. Mutators return a [`FetchTicket`] when the change requires a new
//! request; the caller performs it and hands the outcome back to
//! [`TransactionList::apply`]. Each ticket carries a sequence number and only
//! the most recently issued one may update visible state, so a slow response
//! to a superseded query can never overwrite newer results.

use crate::api::{FinanceApi, Transport};
use crate::error::ApiError;
use crate::models::{Category, ListResponse, Totals, Transaction};
use crate::query::{ListParams, QueryState, SortField, SortOrder, DEFAULT_PAGE_SIZE};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::cell::RefCell;

/// One page of results plus server-computed aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub transactions: Vec<Transaction>,
    pub total_count: u64,
    pub total_pages: u32,
    pub page_size: u32,
    /// Over the full filtered set, not just this page
    pub totals: Totals,
}

impl ResultPage {
    pub fn empty() -> Self {
        Self {
            transactions: Vec::new(),
            total_count: 0,
            total_pages: 1,
            page_size: DEFAULT_PAGE_SIZE,
            totals: Totals::default(),
        }
    }

    /// Normalize either response shape, defaulting absent fields
    pub fn from_response(response: ListResponse) -> Self {
        match response {
            ListResponse::Paginated(page) => {
                let total_count = page.count.unwrap_or(page.results.len() as u64);
                Self {
                    transactions: page.results,
                    total_count,
                    total_pages: page.total_pages.filter(|p| *p > 0).unwrap_or(1),
                    page_size: page.page_size.filter(|s| *s > 0).unwrap_or(DEFAULT_PAGE_SIZE),
                    totals: page.totals.unwrap_or_default(),
                }
            }
            ListResponse::Flat(transactions) => Self {
                total_count: transactions.len() as u64,
                transactions,
                ..Self::empty()
            },
        }
    }
}

impl Default for ResultPage {
    fn default() -> Self {
        Self::empty()
    }
}

/// A request that must be issued; only the latest ticket may be applied
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub params: ListParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionList {
    query: QueryState,
    result: ResultPage,
    loading: bool,
    error: Option<String>,
    authenticated: bool,
    latest_sequence: u64,
}

impl Default for TransactionList {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TransactionList {
    pub fn new(authenticated: bool) -> Self {
        Self {
            query: QueryState::default(),
            result: ResultPage::empty(),
            loading: false,
            error: None,
            authenticated,
            latest_sequence: 0,
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn result(&self) -> &ResultPage {
        &self.result
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Update the live search buffer. Never fetches.
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.query.search_input = text.into();
    }

    /// Commit the search buffer (Enter). Always lands on page 1; no-op only
    /// when the term is unchanged and page 1 is already showing.
    pub fn commit_search(&mut self) -> Option<FetchTicket> {
        if self.query.search_input == self.query.search_term && self.query.page == 1 {
            return None;
        }
        self.query.search_term = self.query.search_input.clone();
        self.filter_changed()
    }

    pub fn set_category_filter(&mut self, category: Option<Category>) -> Option<FetchTicket> {
        self.query.category = category;
        self.filter_changed()
    }

    pub fn set_date_range(
        &mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Option<FetchTicket> {
        self.query.date_from = from;
        self.query.date_to = to;
        self.filter_changed()
    }

    /// Negative bounds are rejected and leave the query untouched
    pub fn set_amount_range(
        &mut self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> Result<Option<FetchTicket>, ApiError> {
        if min.iter().chain(max.iter()).any(|bound| bound.is_sign_negative()) {
            return Err(ApiError::Validation(
                "Amount bounds cannot be negative".to_string(),
            ));
        }
        self.query.amount_min = min;
        self.query.amount_max = max;
        Ok(self.filter_changed())
    }

    /// Clicking the active column reverses it; a new column starts descending
    pub fn set_sort(&mut self, field: SortField) -> Option<FetchTicket> {
        if self.query.sort_by == field {
            self.query.sort_order = self.query.sort_order.toggled();
        } else {
            self.query.sort_by = field;
            self.query.sort_order = SortOrder::Desc;
        }
        self.filter_changed()
    }

    /// Move to page `n`; ignored outside `1..=total_pages`
    pub fn set_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page < 1 || page > self.result.total_pages {
            return None;
        }
        self.query.page = page;
        self.begin_fetch()
    }

    /// Reset every field to its default. The server-reported page size stays.
    pub fn clear_filters(&mut self) -> Option<FetchTicket> {
        let page_size = self.query.page_size;
        self.query = QueryState {
            page_size,
            ..QueryState::default()
        };
        self.begin_fetch()
    }

    /// Reissue the current query, e.g. after a create/update/delete elsewhere
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        self.begin_fetch()
    }

    /// Follow the session. Logging in triggers the initial fetch; logging out
    /// discards the query, the results and any request in flight.
    pub fn set_authenticated(&mut self, authenticated: bool) -> Option<FetchTicket> {
        if authenticated == self.authenticated {
            return None;
        }
        self.authenticated = authenticated;
        if authenticated {
            self.begin_fetch()
        } else {
            self.query = QueryState::default();
            self.result = ResultPage::empty();
            self.error = None;
            self.loading = false;
            // outstanding tickets no longer match
            self.latest_sequence += 1;
            None
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Apply the outcome of `ticket`'s request. Returns false, changing
    /// nothing, when the ticket has been superseded.
    pub fn apply(&mut self, ticket: &FetchTicket, outcome: Result<ListResponse, ApiError>) -> bool {
        if ticket.sequence != self.latest_sequence || !self.authenticated {
            debug!(
                "Discarding stale listing response #{} (latest #{})",
                ticket.sequence, self.latest_sequence
            );
            return false;
        }

        self.loading = false;
        match outcome {
            Ok(response) => {
                let page = ResultPage::from_response(response);
                self.query.page_size = page.page_size;
                self.result = page;
                self.error = None;
            }
            Err(e) => {
                warn!("Failed to load transactions: {}", e);
                self.error = Some(format!("Failed to load transactions: {}", e.detail()));
                self.result = ResultPage::empty();
                // a page past the end would leave pagination with no way back
                self.query.page = self.query.page.min(self.result.total_pages);
            }
        }
        true
    }

    fn filter_changed(&mut self) -> Option<FetchTicket> {
        self.query.page = 1;
        self.begin_fetch()
    }

    fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if !self.authenticated {
            return None;
        }
        self.latest_sequence += 1;
        self.loading = true;
        self.error = None;
        Some(FetchTicket {
            sequence: self.latest_sequence,
            params: self.query.to_params(),
        })
    }
}

/// Perform `ticket`'s request and apply the outcome. The borrow is released
/// while the request is in flight so the list stays usable.
pub async fn fetch<T: Transport>(
    list: &RefCell<TransactionList>,
    api: &FinanceApi<T>,
    ticket: FetchTicket,
) -> bool {
    let outcome = api.list_transactions(&ticket.params).await;
    list.borrow_mut().apply(&ticket, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::FakeTransport;
    use crate::config::ClientConfig;
    use crate::models::{AuthTokens, PaginatedTransactions};
    use crate::session::{MemoryStorage, Session};

    fn transaction(id: i64, amount: i64) -> Transaction {
        Transaction {
            id: Some(id),
            date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            category: Category::Food,
            description: format!("Item {}", id),
            amount: Decimal::from(amount),
            is_recurring: false,
        }
    }

    fn page(count: usize, total_pages: u32) -> ListResponse {
        ListResponse::Paginated(PaginatedTransactions {
            results: (0..count as i64).map(|i| transaction(i + 1, 100)).collect(),
            count: Some(57),
            total_pages: Some(total_pages),
            current_page: Some(1),
            page_size: Some(20),
            totals: None,
        })
    }

    /// Authenticated list that has loaded a first page with `total_pages`
    fn loaded(total_pages: u32) -> TransactionList {
        let mut list = TransactionList::new(false);
        let ticket = list.set_authenticated(true).unwrap();
        assert!(list.apply(&ticket, Ok(page(20, total_pages))));
        list
    }

    #[test]
    fn test_initial_fetch_on_authentication() {
        let mut list = TransactionList::new(false);
        assert!(!list.is_loading());
        let ticket = list.set_authenticated(true).expect("initial fetch");
        assert!(list.is_loading());
        assert_eq!(ticket.params.keys(), vec!["page", "page_size", "ordering"]);
    }

    #[test]
    fn test_unauthenticated_never_fetches() {
        let mut list = TransactionList::new(false);
        assert!(list.set_category_filter(Some(Category::Food)).is_none());
        assert!(list.refetch().is_none());
        assert!(list.clear_filters().is_none());
        assert!(!list.is_loading());
        assert_eq!(list.result(), &ResultPage::empty());
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut list = loaded(3);
        let day = NaiveDate::from_ymd_opt(2025, 1, 1);
        let mutations: Vec<Box<dyn Fn(&mut TransactionList) -> Option<FetchTicket>>> = vec![
            Box::new(|l| l.set_category_filter(Some(Category::Health))),
            Box::new(move |l| l.set_date_range(day, None)),
            Box::new(|l| l.set_amount_range(Some(Decimal::from(5)), None).unwrap()),
            Box::new(|l| l.set_sort(SortField::Amount)),
            Box::new(|l| {
                l.set_search_input("bus");
                l.commit_search()
            }),
            // same term again, from a later page
            Box::new(|l| l.commit_search()),
        ];

        for mutate in mutations {
            let ticket = list.set_page(3).expect("page 3 is in range");
            assert!(list.apply(&ticket, Ok(page(20, 3))));
            assert_eq!(list.query().page, 3);

            let ticket = mutate(&mut list).expect("filter change fetches");
            assert_eq!(list.query().page, 1);
            assert_eq!(ticket.params.get("page"), Some("1"));
            assert!(list.apply(&ticket, Ok(page(20, 3))));
        }
    }

    #[test]
    fn test_page_bounds() {
        let mut list = loaded(3);
        let before = list.clone();
        assert!(list.set_page(5).is_none());
        assert!(list.set_page(0).is_none());
        assert_eq!(list, before);

        let ticket = list.set_page(2).unwrap();
        assert_eq!(list.query().page, 2);
        assert_eq!(ticket.params.get("page"), Some("2"));
    }

    #[test]
    fn test_sort_toggle() {
        let mut list = loaded(1);
        assert_eq!(
            (list.query().sort_by, list.query().sort_order),
            (SortField::Date, SortOrder::Desc)
        );
        list.set_sort(SortField::Date);
        assert_eq!(
            (list.query().sort_by, list.query().sort_order),
            (SortField::Date, SortOrder::Asc)
        );
        let ticket = list.set_sort(SortField::Amount).unwrap();
        assert_eq!(
            (list.query().sort_by, list.query().sort_order),
            (SortField::Amount, SortOrder::Desc)
        );
        assert_eq!(ticket.params.get("ordering"), Some("-amount"));
    }

    #[test]
    fn test_search_commit_isolation() {
        let mut list = loaded(3);
        list.set_search_input("gro");
        list.set_search_input("groceries");
        assert_eq!(list.query().search_term, "");
        assert!(!list.is_loading());

        let ticket = list.commit_search().expect("commit fetches");
        assert_eq!(list.query().search_term, "groceries");
        assert_eq!(list.query().page, 1);
        assert_eq!(ticket.params.get("search"), Some("groceries"));
        list.apply(&ticket, Ok(page(3, 1)));

        // unchanged buffer on page 1: nothing to do
        assert!(list.commit_search().is_none());
    }

    #[test]
    fn test_unchanged_search_commit_returns_to_first_page() {
        let mut list = loaded(3);
        list.set_search_input("rent");
        let ticket = list.commit_search().unwrap();
        assert!(list.apply(&ticket, Ok(page(20, 3))));
        let ticket = list.set_page(3).unwrap();
        assert!(list.apply(&ticket, Ok(page(20, 3))));

        let ticket = list.commit_search().expect("returning to page 1 fetches");
        assert_eq!(list.query().page, 1);
        assert_eq!(list.query().search_term, "rent");
        assert_eq!(ticket.params.get("page"), Some("1"));
        assert_eq!(ticket.params.get("search"), Some("rent"));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut list = loaded(3);
        let ticket_a = list.set_category_filter(Some(Category::Food)).unwrap();
        let ticket_b = list.set_category_filter(Some(Category::Transport)).unwrap();
        assert_eq!(ticket_b.params.get("category"), Some("transport"));

        let response_b = ListResponse::Flat(vec![transaction(99, 30)]);
        assert!(list.apply(&ticket_b, Ok(response_b)));
        assert!(!list.apply(&ticket_a, Ok(page(20, 3))));

        assert_eq!(list.result().transactions.len(), 1);
        assert_eq!(list.result().transactions[0].id, Some(99));
        assert!(!list.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_end_loading() {
        let mut list = loaded(3);
        let ticket_a = list.refetch().unwrap();
        let _ticket_b = list.set_sort(SortField::Amount).unwrap();
        assert!(!list.apply(&ticket_a, Err(ApiError::Network("offline".to_string()))));
        assert!(list.is_loading());
        assert_eq!(list.error(), None);
    }

    #[test]
    fn test_clear_filters_restores_defaults() {
        let mut list = loaded(3);
        list.set_search_input("rent");
        list.commit_search();
        list.set_category_filter(Some(Category::Housing));
        list.set_date_range(NaiveDate::from_ymd_opt(2025, 1, 1), NaiveDate::from_ymd_opt(2025, 2, 1));
        list.set_amount_range(Some(Decimal::from(1)), Some(Decimal::from(9))).unwrap();
        list.set_sort(SortField::Amount);
        list.set_search_input("pending");

        let ticket = list.clear_filters().unwrap();
        let expected = QueryState {
            page_size: list.query().page_size,
            ..QueryState::default()
        };
        assert_eq!(list.query(), &expected);
        assert_eq!(list.query().page, 1);
        assert_eq!(ticket.params.keys(), vec!["page", "page_size", "ordering"]);
    }

    #[test]
    fn test_failure_clears_list_and_reports_detail() {
        let mut list = loaded(3);
        let ticket = list.refetch().unwrap();
        list.apply(
            &ticket,
            Err(ApiError::Server {
                status: 500,
                message: "database unavailable".to_string(),
            }),
        );
        assert_eq!(
            list.error(),
            Some("Failed to load transactions: database unavailable")
        );
        assert!(list.result().transactions.is_empty());
        assert_eq!(list.result().total_pages, 1);
        assert!(!list.is_loading());

        list.dismiss_error();
        assert_eq!(list.error(), None);
    }

    #[test]
    fn test_failure_on_later_page_falls_back_to_first_page() {
        let mut list = loaded(3);
        let ticket = list.set_page(3).unwrap();
        assert!(list.apply(&ticket, Ok(page(20, 3))));

        let ticket = list.refetch().unwrap();
        assert!(list.apply(&ticket, Err(ApiError::NotFound("Invalid page.".to_string()))));
        assert_eq!(list.result().total_pages, 1);
        assert_eq!(list.query().page, 1);

        let ticket = list.refetch().expect("refetch still possible");
        assert_eq!(ticket.params.get("page"), Some("1"));
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let response = ListResponse::Paginated(PaginatedTransactions {
            results: vec![transaction(1, 10)],
            count: None,
            total_pages: None,
            current_page: None,
            page_size: None,
            totals: None,
        });
        let page = ResultPage::from_response(response);
        assert_eq!(page.total_count, 1);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_size, 20);
        assert_eq!(page.totals, Totals::default());
    }

    #[test]
    fn test_server_page_size_is_authoritative() {
        let mut list = TransactionList::new(false);
        let ticket = list.set_authenticated(true).unwrap();
        let response = ListResponse::Paginated(PaginatedTransactions {
            results: vec![],
            count: Some(0),
            total_pages: Some(1),
            current_page: Some(1),
            page_size: Some(50),
            totals: None,
        });
        list.apply(&ticket, Ok(response));
        let ticket = list.refetch().unwrap();
        assert_eq!(ticket.params.get("page_size"), Some("50"));
    }

    #[test]
    fn test_logout_discards_state_and_in_flight_requests() {
        let mut list = loaded(3);
        let ticket = list.set_category_filter(Some(Category::Tax)).unwrap();
        assert!(list.set_authenticated(false).is_none());
        assert!(!list.is_loading());
        assert_eq!(list.query(), &QueryState::default());
        assert!(!list.apply(&ticket, Ok(page(20, 3))));
        assert_eq!(list.result(), &ResultPage::empty());
    }

    #[test]
    fn test_negative_amount_bounds_rejected() {
        let mut list = loaded(3);
        let before = list.query().clone();
        let result = list.set_amount_range(Some(Decimal::from(-5)), None);
        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert_eq!(list.query(), &before);
    }

    #[tokio::test]
    async fn test_end_to_end_first_page() {
        let session = Session::init(MemoryStorage::with_tokens(AuthTokens {
            access: "a".to_string(),
            refresh: "r".to_string(),
        }));
        let transport = FakeTransport::new();
        let results: Vec<String> = (1..=20)
            .map(|i| {
                format!(
                    r#"{{"id": {}, "date": "2025-05-{:02}", "description": "Item {}",
                        "amount": "{}.00", "category": "food", "is_recurring": false}}"#,
                    i,
                    (i % 28) + 1,
                    i,
                    i * 10
                )
            })
            .collect();
        let body = format!(
            r#"{{"count": 57, "total_pages": 3, "current_page": 1, "page_size": 20,
                "results": [{}],
                "totals": {{"total_income": 80000.0, "total_expenses": 12345.5,
                            "net_amount": 67654.5, "total_transactions": 57}}}}"#,
            results.join(",")
        );
        transport.reply(200, &body);
        let api = FinanceApi::new(transport.clone(), session, ClientConfig::default());

        let list = RefCell::new(TransactionList::new(false));
        let ticket = list.borrow_mut().set_authenticated(true).unwrap();
        assert!(fetch(&list, &api, ticket).await);

        let list = list.into_inner();
        assert_eq!(list.result().transactions.len(), 20);
        assert_eq!(list.result().total_pages, 3);
        assert_eq!(list.result().total_count, 57);
        assert_eq!(list.result().totals.total_income, Decimal::from(80000));
        assert_eq!(list.result().totals.total_expenses, Decimal::new(123455, 1));
        assert_eq!(list.result().totals.net_amount, Decimal::new(676545, 1));
        assert_eq!(list.result().totals.total_transactions, Some(57));
        assert!(!list.is_loading());

        let (request, _) = transport.sent.borrow()[0].clone();
        assert_eq!(request.path, "/api/transactions/");
        assert_eq!(
            request.query,
            vec![
                ("page".to_string(), "1".to_string()),
                ("page_size".to_string(), "20".to_string()),
                ("ordering".to_string(), "-date".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_end_to_end_out_of_order_completion() {
        let session = Session::init(MemoryStorage::with_tokens(AuthTokens {
            access: "a".to_string(),
            refresh: "r".to_string(),
        }));
        let transport = FakeTransport::new();
        let api = FinanceApi::new(transport.clone(), session, ClientConfig::default());
        let list = RefCell::new(loaded(3));

        let ticket_a = list.borrow_mut().set_category_filter(Some(Category::Food)).unwrap();
        let ticket_b = list.borrow_mut().set_category_filter(Some(Category::Tax)).unwrap();

        // B resolves first, A afterwards
        transport.reply(
            200,
            r#"{"count": 1, "total_pages": 1, "page_size": 20, "results": [
                {"id": 5, "date": "2025-04-15", "description": "Income tax",
                 "amount": "3000.00", "category": "tax"}]}"#,
        );
        transport.reply(200, r#"{"count": 0, "total_pages": 1, "page_size": 20, "results": []}"#);
        assert!(fetch(&list, &api, ticket_b).await);
        assert!(!fetch(&list, &api, ticket_a).await);

        let list = list.into_inner();
        assert_eq!(list.result().transactions.len(), 1);
        assert_eq!(list.result().transactions[0].category, Category::Tax);
    }
}
