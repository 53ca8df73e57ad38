//! Filter, sort, search and pagination state of the transaction list, and its
//! translation into listing-endpoint query parameters.

use crate::models::Category;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Page size assumed until the server reports one
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Date,
    Amount,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Amount => "amount",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortField::Date => "Date",
            SortField::Amount => "Amount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Ordered query parameters for `GET /api/transactions/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams(Vec<(String, String)>);

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    /// Push only when the value is present and not blank
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.0.push((key.to_string(), value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// Client-owned query fields of the transaction list
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub page: u32,
    pub page_size: u32,
    /// Term that participates in requests
    pub search_term: String,
    /// Live keystroke buffer; only committed on Enter
    pub search_input: String,
    pub category: Option<Category>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub amount_min: Option<Decimal>,
    pub amount_max: Option<Decimal>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: String::new(),
            search_input: String::new(),
            category: None,
            sort_by: SortField::Date,
            sort_order: SortOrder::Desc,
            date_from: None,
            date_to: None,
            amount_min: None,
            amount_max: None,
        }
    }
}

impl QueryState {
    /// `date`, `-date`, `amount` or `-amount`
    pub fn ordering(&self) -> String {
        match self.sort_order {
            SortOrder::Asc => self.sort_by.as_str().to_string(),
            SortOrder::Desc => format!("-{}", self.sort_by.as_str()),
        }
    }

    /// Parameters for the listing endpoint. Unset filters are left out
    /// entirely rather than sent as empty strings.
    pub fn to_params(&self) -> ListParams {
        let mut params = ListParams::new();
        params.push("page", self.page);
        params.push("page_size", self.page_size);
        params.push_opt("search", Some(self.search_term.trim()));
        params.push_opt("category", self.category.map(|c| c.as_str()));
        params.push("ordering", self.ordering());
        params.push_opt("date_after", self.date_from.map(|d| d.format("%Y-%m-%d")));
        params.push_opt("date_before", self.date_to.map(|d| d.format("%Y-%m-%d")));
        params.push_opt("amount__gte", self.amount_min);
        params.push_opt("amount__lte", self.amount_max);
        params
    }

    /// Anything narrowing the result set beyond paging and the default sort
    pub fn has_active_filters(&self) -> bool {
        !self.search_term.trim().is_empty()
            || self.category.is_some()
            || self.date_from.is_some()
            || self.date_to.is_some()
            || self.amount_min.is_some()
            || self.amount_max.is_some()
    }

    /// Short descriptions of the active filters, for the filter summary
    pub fn filter_labels(&self) -> Vec<String> {
        let mut labels = Vec::new();
        if !self.search_term.trim().is_empty() {
            labels.push(format!("Search: \"{}\"", self.search_term.trim()));
        }
        if let Some(category) = self.category {
            labels.push(format!("Category: {}", category.label()));
        }
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => labels.push(format!("Date: {} to {}", from, to)),
            (Some(from), None) => labels.push(format!("Date: from {}", from)),
            (None, Some(to)) => labels.push(format!("Date: until {}", to)),
            (None, None) => {}
        }
        match (self.amount_min, self.amount_max) {
            (Some(min), Some(max)) => labels.push(format!("Amount: {} to {}", min, max)),
            (Some(min), None) => labels.push(format!("Amount: at least {}", min)),
            (None, Some(max)) => labels.push(format!("Amount: at most {}", max)),
            (None, None) => {}
        }
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_contain_only_paging_and_ordering() {
        let params = QueryState::default().to_params();
        assert_eq!(params.keys(), vec!["page", "page_size", "ordering"]);
        assert_eq!(params.get("page"), Some("1"));
        assert_eq!(params.get("page_size"), Some("20"));
        assert_eq!(params.get("ordering"), Some("-date"));
        assert!(params.pairs().iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_all_filters_are_rendered() {
        let state = QueryState {
            page: 2,
            page_size: 50,
            search_term: "rent".to_string(),
            search_input: "ignored".to_string(),
            category: Some(Category::Housing),
            sort_by: SortField::Amount,
            sort_order: SortOrder::Asc,
            date_from: NaiveDate::from_ymd_opt(2025, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2025, 1, 31),
            amount_min: Some(Decimal::new(1000, 2)),
            amount_max: Some(Decimal::from(5000)),
        };
        let params = state.to_params();
        assert_eq!(params.get("search"), Some("rent"));
        assert_eq!(params.get("category"), Some("housing"));
        assert_eq!(params.get("ordering"), Some("amount"));
        assert_eq!(params.get("date_after"), Some("2025-01-01"));
        assert_eq!(params.get("date_before"), Some("2025-01-31"));
        assert_eq!(params.get("amount__gte"), Some("10.00"));
        assert_eq!(params.get("amount__lte"), Some("5000"));
    }

    #[test]
    fn test_blank_search_term_is_omitted() {
        let state = QueryState {
            search_term: "   ".to_string(),
            ..QueryState::default()
        };
        assert_eq!(state.to_params().get("search"), None);
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_descending_amount_ordering() {
        let state = QueryState {
            sort_by: SortField::Amount,
            ..QueryState::default()
        };
        assert_eq!(state.ordering(), "-amount");
    }

    #[test]
    fn test_filter_labels() {
        let state = QueryState {
            category: Some(Category::Food),
            amount_min: Some(Decimal::from(100)),
            ..QueryState::default()
        };
        assert_eq!(
            state.filter_labels(),
            vec!["Category: Food".to_string(), "Amount: at least 100".to_string()]
        );
    }
}
