use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spending/income category tag as understood by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Income,
    Food,
    Transport,
    Utilities,
    Entertainment,
    Health,
    Education,
    Clothing,
    Housing,
    Savings,
    Investment,
    Miscellaneous,
    Tax,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 13] = [
        Category::Income,
        Category::Food,
        Category::Transport,
        Category::Utilities,
        Category::Entertainment,
        Category::Health,
        Category::Education,
        Category::Clothing,
        Category::Housing,
        Category::Savings,
        Category::Investment,
        Category::Miscellaneous,
        Category::Tax,
    ];

    /// Wire tag, e.g. `"food"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Utilities => "utilities",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
            Category::Education => "education",
            Category::Clothing => "clothing",
            Category::Housing => "housing",
            Category::Savings => "savings",
            Category::Investment => "investment",
            Category::Miscellaneous => "miscellaneous",
            Category::Tax => "tax",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Clothing => "Clothing",
            Category::Housing => "Housing",
            Category::Savings => "Savings",
            Category::Investment => "Investment",
            Category::Miscellaneous => "Miscellaneous",
            Category::Tax => "Tax",
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self, Category::Income)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == tag)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A transaction record as returned by the server.
///
/// Records parsed from a receipt have not been saved yet and carry no id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    /// Amount in BDT; the server sends decimals as strings
    pub amount: Decimal,
    #[serde(default)]
    pub is_recurring: bool,
}

/// Creation payload; the server assigns the identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
    pub is_recurring: bool,
}

/// Partial update payload, unset fields are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self == &TransactionUpdate::default()
    }
}

/// Aggregates over the full filtered set, computed server-side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub total_income: Decimal,
    #[serde(default)]
    pub total_expenses: Decimal,
    #[serde(default)]
    pub net_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_transactions: Option<u64>,
}

/// Pagination envelope of the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedTransactions {
    pub results: Vec<Transaction>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub totals: Option<Totals>,
}

/// Body of `GET /api/transactions/`.
///
/// The server paginates by default but a flat sequence is accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paginated(PaginatedTransactions),
    Flat(Vec<Transaction>),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    /// Name shown in the navigation bar
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Access/refresh credential pair issued by `/auth/jwt/create/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Response of `/auth/jwt/refresh/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshedAccess {
    pub access: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for ProfileUpdate {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub re_new_password: String,
}

/// Result of uploading a receipt image for transaction extraction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub transactions: Vec<ReceiptLine>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One unsaved transaction extracted from a receipt.
///
/// Receipt extraction is loose: fields may be missing and the category is
/// free text (`"groceries"`, `"fuel"`) rather than a wire tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub is_recurring: bool,
}

/// Receipt image selected by the user
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialScore {
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub status: String,
}

/// AI analysis of one month of spending
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialAnalysis {
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub financial_score: Option<FinancialScore>,
    #[serde(default)]
    pub quick_tips: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub good_habits: Vec<String>,
    /// Raw model output when it could not be parsed into the fields above
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FinancialAnalysis {
    /// True when the service produced nothing displayable
    pub fn is_failure(&self) -> bool {
        self.error.is_some() && self.overview.is_none() && self.analysis.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_wire_tag() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!(" Food ".parse::<Category>().unwrap(), Category::Food);
        assert!("groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_transaction_accepts_string_amount_and_embedded_user() {
        let json = r#"{
            "id": 7,
            "user": {"id": 1, "username": "rahim"},
            "date": "2025-03-14",
            "description": "Groceries",
            "amount": "1250.50",
            "category": "food",
            "is_recurring": false
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, Some(7));
        assert_eq!(tx.amount, Decimal::new(125050, 2));
        assert_eq!(tx.category, Category::Food);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
    }

    #[test]
    fn test_receipt_transaction_without_id() {
        let json = r#"{"id": null, "date": "2025-03-14", "description": "Tea",
            "amount": 40, "category": "food"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, None);
        assert!(!tx.is_recurring);
        assert_eq!(tx.amount, Decimal::from(40));
    }

    #[test]
    fn test_list_response_shapes() {
        let paginated = r#"{"count": 1, "total_pages": 1, "page_size": 20,
            "results": [{"id": 1, "date": "2025-01-02", "description": "Salary",
            "amount": "50000.00", "category": "income", "is_recurring": true}]}"#;
        match serde_json::from_str::<ListResponse>(paginated).unwrap() {
            ListResponse::Paginated(page) => {
                assert_eq!(page.results.len(), 1);
                assert_eq!(page.totals, None);
            }
            other => panic!("expected envelope, got {:?}", other),
        }

        let flat = r#"[{"id": 1, "date": "2025-01-02", "description": "Salary",
            "amount": "50000.00", "category": "income"}]"#;
        assert!(matches!(
            serde_json::from_str::<ListResponse>(flat).unwrap(),
            ListResponse::Flat(items) if items.len() == 1
        ));
    }

    #[test]
    fn test_transaction_update_skips_unset_fields() {
        let update = TransactionUpdate {
            description: Some("Rent".to_string()),
            ..TransactionUpdate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"description": "Rent"}));
        assert!(TransactionUpdate::default().is_empty());
    }

    #[test]
    fn test_analysis_failure_detection() {
        let failed: FinancialAnalysis =
            serde_json::from_str(r#"{"error": "Analysis failed: quota"}"#).unwrap();
        assert!(failed.is_failure());

        let raw: FinancialAnalysis = serde_json::from_str(
            r#"{"analysis": "Spend less", "error": "Could not parse as JSON"}"#,
        )
        .unwrap();
        assert!(!raw.is_failure());
    }

    #[test]
    fn test_receipt_lines_tolerate_missing_fields() {
        let json = r#"{"success": true, "message": "Parsed 2 transactions",
            "transactions": [
                {"date": "2025-03-14", "description": "Tea", "amount": 40, "category": "dining"},
                {"description": "Bus fare", "amount": "25.50"}
            ]}"#;
        let parsed: ParsedReceipt = serde_json::from_str(json).unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.transactions.len(), 2);
        assert_eq!(parsed.transactions[0].category.as_deref(), Some("dining"));
        assert_eq!(parsed.transactions[1].date, None);
        assert_eq!(parsed.transactions[1].amount, Some(Decimal::new(2550, 2)));
    }

    #[test]
    fn test_user_display_name_falls_back_to_username() {
        let mut user = User {
            id: Some(1),
            username: "rahim".to_string(),
            ..User::default()
        };
        assert_eq!(user.display_name(), "rahim");
        user.first_name = "Rahim".to_string();
        assert_eq!(user.display_name(), "Rahim");
    }
}
