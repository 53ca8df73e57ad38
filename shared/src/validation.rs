//! Client-side checks run before anything is sent to the server.

use crate::models::{
    Category, NewTransaction, PasswordChange, ProfileUpdate, ReceiptLine, Registration,
    Transaction, TransactionUpdate,
};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Image types accepted by receipt extraction
pub const RECEIPT_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

pub const DEFAULT_REPORT_FILENAME: &str = "transactions_report";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("Please upload a valid image file (JPEG, PNG, or GIF)")]
    UnsupportedImage,
    #[error("Image file size must be less than {0}MB")]
    ImageTooLarge(usize),
    #[error("Month must be between 1 and 12")]
    InvalidMonth,
    #[error("Valid amount is required")]
    InvalidAmount,
    #[error("Date must be in YYYY-MM-DD format")]
    InvalidDate,
    #[error("Please fix all validation errors before saving.")]
    InvalidRows,
}

/// A transaction row as typed into the entry form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionDraft {
    pub date: String,
    /// Wire tag, empty until chosen
    pub category: String,
    pub description: String,
    pub amount: String,
    pub is_recurring: bool,
}

/// Per-field messages for one draft row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftErrors {
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
}

impl DraftErrors {
    pub fn is_empty(&self) -> bool {
        self.date.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.amount.is_none()
    }

    /// Drop the message for `field` once the user edits it
    pub fn clear_field(&mut self, field: &str) {
        match field {
            "date" => self.date = None,
            "category" => self.category = None,
            "description" => self.description = None,
            "amount" => self.amount = None,
            _ => {}
        }
    }
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<NewTransaction, DraftErrors> {
        let mut errors = DraftErrors::default();

        let date = if self.date.trim().is_empty() {
            errors.date = Some("Date is required".to_string());
            None
        } else {
            match parse_date(&self.date) {
                Ok(date) => Some(date),
                Err(e) => {
                    errors.date = Some(e.to_string());
                    None
                }
            }
        };

        let category = match self.category.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                errors.category = Some("Category is required".to_string());
                None
            }
        };

        if self.description.trim().is_empty() {
            errors.description = Some("Description is required".to_string());
        }

        let amount = match parse_amount(&self.amount) {
            Ok(amount) => Some(amount),
            Err(e) => {
                errors.amount = Some(e.to_string());
                None
            }
        };

        match (date, category, amount) {
            (Some(date), Some(category), Some(amount)) if errors.is_empty() => Ok(NewTransaction {
                date,
                category,
                description: self.description.trim().to_string(),
                amount,
                is_recurring: self.is_recurring,
            }),
            _ => Err(errors),
        }
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date.format("%Y-%m-%d").to_string(),
            category: transaction.category.as_str().to_string(),
            description: transaction.description.clone(),
            amount: transaction.amount.to_string(),
            is_recurring: transaction.is_recurring,
        }
    }
}

/// Receipt lines become editable rows; free-text categories are mapped onto
/// the closest tag
impl From<&ReceiptLine> for TransactionDraft {
    fn from(line: &ReceiptLine) -> Self {
        Self {
            date: line.date.clone().unwrap_or_default(),
            category: line
                .category
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .map(|c| map_receipt_category(c).as_str().to_string())
                .unwrap_or_default(),
            description: line.description.clone().unwrap_or_default(),
            amount: line.amount.map(|a| a.to_string()).unwrap_or_default(),
            is_recurring: line.is_recurring,
        }
    }
}

/// Map a category as written on a receipt onto a known tag
pub fn map_receipt_category(raw: &str) -> Category {
    let raw = raw.trim().to_lowercase();
    if let Ok(category) = raw.parse::<Category>() {
        return category;
    }
    match raw.as_str() {
        "dining" | "restaurant" | "groceries" | "grocery" => Category::Food,
        "transportation" | "gas" | "fuel" => Category::Transport,
        "utility" | "electric" | "water" | "internet" => Category::Utilities,
        "streaming" | "movies" => Category::Entertainment,
        "healthcare" | "medical" | "pharmacy" => Category::Health,
        "salary" | "wage" => Category::Income,
        "clothes" => Category::Clothing,
        _ => Category::Miscellaneous,
    }
}

/// Validate every row. On failure the errors line up with the rows, valid
/// rows getting an empty entry.
pub fn validate_drafts(drafts: &[TransactionDraft]) -> Result<Vec<NewTransaction>, Vec<DraftErrors>> {
    let results: Vec<_> = drafts.iter().map(TransactionDraft::validate).collect();
    if results.iter().all(Result::is_ok) {
        Ok(results.into_iter().filter_map(Result::ok).collect())
    } else {
        Err(results
            .into_iter()
            .map(|r| r.err().unwrap_or_default())
            .collect())
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

/// Positive decimal amount
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(raw.trim()).map_err(|_| ValidationError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(amount)
}

/// Check a selected receipt image before uploading it
pub fn validate_receipt(content_type: &str, size: usize, max_bytes: usize) -> Result<(), ValidationError> {
    if !RECEIPT_CONTENT_TYPES.contains(&content_type.to_lowercase().as_str()) {
        return Err(ValidationError::UnsupportedImage);
    }
    if size > max_bytes {
        return Err(ValidationError::ImageTooLarge(max_bytes / (1024 * 1024)));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::Required("Email"));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

pub fn validate_registration(registration: &Registration) -> Result<(), ValidationError> {
    require(&registration.username, "Username")?;
    require(&registration.first_name, "First Name")?;
    require(&registration.last_name, "Last Name")?;
    validate_email(&registration.email)?;
    if registration.password.is_empty() {
        return Err(ValidationError::Required("Password"));
    }
    Ok(())
}

pub fn validate_profile(update: &ProfileUpdate) -> Result<(), ValidationError> {
    require(&update.first_name, "First Name")?;
    require(&update.last_name, "Last Name")?;
    validate_email(&update.email)
}

pub fn validate_password_change(change: &PasswordChange) -> Result<(), ValidationError> {
    if change.current_password.is_empty() {
        return Err(ValidationError::Required("Current password"));
    }
    if change.new_password.is_empty() {
        return Err(ValidationError::Required("New password"));
    }
    if change.new_password != change.re_new_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Editable copy of a saved transaction in the detail modal
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEdit {
    pub date: String,
    pub category: Category,
    pub description: String,
    pub amount: String,
    pub is_recurring: bool,
}

impl From<&Transaction> for TransactionEdit {
    fn from(transaction: &Transaction) -> Self {
        Self {
            date: transaction.date.format("%Y-%m-%d").to_string(),
            category: transaction.category,
            description: transaction.description.clone(),
            amount: transaction.amount.to_string(),
            is_recurring: transaction.is_recurring,
        }
    }
}

impl TransactionEdit {
    /// The fields that differ from `original`
    pub fn changes(&self, original: &Transaction) -> Result<TransactionUpdate, ValidationError> {
        let date = parse_date(&self.date)?;
        require(&self.description, "Description")?;
        let amount = parse_amount(&self.amount)?;
        let description = self.description.trim().to_string();

        Ok(TransactionUpdate {
            date: (date != original.date).then_some(date),
            category: (self.category != original.category).then_some(self.category),
            description: (description != original.description).then_some(description),
            amount: (amount != original.amount).then_some(amount),
            is_recurring: (self.is_recurring != original.is_recurring).then_some(self.is_recurring),
        })
    }
}

/// Monthly PDF report selection
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub filename: String,
    pub year: i32,
    pub month: u32,
}

impl ReportRequest {
    /// Current month with the default filename
    pub fn for_month_of(today: NaiveDate) -> Self {
        Self {
            filename: DEFAULT_REPORT_FILENAME.to_string(),
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=12).contains(&self.month) {
            return Err(ValidationError::InvalidMonth);
        }
        Ok(())
    }

    /// `{filename}_{year}_{MM}.pdf`
    pub fn output_filename(&self) -> String {
        let stem = self.filename.trim();
        let stem = stem.strip_suffix(".pdf").unwrap_or(stem);
        let stem = if stem.is_empty() {
            DEFAULT_REPORT_FILENAME
        } else {
            stem
        };
        format!("{}_{}_{:02}.pdf", stem, self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            date: "2025-03-14".to_string(),
            category: "food".to_string(),
            description: " Groceries ".to_string(),
            amount: "1250.50".to_string(),
            is_recurring: false,
        }
    }

    #[test]
    fn test_valid_draft() {
        let tx = draft().validate().unwrap();
        assert_eq!(tx.description, "Groceries");
        assert_eq!(tx.amount, Decimal::new(125050, 2));
        assert_eq!(tx.category, Category::Food);
    }

    #[test]
    fn test_empty_draft_reports_every_field() {
        let errors = TransactionDraft::default().validate().unwrap_err();
        assert_eq!(errors.date.as_deref(), Some("Date is required"));
        assert_eq!(errors.category.as_deref(), Some("Category is required"));
        assert_eq!(errors.description.as_deref(), Some("Description is required"));
        assert_eq!(errors.amount.as_deref(), Some("Valid amount is required"));
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for amount in ["0", "-5", "abc", ""] {
            let row = TransactionDraft {
                amount: amount.to_string(),
                ..draft()
            };
            let errors = row.validate().unwrap_err();
            assert_eq!(errors.amount.as_deref(), Some("Valid amount is required"));
            assert!(errors.date.is_none());
        }
    }

    #[test]
    fn test_validate_drafts_aligns_errors_with_rows() {
        let rows = vec![
            draft(),
            TransactionDraft {
                description: String::new(),
                ..draft()
            },
        ];
        let errors = validate_drafts(&rows).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].is_empty());
        assert_eq!(errors[1].description.as_deref(), Some("Description is required"));

        let mut row_errors = errors[1].clone();
        row_errors.clear_field("description");
        assert!(row_errors.is_empty());

        assert_eq!(validate_drafts(&[draft(), draft()]).unwrap().len(), 2);
    }

    #[test]
    fn test_receipt_line_becomes_draft() {
        let line = ReceiptLine {
            date: Some("2025-03-14".to_string()),
            category: Some("Groceries".to_string()),
            description: Some("Rice".to_string()),
            amount: Some(Decimal::new(4500, 2)),
            is_recurring: false,
        };
        let row = TransactionDraft::from(&line);
        assert_eq!(row.category, "food");
        assert_eq!(row.amount, "45.00");
        assert!(row.validate().is_ok());

        let blank = TransactionDraft::from(&ReceiptLine::default());
        assert_eq!(blank.category, "");
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_receipt_category_mapping() {
        assert_eq!(map_receipt_category("fuel"), Category::Transport);
        assert_eq!(map_receipt_category("Pharmacy"), Category::Health);
        assert_eq!(map_receipt_category("tax"), Category::Tax);
        assert_eq!(map_receipt_category("atm"), Category::Miscellaneous);
    }

    #[test]
    fn test_receipt_file_checks() {
        let limit = 5 * 1024 * 1024;
        assert!(validate_receipt("image/png", 1024, limit).is_ok());
        assert_eq!(
            validate_receipt("application/pdf", 1024, limit),
            Err(ValidationError::UnsupportedImage)
        );
        let err = validate_receipt("image/jpeg", limit + 1, limit).unwrap_err();
        assert_eq!(err.to_string(), "Image file size must be less than 5MB");
    }

    #[test]
    fn test_email_and_registration() {
        assert!(validate_email("rahim@example.com").is_ok());
        assert_eq!(validate_email("rahim@"), Err(ValidationError::InvalidEmail));

        let registration = Registration {
            username: "rahim".to_string(),
            email: "rahim@example.com".to_string(),
            password: "secret".to_string(),
            first_name: String::new(),
            last_name: "Uddin".to_string(),
        };
        assert_eq!(
            validate_registration(&registration).unwrap_err().to_string(),
            "First Name is required"
        );
    }

    #[test]
    fn test_password_change_mismatch() {
        let change = PasswordChange {
            current_password: "old".to_string(),
            new_password: "a".to_string(),
            re_new_password: "b".to_string(),
        };
        assert_eq!(
            validate_password_change(&change).unwrap_err().to_string(),
            "New passwords do not match"
        );
    }

    #[test]
    fn test_transaction_edit_sends_only_changes() {
        let original = Transaction {
            id: Some(4),
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            category: Category::Housing,
            description: "Rent".to_string(),
            amount: Decimal::from(15000),
            is_recurring: true,
        };
        let mut edit = TransactionEdit::from(&original);
        assert!(edit.changes(&original).unwrap().is_empty());

        edit.amount = "16000".to_string();
        let update = edit.changes(&original).unwrap();
        assert_eq!(
            update,
            TransactionUpdate {
                amount: Some(Decimal::from(16000)),
                ..TransactionUpdate::default()
            }
        );

        edit.date = "not a date".to_string();
        assert_eq!(edit.changes(&original), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn test_report_filename() {
        let mut request = ReportRequest::for_month_of(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap());
        assert_eq!(request.output_filename(), "transactions_report_2025_03.pdf");

        request.filename = "  ".to_string();
        request.month = 11;
        assert_eq!(request.output_filename(), "transactions_report_2025_11.pdf");

        request.filename = "march.pdf".to_string();
        assert_eq!(request.output_filename(), "march_2025_11.pdf");

        request.month = 13;
        assert_eq!(request.validate(), Err(ValidationError::InvalidMonth));
    }
}
