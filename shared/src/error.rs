use serde_json::Value;

/// Failure of a call to the finance service.
///
/// Every variant carries a message fit for display; callers convert these to
/// local error strings rather than propagating them further.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,
    #[error("{0}")]
    NotFound(String),
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build the error for a non-success status from the raw response body
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = error_message_from_body(body)
            .unwrap_or_else(|| default_status_message(status).to_string());
        match status {
            401 => ApiError::Unauthorized(message),
            404 => ApiError::NotFound(message),
            400 | 422 => ApiError::Validation(message),
            _ => ApiError::Server { status, message },
        }
    }

    /// The server-provided detail, without the variant prefix
    pub fn detail(&self) -> String {
        match self {
            ApiError::Validation(message)
            | ApiError::Unauthorized(message)
            | ApiError::NotFound(message)
            | ApiError::Network(message)
            | ApiError::Decode(message) => message.clone(),
            ApiError::Server { message, .. } => message.clone(),
            ApiError::SessionExpired => self.to_string(),
        }
    }

    /// Whether the user has to log in again
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::Unauthorized(_))
    }
}

fn default_status_message(status: u16) -> &'static str {
    match status {
        400 => "The request was rejected",
        401 => "Please login to continue.",
        403 => "You do not have permission to do that",
        404 => "Not found",
        500..=599 => "An unexpected error occurred. Please try again.",
        _ => "Request failed",
    }
}

/// Reduce an error body to a single human-readable message.
///
/// Looks at `detail`, `non_field_errors`, `error` and `message` in that
/// order, then joins per-field errors as `Field: msg; Other: msg`. Falls back
/// to the raw text when the body is not JSON.
pub fn error_message_from_body(body: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => return Some(text.to_string()),
    };

    match &value {
        Value::Object(map) => {
            for key in ["detail", "non_field_errors", "error", "message"] {
                if let Some(found) = map.get(key).and_then(flatten_messages) {
                    return Some(found);
                }
            }

            let field_errors: Vec<String> = map
                .iter()
                .filter_map(|(field, messages)| {
                    flatten_messages(messages).map(|m| format!("{}: {}", field_label(field), m))
                })
                .collect();
            if field_errors.is_empty() {
                Some(value.to_string())
            } else {
                Some(field_errors.join("; "))
            }
        }
        other => flatten_messages(other).or_else(|| Some(other.to_string())),
    }
}

fn flatten_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_messages).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}

/// `first_name` -> `First Name`
fn field_label(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_takes_precedence() {
        let body = br#"{"detail": "Given token not valid for any token type", "code": "token_not_valid"}"#;
        assert_eq!(
            error_message_from_body(body).unwrap(),
            "Given token not valid for any token type"
        );
    }

    #[test]
    fn test_non_field_errors_are_joined() {
        let body = br#"{"non_field_errors": ["Passwords differ", "Too short"]}"#;
        assert_eq!(error_message_from_body(body).unwrap(), "Passwords differ, Too short");
    }

    #[test]
    fn test_field_errors_are_labelled() {
        let body = br#"{"email": ["A user with this email already exists."], "first_name": ["First name cannot be empty."]}"#;
        let message = error_message_from_body(body).unwrap();
        assert!(message.contains("Email: A user with this email already exists."));
        assert!(message.contains("First Name: First name cannot be empty."));
        assert!(message.contains("; "));
    }

    #[test]
    fn test_plain_text_and_empty_bodies() {
        assert_eq!(error_message_from_body(b"Bad Gateway").unwrap(), "Bad Gateway");
        assert_eq!(error_message_from_body(b"   "), None);
    }

    #[test]
    fn test_from_status_maps_variants() {
        assert!(matches!(
            ApiError::from_status(404, br#"{"error": "No transactions found for 2025-02"}"#),
            ApiError::NotFound(m) if m == "No transactions found for 2025-02"
        ));
        assert!(matches!(ApiError::from_status(401, b""), ApiError::Unauthorized(_)));
        assert!(matches!(
            ApiError::from_status(400, br#"{"amount": ["Amount must be greater than zero."]}"#),
            ApiError::Validation(m) if m == "Amount: Amount must be greater than zero."
        ));
        assert_eq!(
            ApiError::from_status(502, b""),
            ApiError::Server {
                status: 502,
                message: "An unexpected error occurred. Please try again.".to_string()
            }
        );
    }
}
