use serde::{Deserialize, Serialize};

/// Backend used when no override is compiled in
pub const DEFAULT_API_BASE_URL: &str = "https://autofinanceai.onrender.com";

/// Client-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Scheme prefix of the Authorization header
    pub auth_scheme: String,
    /// Page size used to pull totals for the home dashboard
    pub dashboard_page_size: u32,
    /// How long transient errors (e.g. a failed download) stay visible
    pub transient_message_ms: u32,
    pub success_message_ms: u32,
    pub max_receipt_bytes: usize,
    pub enable_debug_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            auth_scheme: "JWT".to_string(),
            dashboard_page_size: 1000,
            transient_message_ms: 5000,
            success_message_ms: 1500,
            max_receipt_bytes: 5 * 1024 * 1024,
            enable_debug_logging: false,
        }
    }
}

impl ClientConfig {
    /// Defaults, with `AUTOFINANCE_API_URL` and `AUTOFINANCE_DEBUG` applied
    /// when they were set at build time
    pub fn from_build_env() -> Self {
        Self::with_overrides(
            option_env!("AUTOFINANCE_API_URL"),
            option_env!("AUTOFINANCE_DEBUG"),
        )
    }

    fn with_overrides(api_url: Option<&str>, debug: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(flag) = debug {
            config.enable_debug_logging = matches!(flag.trim(), "1" | "true" | "yes");
        }
        config
    }

    /// Value of the Authorization header for `access`
    pub fn authorization(&self, access: &str) -> String {
        format!("{} {}", self.auth_scheme, access)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.transient_message_ms, 5000);
        assert_eq!(config.max_receipt_bytes, 5_242_880);
        assert_eq!(config.authorization("abc"), "JWT abc");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::with_overrides(Some("http://localhost:8000/"), Some("true"));
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.enable_debug_logging);

        let config = ClientConfig::with_overrides(Some("  "), None);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(!config.enable_debug_logging);
    }
}
