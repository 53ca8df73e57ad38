//! Remote access to the finance service.
//!
//! `Transport` is the raw HTTP primitive (gloo-net in the browser).
//! `AuthorizedClient` wraps it with the credential policy: attach the access
//! credential, and on a 401 refresh once and retry the original call once.
//! `FinanceApi` exposes the typed endpoints on top of that.

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::models::{
    AuthTokens, Credentials, FinancialAnalysis, ListResponse, NewTransaction, ParsedReceipt,
    PasswordChange, ProfileUpdate, ReceiptLine, ReceiptUpload, RefreshRequest, RefreshedAccess,
    Registration, Totals, Transaction, TransactionUpdate, User,
};
use crate::query::ListParams;
use crate::session::Session;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

pub const REFRESH_PATH: &str = "/auth/jwt/refresh/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart {
        field: String,
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

/// A request to the finance service, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Whether the access credential is attached
    pub authenticated: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            authenticated: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, params: ListParams) -> Self {
        self.query.extend(params.into_pairs());
        self
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::Validation(format!("Failed to serialize request: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, field: &str, upload: &ReceiptUpload) -> Self {
        self.body = RequestBody::Multipart {
            field: field.to_string(),
            file_name: upload.file_name.clone(),
            content_type: upload.content_type.clone(),
            bytes: upload.bytes.clone(),
        };
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.authenticated = false;
        self
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path)
    }
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Convert a non-success status into the matching error
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, &self.body))
        }
    }
}

/// Raw HTTP primitive. Implementations attach `access` as the authorization
/// credential when given and report every completed exchange as `Ok`,
/// whatever its status; `Err` is reserved for transport failures.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest, access: Option<&str>)
        -> Result<RawResponse, ApiError>;
}

/// Transport decorated with the refresh-and-retry policy
pub struct AuthorizedClient<T> {
    transport: T,
    session: Session,
}

impl<T: Transport> AuthorizedClient<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send `request`; on 401 refresh the access credential once and retry
    /// once. A failed refresh, or a 401 on the retry, invalidates the session.
    pub async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        if !request.authenticated {
            return self.transport.send(request, None).await?.error_for_status();
        }

        let access = self.session.access_token();
        let response = self.transport.send(request, access.as_deref()).await?;
        if response.status != 401 {
            return response.error_for_status();
        }

        debug!("{} {} returned 401, refreshing credentials", request.method, request.path);
        let access = match self.refresh().await {
            Ok(access) => access,
            Err(e) => {
                warn!("Credential refresh failed: {}", e);
                self.session.invalidate();
                return Err(ApiError::SessionExpired);
            }
        };

        let retried = self.transport.send(request, Some(&access)).await?;
        if retried.status == 401 {
            warn!("{} {} still unauthorized after refresh", request.method, request.path);
            self.session.invalidate();
            return Err(ApiError::SessionExpired);
        }
        retried.error_for_status()
    }

    async fn refresh(&self) -> Result<String, ApiError> {
        let refresh = self
            .session
            .refresh_token()
            .ok_or_else(|| ApiError::Unauthorized("No refresh credential stored".to_string()))?;
        let request = ApiRequest::post(REFRESH_PATH)
            .json(&RefreshRequest { refresh })?
            .anonymous();
        let response = self.transport.send(&request, None).await?.error_for_status()?;
        let refreshed: RefreshedAccess = response.json()?;
        self.session.update_access(refreshed.access.clone());
        Ok(refreshed.access)
    }
}

/// Typed endpoints of the finance service
pub struct FinanceApi<T> {
    client: Rc<AuthorizedClient<T>>,
    config: ClientConfig,
}

impl<T> Clone for FinanceApi<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T> PartialEq for FinanceApi<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client) && self.config == other.config
    }
}

impl<T: Transport> FinanceApi<T> {
    pub fn new(transport: T, session: Session, config: ClientConfig) -> Self {
        Self {
            client: Rc::new(AuthorizedClient::new(transport, session)),
            config,
        }
    }

    pub fn session(&self) -> &Session {
        self.client.session()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        self.client.execute(&request).await?.json()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<AuthTokens, ApiError> {
        let request = ApiRequest::post("/auth/jwt/create/")
            .json(credentials)?
            .anonymous();
        self.call(request).await
    }

    pub async fn register(&self, registration: &Registration) -> Result<User, ApiError> {
        let request = ApiRequest::post("/auth/users/")
            .json(registration)?
            .anonymous();
        self.call(request).await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.call(ApiRequest::get("/auth/users/me/")).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.call(ApiRequest::patch("/api/user/update/").json(update)?).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        let request = ApiRequest::post("/auth/users/set_password/").json(change)?;
        self.client.execute(&request).await.map(|_| ())
    }

    pub async fn list_transactions(&self, params: &ListParams) -> Result<ListResponse, ApiError> {
        self.call(ApiRequest::get("/api/transactions/").query(params.clone()))
            .await
    }

    /// Totals over every transaction of the user, for the home dashboard
    pub async fn dashboard_totals(&self) -> Result<Totals, ApiError> {
        let mut params = ListParams::new();
        params.push("page_size", self.config.dashboard_page_size);
        match self.list_transactions(&params).await? {
            ListResponse::Paginated(page) => Ok(page.totals.unwrap_or_default()),
            ListResponse::Flat(_) => Ok(Totals::default()),
        }
    }

    /// Bulk create; the server accepts a JSON array
    pub async fn create_transactions(
        &self,
        transactions: &[NewTransaction],
    ) -> Result<Vec<Transaction>, ApiError> {
        let request = ApiRequest::post("/api/transactions/").json(&transactions)?;
        let created = self.call(request).await?;
        info!("Created {} transaction(s)", transactions.len());
        Ok(created)
    }

    pub async fn update_transaction(
        &self,
        id: i64,
        update: &TransactionUpdate,
    ) -> Result<(), ApiError> {
        let request = ApiRequest::patch(format!("/api/transactions/{}/", id)).json(update)?;
        self.client.execute(&request).await.map(|_| ())
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
        let request = ApiRequest::delete(format!("/api/transactions/{}/", id));
        self.client.execute(&request).await.map(|_| ())
    }

    /// Extract unsaved transactions from a receipt photo
    pub async fn parse_receipt(&self, upload: &ReceiptUpload) -> Result<Vec<ReceiptLine>, ApiError> {
        let request = ApiRequest::post("/api/image-to-trasaction/").multipart("image", upload);
        let parsed: ParsedReceipt = self.call(request).await?;
        if parsed.success {
            Ok(parsed.transactions)
        } else {
            Err(ApiError::Validation(parsed.error.unwrap_or_else(|| {
                "Failed to parse transactions from image".to_string()
            })))
        }
    }

    /// Monthly PDF report. A 404 means the period has no transactions.
    pub async fn download_report(&self, year: i32, month: u32) -> Result<Vec<u8>, ApiError> {
        let mut params = ListParams::new();
        params.push("year", year);
        params.push("month", month);
        let request = ApiRequest::get("/api/transactions/pdf/download/").query(params);
        match self.client.execute(&request).await {
            Ok(response) => Ok(response.body),
            Err(ApiError::NotFound(_)) => Err(ApiError::NotFound(format!(
                "No transactions found for {}-{:02}",
                year, month
            ))),
            Err(e) => Err(e),
        }
    }

    pub async fn analysis(&self, year: i32, month: u32) -> Result<FinancialAnalysis, ApiError> {
        let mut params = ListParams::new();
        params.push("year", year);
        params.push("month", month);
        let analysis: FinancialAnalysis = self
            .call(ApiRequest::get("/api/analysis/").query(params))
            .await?;
        if analysis.is_failure() {
            return Err(ApiError::Server {
                status: 200,
                message: analysis
                    .error
                    .unwrap_or_else(|| "Failed to fetch analysis".to_string()),
            });
        }
        Ok(analysis)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Scripted transport: replies in order and records what was sent
    #[derive(Clone, Default)]
    pub struct FakeTransport {
        replies: Rc<RefCell<VecDeque<Result<RawResponse, ApiError>>>>,
        pub sent: Rc<RefCell<Vec<(ApiRequest, Option<String>)>>>,
    }

    impl FakeTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(&self, status: u16, body: &str) -> &Self {
            self.replies
                .borrow_mut()
                .push_back(Ok(RawResponse::new(status, body.as_bytes().to_vec())));
            self
        }

        pub fn fail(&self, error: ApiError) -> &Self {
            self.replies.borrow_mut().push_back(Err(error));
            self
        }

        pub fn paths(&self) -> Vec<String> {
            self.sent.borrow().iter().map(|(r, _)| r.path.clone()).collect()
        }

        pub fn credentials(&self) -> Vec<Option<String>> {
            self.sent.borrow().iter().map(|(_, a)| a.clone()).collect()
        }
    }

    #[async_trait(?Send)]
    impl Transport for FakeTransport {
        async fn send(
            &self,
            request: &ApiRequest,
            access: Option<&str>,
        ) -> Result<RawResponse, ApiError> {
            self.sent
                .borrow_mut()
                .push((request.clone(), access.map(str::to_string)));
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;
    use crate::session::{MemoryStorage, SessionEvent};
    use std::cell::RefCell;

    fn logged_in_session() -> (Session, MemoryStorage) {
        let storage = MemoryStorage::with_tokens(AuthTokens {
            access: "stale".to_string(),
            refresh: "refresh-token".to_string(),
        });
        (Session::init(storage.clone()), storage)
    }

    fn api(transport: &FakeTransport, session: &Session) -> FinanceApi<FakeTransport> {
        FinanceApi::new(transport.clone(), session.clone(), ClientConfig::default())
    }

    const EMPTY_PAGE: &str = r#"{"count": 0, "total_pages": 1, "page_size": 20, "results": []}"#;

    #[tokio::test]
    async fn test_attaches_access_credential() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport.reply(200, EMPTY_PAGE);

        api(&transport, &session)
            .list_transactions(&ListParams::new())
            .await
            .unwrap();
        assert_eq!(transport.credentials(), vec![Some("stale".to_string())]);
    }

    #[tokio::test]
    async fn test_refreshes_once_and_retries_original_call() {
        let (session, storage) = logged_in_session();
        let transport = FakeTransport::new();
        transport
            .reply(401, r#"{"detail": "Given token not valid"}"#)
            .reply(200, r#"{"access": "fresh"}"#)
            .reply(200, EMPTY_PAGE);

        let response = api(&transport, &session)
            .list_transactions(&ListParams::new())
            .await;
        assert!(response.is_ok());
        assert_eq!(
            transport.paths(),
            vec!["/api/transactions/", REFRESH_PATH, "/api/transactions/"]
        );
        assert_eq!(
            transport.credentials(),
            vec![Some("stale".to_string()), None, Some("fresh".to_string())]
        );
        assert_eq!(storage.stored().unwrap().access, "fresh");
        assert!(session.is_authenticated());

        let (refresh_request, _) = transport.sent.borrow()[1].clone();
        assert_eq!(
            refresh_request.body,
            RequestBody::Json(serde_json::json!({"refresh": "refresh-token"}))
        );
    }

    #[tokio::test]
    async fn test_failed_refresh_invalidates_session() {
        let (session, storage) = logged_in_session();
        let events = Rc::new(RefCell::new(Vec::new()));
        let seen = events.clone();
        session.subscribe(move |event| seen.borrow_mut().push(event));

        let transport = FakeTransport::new();
        transport
            .reply(401, r#"{"detail": "expired"}"#)
            .reply(401, r#"{"detail": "Token is invalid or expired"}"#);

        let result = api(&transport, &session)
            .list_transactions(&ListParams::new())
            .await;
        assert_eq!(result.unwrap_err(), ApiError::SessionExpired);
        assert!(!session.is_authenticated());
        assert_eq!(storage.stored(), None);
        assert_eq!(*events.borrow(), vec![SessionEvent::Expired]);
        // no retry of the original call after a failed refresh
        assert_eq!(transport.sent.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_second_unauthorized_is_not_retried_again() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport
            .reply(401, "")
            .reply(200, r#"{"access": "fresh"}"#)
            .reply(401, "");

        let result = api(&transport, &session).current_user().await;
        assert_eq!(result.unwrap_err(), ApiError::SessionExpired);
        assert_eq!(transport.sent.borrow().len(), 3);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_missing_refresh_credential_expires_session() {
        let session = Session::init(MemoryStorage::new());
        let transport = FakeTransport::new();
        transport.reply(401, "");

        let result = api(&transport, &session).current_user().await;
        assert_eq!(result.unwrap_err(), ApiError::SessionExpired);
        assert_eq!(transport.sent.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_anonymous_requests_skip_the_policy() {
        let session = Session::init(MemoryStorage::new());
        let transport = FakeTransport::new();
        transport.reply(401, r#"{"detail": "No active account found with the given credentials"}"#);

        let result = api(&transport, &session)
            .login(&Credentials {
                username: "rahim".to_string(),
                password: "wrong".to_string(),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::Unauthorized("No active account found with the given credentials".to_string())
        );
        assert_eq!(transport.credentials(), vec![None]);
    }

    #[tokio::test]
    async fn test_report_not_found_names_the_period() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport.reply(404, r#"{"error": "No transactions found for 2024-3"}"#);

        let result = api(&transport, &session).download_report(2024, 3).await;
        assert_eq!(
            result.unwrap_err(),
            ApiError::NotFound("No transactions found for 2024-03".to_string())
        );
        let (request, _) = transport.sent.borrow()[0].clone();
        assert_eq!(
            request.query,
            vec![
                ("year".to_string(), "2024".to_string()),
                ("month".to_string(), "3".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_report_returns_pdf_bytes() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport.reply(200, "%PDF-1.4");

        let bytes = api(&transport, &session).download_report(2025, 1).await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4".to_vec());
    }

    #[tokio::test]
    async fn test_receipt_failure_surfaces_server_message() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport.reply(200, r#"{"success": false, "error": "Blurry image"}"#);

        let upload = ReceiptUpload {
            file_name: "receipt.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        let result = api(&transport, &session).parse_receipt(&upload).await;
        assert_eq!(result.unwrap_err(), ApiError::Validation("Blurry image".to_string()));

        let (request, _) = transport.sent.borrow()[0].clone();
        assert!(matches!(request.body, RequestBody::Multipart { ref field, .. } if field == "image"));
    }

    #[tokio::test]
    async fn test_analysis_error_payload_becomes_failure() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport.reply(200, r#"{"error": "Analysis failed: quota exceeded"}"#);

        let result = api(&transport, &session).analysis(2025, 6).await;
        assert_eq!(result.unwrap_err().detail(), "Analysis failed: quota exceeded");
    }

    #[tokio::test]
    async fn test_dashboard_totals_requests_large_page() {
        let (session, _) = logged_in_session();
        let transport = FakeTransport::new();
        transport.reply(
            200,
            r#"{"count": 2, "total_pages": 1, "page_size": 1000, "results": [],
                "totals": {"total_income": 50000.0, "total_expenses": 1200.5, "net_amount": 48799.5}}"#,
        );

        let totals = api(&transport, &session).dashboard_totals().await.unwrap();
        assert_eq!(totals.total_income, rust_decimal::Decimal::from(50000));
        let (request, _) = transport.sent.borrow()[0].clone();
        assert_eq!(request.query, vec![("page_size".to_string(), "1000".to_string())]);
    }

    #[test]
    fn test_request_url_joins_base() {
        let request = ApiRequest::get("/api/transactions/");
        assert_eq!(
            request.url("https://example.test/"),
            "https://example.test/api/transactions/"
        );
    }
}
