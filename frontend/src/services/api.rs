use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder};
use js_sys::{Array, Uint8Array};
use shared::api::{ApiRequest, Method, RawResponse, RequestBody, Transport};
use shared::{ApiError, ClientConfig, FinanceApi, Session};
use web_sys::{Blob, BlobPropertyBag, FormData};

/// Typed endpoints over the browser transport
pub type ApiClient = FinanceApi<BrowserTransport>;

/// HTTP transport backed by the browser's fetch
#[derive(Clone)]
pub struct BrowserTransport {
    config: ClientConfig,
}

impl BrowserTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn builder(&self, request: &ApiRequest) -> RequestBuilder {
        let url = request.url(&self.config.api_base_url);
        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        if request.query.is_empty() {
            builder
        } else {
            builder.query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        }
    }
}

/// Build a multipart body holding one file part
fn form_data(
    field: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<FormData, ApiError> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(content_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        .map_err(|e| ApiError::Validation(format!("Failed to read file: {:?}", e)))?;
    let form = FormData::new()
        .map_err(|e| ApiError::Validation(format!("Failed to build form: {:?}", e)))?;
    form.append_with_blob_and_filename(field, &blob, file_name)
        .map_err(|e| ApiError::Validation(format!("Failed to build form: {:?}", e)))?;
    Ok(form)
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(
        &self,
        request: &ApiRequest,
        access: Option<&str>,
    ) -> Result<RawResponse, ApiError> {
        let mut builder = self.builder(request);
        if let Some(access) = access {
            builder = builder.header("Authorization", &self.config.authorization(access));
        }

        let prepared = match &request.body {
            RequestBody::Empty => builder.build(),
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart {
                field,
                file_name,
                content_type,
                bytes,
            } => builder.body(form_data(field, file_name, content_type, bytes)?),
        }
        .map_err(|e| ApiError::Validation(format!("Failed to serialize request: {}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .binary()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(RawResponse::new(status, body))
    }
}

/// Client for the configured service, sharing `session`
pub fn client(config: ClientConfig, session: Session) -> ApiClient {
    FinanceApi::new(BrowserTransport::new(&config), session, config)
}
