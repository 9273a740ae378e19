//! Admin REST API client
//!
//! `AdminApi` owns the HTTP client, the bearer token and the GET response
//! cache. Endpoint wrappers live in the submodules, one per console screen.

mod categories;
mod faqs;
mod locations;
mod orders;
mod shops;
mod subscriptions;
mod tickets;
mod tutorials;

pub use categories::PARENT_PICKER_LIMIT;
pub use tickets::TicketFilter;

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cache::ResponseCache;
use crate::config::ClientConfig;
use crate::error::{AdminError, Result};
use crate::models::ApiEnvelope;
use crate::pagination::{Page, PageQuery};

/// Query for endpoints that take no parameters.
pub(crate) const NO_QUERY: &[(&str, &str)] = &[];

/// Query string for list endpoints. Empty filters are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListQuery {
    pub limit: usize,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl ListQuery {
    pub fn page(page: PageQuery) -> Self {
        ListQuery {
            limit: page.limit,
            offset: page.offset,
            ..Default::default()
        }
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(search);
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = non_empty(kind);
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = non_empty(status);
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = non_empty(priority);
        self
    }
}

pub struct AdminApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    cache: ResponseCache,
}

impl AdminApi {
    /// Create a client for the configured API. `token` is sent as a bearer token when present.
    pub fn new(config: &ClientConfig, token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            cache: ResponseCache::new(config.cache_ttl),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // ── Transport ────────────────────────────────────────────────────────────

    /// GET with query parameters, served from the response cache while fresh.
    pub(crate) async fn get_value<Q>(&self, path: &str, query: &Q) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        self.fetch(path, query, true).await
    }

    async fn fetch<Q>(&self, path: &str, query: &Q, use_cache: bool) -> Result<Value>
    where
        Q: Serialize + ?Sized,
    {
        let request = self
            .authorize(self.client.get(self.url(path)).query(query))
            .build()?;
        let key = request.url().to_string();

        if use_cache {
            if let Some(cached) = self.cache.get(&key) {
                log::debug!("GET {} (cached)", key);
                return Ok(cached);
            }
        }

        log::debug!("GET {}", key);
        let response = self.client.execute(request).await?;
        let body = read_body(response).await?;
        if use_cache {
            self.cache.put(key, body.clone());
        }
        Ok(body)
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.get_value(path, query).await?;
        Ok(serde_json::from_value(unwrap_data(body))?)
    }

    /// Like `get_json` but always hits the server.
    pub(crate) async fn get_fresh<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.fetch(path, NO_QUERY, false).await?;
        Ok(serde_json::from_value(unwrap_data(body))?)
    }

    pub(crate) async fn get_page<T, Q>(&self, path: &str, query: &Q) -> Result<Page<T>>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let body = self.get_value(path, query).await?;
        page_from(body)
    }

    /// Send a JSON body. A successful mutation invalidates every cached read.
    pub(crate) async fn send_json<B>(&self, method: Method, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        log::info!("{} {}", method, url);
        let request = self.authorize(self.client.request(method, &url).json(body));
        self.mutate(request).await
    }

    pub(crate) async fn send_multipart(&self, method: Method, path: &str, form: Form) -> Result<Value> {
        let url = self.url(path);
        log::info!("{} {} (multipart)", method, url);
        let request = self.authorize(
            self.client
                .request(method, &url)
                .header(reqwest::header::ACCEPT, "application/json")
                .multipart(form),
        );
        self.mutate(request).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value> {
        let url = self.url(path);
        log::info!("DELETE {}", url);
        let request = self.authorize(self.client.delete(&url));
        self.mutate(request).await
    }

    async fn mutate(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let body = read_body(response).await?;
        self.cache.invalidate_all();
        Ok(body)
    }
}

/// Turn a response into JSON, mapping non-2xx statuses to `AdminError::Api`.
async fn read_body(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(AdminError::Api {
            status: status.as_u16(),
            message: error_message(status, &text),
        });
    }

    if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&text)?)
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| status.to_string())
}

/// Strip `{ data: {...} }` wrappers around a single record.
pub(crate) fn unwrap_data(mut value: Value) -> Value {
    while matches!(value.get("data"), Some(Value::Object(_))) {
        value = value["data"].take();
    }
    value
}

/// Accept a bare array, a list envelope, or a list envelope nested under `data`.
pub(crate) fn page_from<T: DeserializeOwned>(value: Value) -> Result<Page<T>> {
    let mut value = value;
    if value.is_array() {
        return Ok(Page {
            data: serde_json::from_value(value)?,
            ..Default::default()
        });
    }
    if matches!(value.get("data"), Some(Value::Object(inner)) if inner.contains_key("data")) {
        value = value["data"].take();
    }
    if !value.is_object() {
        return Err(AdminError::UnexpectedResponse(format!(
            "expected a list, got {}",
            value
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Status-change endpoints answer 200 even when the change was refused; only an
/// explicit success flag counts.
pub(crate) fn ensure_success(body: Value, action: &str) -> Result<Value> {
    let succeeded = serde_json::from_value::<ApiEnvelope<Value>>(body.clone())
        .is_ok_and(|envelope| envelope.is_success());
    if succeeded {
        Ok(body)
    } else {
        Err(AdminError::UnexpectedResponse(format!("Failed to {}", action)))
    }
}
