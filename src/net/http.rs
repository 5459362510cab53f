//! Shared request pipeline for the civic API.
//!
//! Every API call goes through `ApiClient`, which
//!
//! 1. picks the bearer for the request's `RequestScope` from the live
//!    `CredentialStore` (never cached across requests), and
//! 2. turns a 401 into the session side effects below before handing the
//!    caller `AppError::Unauthorized`.
//!
//! 401 POLICY
//! ==========
//! - Admin scope: clear the admin token; unless already on the admin login
//!   screen, store the current path as redirect hint and force navigation
//!   to `/admin/login`.
//! - User scope: clear the user token; unless on a login/signup screen,
//!   store the current path as redirect hint. No forced navigation; the page
//!   decides what to do.
//!
//! The client never clears both tokens, never retries, and passes transport
//! and non-401 HTTP errors through to the caller.
//!
//! The wire layer sits behind `Transport` so the policy is testable without
//! a browser; `GlooTransport` is the `gloo-net` implementation.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{AppError, error_message_from_body};
use super::scope::RequestScope;
use crate::state::credentials::CredentialStore;
use crate::util::auth::ADMIN_LOGIN_PATH;
use crate::util::navigation::Navigator;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Default request timeout (milliseconds) applied by `GlooTransport`.
#[cfg(feature = "csr")]
const DEFAULT_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// A user-selected file headed for a multipart body.
#[derive(Clone, Debug)]
pub struct Upload {
    pub file_name: String,
    #[cfg(feature = "csr")]
    pub file: web_sys::File,
}

impl Upload {
    #[cfg(feature = "csr")]
    pub fn from_file(file: web_sys::File) -> Self {
        Self {
            file_name: file.name(),
            file,
        }
    }

    /// Placeholder upload carrying only a file name.
    #[cfg(not(feature = "csr"))]
    pub fn named(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum FormPart {
    Text(String),
    File(Upload),
}

/// Ordered multipart form fields; repeated names are allowed.
#[derive(Clone, Debug, Default)]
pub struct MultipartForm {
    parts: Vec<(String, FormPart)>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.parts.push((name.to_owned(), FormPart::Text(value.into())));
        self
    }

    #[must_use]
    pub fn file(mut self, name: &str, upload: Upload) -> Self {
        self.parts.push((name.to_owned(), FormPart::File(upload)));
        self
    }

    pub fn parts(&self) -> &[(String, FormPart)] {
        &self.parts
    }

    /// First text value submitted under `name`.
    #[cfg(test)]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, part)| match part {
            FormPart::Text(value) if n == name => Some(value.as_str()),
            _ => None,
        })
    }

    /// Names of the files submitted under `name`, in order.
    #[cfg(test)]
    pub fn file_names(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|(n, part)| match part {
                FormPart::File(upload) if n == name => Some(upload.file_name.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Clone, Debug)]
pub enum RequestBody {
    Empty,
    Json(String),
    Form(MultipartForm),
}

/// A request as issued by a call site: relative path plus scope tag.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub scope: RequestScope,
    pub body: RequestBody,
}

impl ApiRequest {
    /// New request whose scope is classified from `path`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let scope = RequestScope::classify(&path);
        Self {
            method,
            path,
            scope,
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Override the classified scope for paths shared between roles.
    #[must_use]
    pub fn scope(mut self, scope: RequestScope) -> Self {
        self.scope = scope;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Serialization` if `body` cannot be encoded.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, AppError> {
        let payload = serde_json::to_string(body)
            .map_err(|err| AppError::Serialization(format!("Failed to encode request: {err}")))?;
        self.body = RequestBody::Json(payload);
        Ok(self)
    }

    #[must_use]
    pub fn form(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Form(form);
        self
    }
}

/// A request ready for the wire: absolute URL and final headers.
#[derive(Clone, Debug)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl PreparedRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Token from the `Authorization: Bearer` header, if any.
    pub fn bearer(&self) -> Option<&str> {
        self.header(AUTHORIZATION_HEADER)?.strip_prefix("Bearer ")
    }
}

/// Status and body text of a completed exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a prepared request. Implementations report transport failures as
/// `AppError::Network` / `AppError::Timeout` and every HTTP status as `Ok`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, AppError>;
}

/// What the client did in response to a 401.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnauthorizedOutcome {
    /// Token cleared, hint stored, location forced to the admin login screen.
    Redirected,
    /// Token cleared and the current path stored for a later manual login.
    HintRecorded,
    /// Token cleared only; the user is already on a login screen.
    Cleared,
}

/// Called with the scope whose token a 401 just cleared.
pub type ClearedHook = Arc<dyn Fn(RequestScope) + Send + Sync>;

/// Shared API client handle. Cloning is cheap and clones share state.
#[derive(Clone)]
pub struct ApiClient<T> {
    transport: T,
    store: CredentialStore,
    navigator: Arc<dyn Navigator>,
    base_url: Arc<str>,
    primed_user: Arc<Mutex<Option<String>>>,
    on_cleared: Option<ClearedHook>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, store: CredentialStore, navigator: Arc<dyn Navigator>, base_url: &str) -> Self {
        Self {
            transport,
            store,
            navigator,
            base_url: Arc::from(base_url.trim().trim_end_matches('/')),
            primed_user: Arc::new(Mutex::new(None)),
            on_cleared: None,
        }
    }

    /// Notify `hook` after a 401 clears a token, before any redirect.
    #[must_use]
    pub fn with_on_cleared(mut self, hook: ClearedHook) -> Self {
        self.on_cleared = Some(hook);
        self
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    /// Set the default citizen bearer.
    ///
    /// The live store value always wins; the primed token is only used while
    /// storage is unavailable.
    pub fn prime_user_bearer(&self, token: Option<String>) {
        if let Ok(mut primed) = self.primed_user.lock() {
            *primed = token;
        }
    }

    /// Bearer token that a request in `scope` would carry right now.
    pub fn bearer_for(&self, scope: RequestScope) -> Option<String> {
        match scope {
            RequestScope::Admin => self.store.admin_token(),
            RequestScope::User if self.store.storage_available() => self.store.user_token(),
            RequestScope::User => self.primed_user.lock().ok().and_then(|p| p.clone()),
        }
    }

    /// Absolute URL for `path`; absolute inputs pass through unchanged.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim();
        if path.contains("://") || self.base_url.is_empty() {
            path.to_owned()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Resolve the URL and attach headers for `request`.
    pub fn prepare(&self, request: ApiRequest) -> PreparedRequest {
        let mut headers = Vec::new();
        if matches!(request.body, RequestBody::Json(_)) {
            headers.push((CONTENT_TYPE_HEADER.to_owned(), "application/json".to_owned()));
        }
        if let Some(token) = self.bearer_for(request.scope) {
            headers.push((AUTHORIZATION_HEADER.to_owned(), format!("Bearer {token}")));
        }
        PreparedRequest {
            method: request.method,
            url: self.url_for(&request.path),
            headers,
            body: request.body,
        }
    }

    /// Send `request` and apply the 401 policy.
    ///
    /// # Errors
    ///
    /// `AppError::Unauthorized` on 401 (after clearing the scope's token),
    /// `AppError::Http` on any other non-2xx status, and transport errors
    /// unchanged.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError> {
        let scope = request.scope;
        let method = request.method;
        let path = request.path.clone();
        let prepared = self.prepare(request);

        let response = self.transport.send(prepared).await?;
        if response.status == 401 {
            let outcome = self.handle_unauthorized(scope);
            log::info!("{} {path} unauthorized ({scope:?}): {outcome:?}", method.as_str());
            return Err(AppError::Unauthorized { scope });
        }
        if !response.is_success() {
            log::debug!("{} {path} failed with {}", method.as_str(), response.status);
            return Err(AppError::Http {
                status: response.status,
                message: error_message_from_body(&response.body),
            });
        }
        Ok(response)
    }

    /// Send and decode a JSON response body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus `AppError::Parse` for undecodable bodies.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, AppError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    }

    /// Send and ignore the response body.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`].
    pub async fn send_empty(&self, request: ApiRequest) -> Result<(), AppError> {
        self.send(request).await.map(|_| ())
    }

    /// Clear the credential for `scope` and record/perform the follow-up
    /// navigation for the current screen.
    pub fn handle_unauthorized(&self, scope: RequestScope) -> UnauthorizedOutcome {
        let current = self.navigator.current_path();
        match scope {
            RequestScope::Admin => {
                self.store.clear_admin_token();
                self.notify_cleared(scope);
                if current.contains(ADMIN_LOGIN_PATH) {
                    UnauthorizedOutcome::Cleared
                } else {
                    self.store.set_redirect_hint(&current);
                    self.navigator.force_navigate(ADMIN_LOGIN_PATH);
                    UnauthorizedOutcome::Redirected
                }
            }
            RequestScope::User => {
                self.store.clear_user_token();
                self.prime_user_bearer(None);
                self.notify_cleared(scope);
                if current.contains("/login") || current.contains("/signup") {
                    UnauthorizedOutcome::Cleared
                } else {
                    self.store.set_redirect_hint(&current);
                    UnauthorizedOutcome::HintRecorded
                }
            }
        }
    }

    fn notify_cleared(&self, scope: RequestScope) {
        if let Some(hook) = &self.on_cleared {
            hook(scope);
        }
    }
}

/// `gloo-net` transport with an abort timeout.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

/// The client used by the running app.
pub type BrowserApiClient = ApiClient<GlooTransport>;

impl Transport for GlooTransport {
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, AppError> {
        send_with_timeout(request).await
    }
}

#[cfg(not(feature = "csr"))]
async fn send_with_timeout(_request: PreparedRequest) -> Result<RawResponse, AppError> {
    Err(AppError::Config("HTTP transport is only available in the browser".to_owned()))
}

#[cfg(feature = "csr")]
async fn send_with_timeout(request: PreparedRequest) -> Result<RawResponse, AppError> {
    use gloo_net::http::Request;

    let controller = web_sys::AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_owned()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = gloo_timers::callback::Timeout::new(DEFAULT_TIMEOUT_MS, move || timeout_controller.abort());

    let mut builder = match request.method {
        Method::Get => Request::get(&request.url),
        Method::Post => Request::post(&request.url),
        Method::Delete => Request::delete(&request.url),
    }
    .abort_signal(Some(&signal));
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }

    let built = match request.body {
        RequestBody::Empty => builder.build(),
        RequestBody::Json(payload) => builder.body(payload),
        RequestBody::Form(form) => builder.body(to_form_data(&form)?),
    }
    .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))?;

    let response = built.send().await.map_err(map_request_error)?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(RawResponse { status, body })
}

#[cfg(feature = "csr")]
fn to_form_data(form: &MultipartForm) -> Result<web_sys::FormData, AppError> {
    let data = web_sys::FormData::new()
        .map_err(|_| AppError::Serialization("Failed to create form data.".to_owned()))?;
    for (name, part) in form.parts() {
        let appended = match part {
            FormPart::Text(value) => data.append_with_str(name, value),
            FormPart::File(upload) => data.append_with_blob_and_filename(name, &upload.file, &upload.file_name),
        };
        appended.map_err(|_| AppError::Serialization(format!("Failed to encode form field {name}.")))?;
    }
    Ok(data)
}

/// Maps network errors into `AppError` variants with timeout detection.
#[cfg(feature = "csr")]
fn map_request_error(err: gloo_net::Error) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_owned())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}
