//! Typed calls against the civic API.
//!
//! Each function builds one `ApiRequest` and runs it through the shared
//! `ApiClient`, so bearer selection and 401 handling stay in one place. The
//! tender CRUD calls pin `RequestScope::Admin` because `/api/tenders` is
//! shared with the public list.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::AppError;
use super::http::{ApiClient, ApiRequest, MultipartForm, Transport, Upload};
use super::scope::RequestScope;
use super::types::{
    AdminLoginResponse, Credentials, GeoPoint, IssueCategory, IssueReceipt, LoginResponse, SignupRequest,
    SignupResponse, Tender, UserProfile, VerifyCityRequest, VerifyCityResponse, VerifyResponse,
};

pub const LOGIN_ENDPOINT: &str = "/api/auth/login";
pub const VERIFY_ENDPOINT: &str = "/api/auth/verify";
pub const SIGNUP_ENDPOINT: &str = "/api/auth/signup";
pub const ADMIN_LOGIN_ENDPOINT: &str = "/api/auth/admin/login";
pub const ADMIN_VERIFY_ENDPOINT: &str = "/api/auth/admin/verify";
pub const TENDERS_ENDPOINT: &str = "/api/tenders";
pub const VERIFY_CITY_ENDPOINT: &str = "/api/verify-city";
pub const REPORT_ISSUE_ENDPOINT: &str = "/api/issues/report";

/// Most media files accepted per issue report.
pub const MAX_ISSUE_MEDIA: usize = 3;

pub fn tender_endpoint(id: &str) -> String {
    format!("{TENDERS_ENDPOINT}/{id}")
}

/// Citizen login.
///
/// # Errors
///
/// Any `AppError` from the client; a 401 here is treated as bad credentials.
pub async fn citizen_login<T: Transport>(
    client: &ApiClient<T>,
    credentials: &Credentials,
) -> Result<LoginResponse, AppError> {
    client
        .send_json(ApiRequest::post(LOGIN_ENDPOINT).json(credentials)?)
        .await
}

/// Check the stored citizen token.
///
/// # Errors
///
/// `AppError::Unauthorized` when the token is absent or rejected.
pub async fn verify_citizen<T: Transport>(client: &ApiClient<T>) -> Result<VerifyResponse, AppError> {
    client.send_json(ApiRequest::get(VERIFY_ENDPOINT)).await
}

/// Create a citizen account.
///
/// # Errors
///
/// Any `AppError` from the client.
pub async fn signup<T: Transport>(client: &ApiClient<T>, request: &SignupRequest) -> Result<SignupResponse, AppError> {
    let response = client.send(ApiRequest::post(SIGNUP_ENDPOINT).json(request)?).await?;
    if response.body.trim().is_empty() {
        return Ok(SignupResponse::default());
    }
    serde_json::from_str(&response.body).map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
}

/// Administrator login. Returns the issued token.
///
/// # Errors
///
/// `AppError::Validation("No token received from server")` when the
/// response carries no token, otherwise any client error.
pub async fn admin_login<T: Transport>(client: &ApiClient<T>, credentials: &Credentials) -> Result<String, AppError> {
    let response: AdminLoginResponse = client
        .send_json(ApiRequest::post(ADMIN_LOGIN_ENDPOINT).json(credentials)?)
        .await?;
    match response.token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(AppError::Validation("No token received from server".to_owned())),
    }
}

/// Check the stored admin token.
///
/// # Errors
///
/// `AppError::Unauthorized` when the token is absent or rejected.
pub async fn verify_admin<T: Transport>(client: &ApiClient<T>) -> Result<VerifyResponse, AppError> {
    client.send_json(ApiRequest::get(ADMIN_VERIFY_ENDPOINT)).await
}

/// List tenders under `scope` (public list or admin dashboard).
///
/// # Errors
///
/// Any `AppError` from the client.
pub async fn list_tenders<T: Transport>(client: &ApiClient<T>, scope: RequestScope) -> Result<Vec<Tender>, AppError> {
    client
        .send_json(ApiRequest::get(TENDERS_ENDPOINT).scope(scope))
        .await
}

/// Fields of the "Add Tender" form.
#[derive(Clone, Debug)]
pub struct NewTender {
    pub title: String,
    pub department: String,
    pub description: String,
    pub kind: String,
    /// `YYYY-MM-DD` from the date input.
    pub deadline: String,
    pub file: Option<Upload>,
}

impl Default for NewTender {
    fn default() -> Self {
        Self {
            title: String::new(),
            department: String::new(),
            description: String::new(),
            kind: "Open".to_owned(),
            deadline: String::new(),
            file: None,
        }
    }
}

impl NewTender {
    /// # Errors
    ///
    /// `AppError::Validation` naming the first missing required field.
    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("Title", &self.title),
            ("Department", &self.department),
            ("Deadline", &self.deadline),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{field} is required")));
            }
        }
        Ok(())
    }

    /// Multipart body; blank fields are omitted.
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new();
        for (name, value) in [
            ("title", &self.title),
            ("department", &self.department),
            ("description", &self.description),
            ("type", &self.kind),
            ("deadline", &self.deadline),
        ] {
            if !value.trim().is_empty() {
                form = form.text(name, value.trim());
            }
        }
        if let Some(file) = &self.file {
            form = form.file("file", file.clone());
        }
        form
    }
}

/// Publish a tender.
///
/// # Errors
///
/// `AppError::Validation` for an incomplete form, otherwise any client error.
pub async fn create_tender<T: Transport>(client: &ApiClient<T>, tender: &NewTender) -> Result<(), AppError> {
    tender.validate()?;
    let request = ApiRequest::post(TENDERS_ENDPOINT)
        .scope(RequestScope::Admin)
        .form(tender.to_form());
    client.send_empty(request).await
}

/// Delete a tender by id.
///
/// # Errors
///
/// Any `AppError` from the client.
pub async fn delete_tender<T: Transport>(client: &ApiClient<T>, id: &str) -> Result<(), AppError> {
    let request = ApiRequest::delete(tender_endpoint(id)).scope(RequestScope::Admin);
    client.send_empty(request).await
}

/// Confirm that the Aadhar digits belong to `city`.
///
/// # Errors
///
/// Any `AppError` from the client.
pub async fn verify_city<T: Transport>(client: &ApiClient<T>, aadhar: &str, city: &str) -> Result<bool, AppError> {
    let body = VerifyCityRequest {
        aadhar: aadhar.to_owned(),
        city: city.to_owned(),
    };
    let response: VerifyCityResponse = client
        .send_json(ApiRequest::post(VERIFY_CITY_ENDPOINT).json(&body)?)
        .await?;
    Ok(response.valid)
}

/// A completed issue report ready for submission.
#[derive(Clone, Debug)]
pub struct IssueReport {
    pub category: IssueCategory,
    pub description: String,
    pub city: String,
    pub user_id: Option<String>,
    pub location: Option<GeoPoint>,
    pub media: Vec<Upload>,
}

impl IssueReport {
    /// Multipart body; at most `MAX_ISSUE_MEDIA` files are attached.
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("category", self.category.as_str())
            .text("description", self.description.trim())
            .text("city", self.city.as_str());
        if let Some(user_id) = &self.user_id {
            form = form.text("userId", user_id.as_str());
        }
        if let Some(point) = self.location {
            form = form.text("lat", point.lat.to_string()).text("lng", point.lng.to_string());
        }
        for upload in self.media.iter().take(MAX_ISSUE_MEDIA) {
            form = form.file("media", upload.clone());
        }
        form
    }
}

/// Submit an issue report.
///
/// # Errors
///
/// Any `AppError` from the client.
pub async fn report_issue<T: Transport>(client: &ApiClient<T>, report: &IssueReport) -> Result<IssueReceipt, AppError> {
    let response = client
        .send(ApiRequest::post(REPORT_ISSUE_ENDPOINT).form(report.to_form()))
        .await?;
    Ok(serde_json::from_str(&response.body).unwrap_or_default())
}

/// Persist a citizen session after login or signup and prime the client.
///
/// A response without a profile keeps whatever minimal profile the form
/// collected.
pub fn store_citizen_session<T: Transport>(client: &ApiClient<T>, token: &str, profile: &UserProfile) {
    client.store().set_user_token(token);
    client.store().set_user_profile(profile);
    client.prime_user_bearer(Some(token.to_owned()));
    log::info!("citizen session established");
}
