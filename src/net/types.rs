//! Wire DTOs for the civic API and the news feed.
//!
//! DESIGN
//! ======
//! Field names follow the backend's JSON (`_id`, `fileUrl`, `type`) through
//! serde renames so the Rust side keeps snake_case names.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Citizen profile cached next to the user token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user identifier.
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name, if the account has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Login email.
    pub email: String,
    /// Registered city; issue reports are only accepted for this city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl UserProfile {
    /// Minimal profile for a login response that carried none.
    pub fn from_email(email: &str) -> Self {
        Self {
            id: None,
            name: None,
            email: email.trim().to_owned(),
            city: None,
        }
    }

    /// Name for greetings, falling back to the email's local part.
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => self.email.split('@').next().unwrap_or_default().to_owned(),
        }
    }
}

/// Email + password pair used by both login forms.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of `POST /api/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /api/auth/admin/login`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AdminLoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// Response of the token verification endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub valid: bool,
}

/// Body of `POST /api/auth/signup`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub city: String,
}

impl std::fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("city", &self.city)
            .finish()
    }
}

/// Response of `POST /api/auth/signup`; some deployments sign the user in directly.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A published tender.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub description: String,
    /// Procurement type, e.g. `Open` or `Limited`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Submission deadline as an ISO-8601 date or timestamp.
    #[serde(default)]
    pub deadline: String,
    #[serde(rename = "fileUrl", default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Body of `POST /api/verify-city`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyCityRequest {
    /// Last two digits of the citizen's Aadhar number.
    pub aadhar: String,
    pub city: String,
}

/// Response of `POST /api/verify-city`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct VerifyCityResponse {
    #[serde(default)]
    pub valid: bool,
}

/// Latitude/longitude stamp attached to an issue report.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Response of `POST /api/issues/report`.
#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
pub struct IssueReceipt {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// News article from the external news API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "urlToImage", default)]
    pub image_url: Option<String>,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub source: Option<NewsSource>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewsSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// Envelope of the news API `everything` query.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewsResponse {
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

/// Issue categories accepted by `POST /api/issues/report`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCategory {
    #[default]
    Water,
    Infrastructure,
    Waste,
    Lighting,
    Sanitation,
}

impl IssueCategory {
    pub const ALL: [Self; 5] = [
        Self::Water,
        Self::Infrastructure,
        Self::Waste,
        Self::Lighting,
        Self::Sanitation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::Infrastructure => "Infrastructure",
            Self::Waste => "Waste",
            Self::Lighting => "Lighting",
            Self::Sanitation => "Sanitation",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
    }
}
