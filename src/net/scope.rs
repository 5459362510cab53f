//! Request categories for bearer selection.
//!
//! DESIGN
//! ======
//! Every request carries a `RequestScope`. Call sites either take the scope
//! `classify` derives from the path or set one explicitly when a path is
//! shared between citizen and admin use (`/api/tenders`).

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;

use crate::state::credentials::CredentialKind;

/// Path prefixes served only to administrators.
const ADMIN_PATH_PREFIXES: [&str; 2] = ["/api/admin", "/api/auth/admin"];

/// Which credential a request is made under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RequestScope {
    /// Citizen API surface; carries the user token.
    #[default]
    User,
    /// Admin API surface; carries the admin token.
    Admin,
}

impl RequestScope {
    /// Classify a request target by path prefix.
    ///
    /// Accepts absolute URLs and ignores query strings and fragments. A prefix
    /// only matches on a path-segment boundary, so `/api/administer` is a
    /// user path.
    pub fn classify(target: &str) -> Self {
        let path = request_path(target);
        if ADMIN_PATH_PREFIXES
            .iter()
            .any(|prefix| has_segment_prefix(path, prefix))
        {
            Self::Admin
        } else {
            Self::User
        }
    }

    /// The credential attached to (and cleared for) requests in this scope.
    pub fn credential(self) -> CredentialKind {
        match self {
            Self::User => CredentialKind::User,
            Self::Admin => CredentialKind::Admin,
        }
    }
}

impl From<RequestScope> for CredentialKind {
    fn from(scope: RequestScope) -> Self {
        scope.credential()
    }
}

fn request_path(target: &str) -> &str {
    let without_origin = match target.find("://") {
        Some(idx) => {
            let rest = &target[idx + 3..];
            rest.find('/').map_or("/", |slash| &rest[slash..])
        }
        None => target,
    };
    let end = without_origin
        .find(['?', '#'])
        .unwrap_or(without_origin.len());
    &without_origin[..end]
}

fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
