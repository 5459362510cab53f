//! Route screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages are the only callers of `net::api`. Each page turns API outcomes into
//! notices, inline errors and router navigation; 401 side effects have
//! already been applied by the client when a page sees `Unauthorized`.

pub mod admin_dashboard;
pub mod admin_login;
pub mod community;
pub mod home;
pub mod login;
pub mod news;
pub mod not_found;
pub mod projects;
pub mod report_issue;
pub mod signup;
pub mod tenders;
