//! Client-side state modules.
//!
//! DESIGN
//! ======
//! `credentials` and `session` hold the session model; the rest are small
//! per-screen models that pages keep in `RwSignal`s.

pub mod auth;
pub mod credentials;
pub mod notice;
pub mod report;
pub mod session;
pub mod tenders;
