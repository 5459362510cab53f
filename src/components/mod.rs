//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the credential store, API client and display state from
//! Leptos context providers installed by `App`.

pub mod guards;
pub mod navbar;
pub mod news_card;
pub mod notice_bar;
pub mod recovery;
pub mod tender_card;
