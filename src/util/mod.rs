//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, location,
//! geolocation, configuration) from page and component logic so the session
//! model can be exercised natively against in-memory fakes.

pub mod auth;
pub mod config;
pub mod geolocation;
pub mod navigation;
pub mod storage;
pub mod ticker;
