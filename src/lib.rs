//! # sheher-connect
//!
//! Leptos + WASM client for the SheherConnect civic platform: city news,
//! projects, tenders and citizen issue reports, with separate citizen and
//! administrator sessions.
//!
//! The session model lives in `state::credentials` (persisted tokens),
//! `net::http` (bearer attachment and 401 policy), `util::auth` +
//! `components::guards` (route guards) and `state::session` (bootstrap and
//! cross-tab logout). Pages under `pages` consume it.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: logging, panic hook, then mount `App`.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let config = util::config::AppConfig::load();
    if console_log::init_with_level(config.log_level).is_err() {
        leptos::logging::warn!("console logger already initialized");
    }
    log::info!("starting SheherConnect against {}", config.api_base_url);
    leptos::mount::mount_to_body(app::App);
}
