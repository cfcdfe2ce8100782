//! HTTP surface for the chat page
//!
//! Serves the rendered page, accepts submit/reset commands and streams view
//! updates to connected browsers.

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::ChatHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatHandle,
}

impl AppState {
    pub fn new(chat: ChatHandle) -> Self {
        Self { chat }
    }
}
