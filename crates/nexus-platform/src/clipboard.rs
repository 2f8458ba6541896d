//! Clipboard adapter over `navigator.clipboard.writeText`.
//! The promise rejects when the page lacks focus or permission.

use async_trait::async_trait;
use wasm_bindgen_futures::JsFuture;

use nexus_core::ports::ClipboardPort;
use nexus_types::{ChatError, Result};

use crate::describe_js;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClipboard;

impl BrowserClipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl ClipboardPort for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Clipboard("No window object".to_string()))?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| ChatError::Clipboard(describe_js(e)))
    }
}
