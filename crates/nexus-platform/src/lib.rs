//! Browser adapters for the nexus-core ports.

pub mod transport;
pub mod clipboard;
pub mod timer;
mod wire;


pub use clipboard::BrowserClipboard;
pub use timer::BrowserTimer;
pub use transport::HttpTransport;

use gloo_utils::errors::JsError;
use wasm_bindgen::JsValue;

/// Readable text for a rejected promise or a failed web-sys call
pub(crate) fn describe_js(value: JsValue) -> String {
    match JsError::try_from(value) {
        Ok(err) => err.to_string(),
        Err(not_error) => not_error.to_string(),
    }
}
