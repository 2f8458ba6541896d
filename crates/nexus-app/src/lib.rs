//! Nexus App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the browser adapters, the chat orchestrator and the egui UI.

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_ID: &str = "nexus_canvas";

/// WASM entry point, called from index.html
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Nexus WASM starting...");

    let web_options = eframe::WebOptions::default();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str(&format!("No canvas element with id '{}'", CANVAS_ID)))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("Element is not a canvas"))?;

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::NexusApp::new(cc)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });

    Ok(())
}
