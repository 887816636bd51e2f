//! Browser frontend for the calculations service.
//!
//! Supplies the three seams `calc-client` needs: `fetch` for HTTP,
//! `localStorage` for the token, and the page DOM for rendering.

pub mod api;
pub mod dom;
pub mod events;
pub mod render;
pub mod storage;

use std::rc::Rc;

use calc_client::{ApiClient, CalcApp, ClientConfig, SessionManager};
use wasm_bindgen::prelude::*;

use crate::api::FetchTransport;
use crate::render::DomUi;
use crate::storage::LocalStorageTokenStore;

pub type App = CalcApp<FetchTransport, LocalStorageTokenStore, DomUi>;

/// WASM entry point, run when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if let Err(err) = init().await {
        gloo_console::error!("calc-wasm failed to start:", err.clone());
        return Err(err);
    }
    Ok(())
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    let config = ClientConfig::new(api::base_url(&els));
    gloo_console::log!("calc-wasm using API at", config.base_url.clone());

    let api = ApiClient::new(config, FetchTransport);
    let app: Rc<App> = Rc::new(CalcApp::new(
        SessionManager::new(api, LocalStorageTokenStore),
        DomUi::new(els.clone()),
    ));

    events::bind_events(&els, &app)?;
    app.start().await;

    Ok(())
}
