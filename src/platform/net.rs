//! Network collaborators: catalog fetch and result submission
//!
//! Neither ever blocks or fails the game. A missing catalog falls back to
//! the embedded one, a failed submission is only logged.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::catalog::{Catalog, CatalogError, GameConfig, GameData};
use crate::results::{AttemptRecord, ResultsError, ResultsSink, user_id_from_query};
use crate::sim::SessionSummary;

/// LocalStorage key mirroring the last submitted attempt
const LAST_ATTEMPT_KEY: &str = "lastGameData";

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let response: Response = JsFuture::from(window()?.fetch_with_str(url))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}

async fn post_json(url: &str, body: &str) -> Result<(), JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let response: Response = JsFuture::from(window()?.fetch_with_request(&request))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("HTTP {}", response.status())));
    }
    Ok(())
}

/// Fetch and parse the remote catalog
pub async fn fetch_catalog(url: &str) -> Result<Catalog, CatalogError> {
    let body = fetch_text(url)
        .await
        .map_err(|e| CatalogError::Fetch(format!("{e:?}")))?;
    Catalog::from_api_json(&body)
}

/// Catalog from `url` (or the embedded one) plus the given tuning
pub async fn load_game_data(url: Option<&str>, config: GameConfig) -> GameData {
    let loaded = match url {
        Some(url) => fetch_catalog(url).await,
        None => Err(CatalogError::Fetch("no catalog URL configured".into())),
    };
    GameData::with_fallback(loaded, config)
}

/// Mirrors attempts to LocalStorage and POSTs them to the results endpoint
pub struct WebResultsSink {
    endpoint: Option<String>,
    game_id: u32,
}

impl WebResultsSink {
    pub fn new(endpoint: Option<String>, game_id: u32) -> Self {
        Self { endpoint, game_id }
    }
}

impl ResultsSink for WebResultsSink {
    fn submit(&mut self, summary: &SessionSummary) -> Result<(), ResultsError> {
        let query = window()
            .and_then(|w| w.location().search())
            .unwrap_or_default();
        let user_id = user_id_from_query(&query).ok_or(ResultsError::MissingUser)?;

        let record = AttemptRecord::new(user_id, self.game_id, summary);
        let json = record.to_json()?;
        log::info!("Game data saved: {json}");

        if let Err(e) = crate::platform::storage::set(LAST_ATTEMPT_KEY, &json) {
            log::warn!("{}", ResultsError::Storage(e));
        }

        let Some(endpoint) = self.endpoint.clone() else {
            return Ok(());
        };
        wasm_bindgen_futures::spawn_local(async move {
            match post_json(&endpoint, &json).await {
                Ok(()) => log::info!("Result submitted"),
                Err(e) => log::error!("{}", ResultsError::Transport(format!("{e:?}"))),
            }
        });
        Ok(())
    }
}
