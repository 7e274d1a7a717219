#![forbid(unsafe_code)]

use anyhow::Result;
use log::error;
use serde::Deserialize;

use crate::client::page::{Page, CONNECTION_ERROR, FALLBACK_NAME, NAME_INPUT, RESPONSE_OUTPUT};

// ***************************************************************************
//                              GreetingHandler
// ***************************************************************************
/** Reads the name field, requests a greeting from the server and renders the
 * result into the response output element.
 */
pub struct GreetingHandler {
    base_url: String,
    http: reqwest::Client,
}

// Only the mensaje field of the response is consumed.
#[derive(Deserialize)]
struct RespGreeting {
    mensaje: String,
}

impl GreetingHandler {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    // -----------------------------------------------------------------------
    // on_send:
    // -----------------------------------------------------------------------
    /** Entry point for the send-greeting event.  An empty or missing name
     * field falls back to the default literal.  Any failure (network error,
     * non-2xx status, undecodable response) is collapsed into the fixed
     * error string; the cause is only logged.  Overlapping invocations are
     * not guarded against: the last response to resolve wins the display.
     */
    pub async fn on_send(&self, page: &mut dyn Page) {
        let name = match page.input_value(NAME_INPUT) {
            Some(n) if !n.is_empty() => n,
            _ => FALLBACK_NAME.to_string(),
        };

        match self.fetch_greeting(&name).await {
            Ok(text) => page.set_output(RESPONSE_OUTPUT, &text),
            Err(e) => {
                error!("Greeting request failed: {}", e);
                page.set_output(RESPONSE_OUTPUT, CONNECTION_ERROR);
            },
        }
    }

    // -----------------------------------------------------------------------
    // request_url:
    // -----------------------------------------------------------------------
    /// Build the request URL with the name percent-encoded as a query value.
    fn request_url(&self, name: &str) -> String {
        format!("{}/app/hello?name={}", self.base_url, urlencoding::encode(name))
    }

    // -----------------------------------------------------------------------
    // fetch_greeting:
    // -----------------------------------------------------------------------
    async fn fetch_greeting(&self, name: &str) -> Result<String> {
        let resp = self.http
            .get(self.request_url(name))
            .send()
            .await?
            .error_for_status()?;
        let payload: RespGreeting = serde_json::from_slice(&resp.bytes().await?)?;
        Ok(payload.mensaje)
    }
}
