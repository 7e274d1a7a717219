#![forbid(unsafe_code)]

use anyhow::Result;
use log::error;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use crate::client::page::{Page, CONNECTION_ERROR, ECHO_INPUT, ECHO_RESPONSE_OUTPUT};

// ***************************************************************************
//                                EchoHandler
// ***************************************************************************
/** Reads the echo field, posts it to the server as plain text and renders the
 * echoed text into the echo response output element.
 */
pub struct EchoHandler {
    base_url: String,
    http: reqwest::Client,
}

// Only the echo field of the response is consumed.
#[derive(Deserialize)]
struct RespEcho {
    echo: String,
}

impl EchoHandler {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    // -----------------------------------------------------------------------
    // on_send:
    // -----------------------------------------------------------------------
    /** Entry point for the send-echo event.  An empty or missing echo field
     * is sent as the empty string.  Failure handling matches the greeting
     * handler: one fixed error string on the page, details in the log.
     */
    pub async fn on_send(&self, page: &mut dyn Page) {
        let message = page.input_value(ECHO_INPUT).unwrap_or_default();

        match self.fetch_echo(&message).await {
            Ok(text) => page.set_output(ECHO_RESPONSE_OUTPUT, &text),
            Err(e) => {
                error!("Echo request failed: {}", e);
                page.set_output(ECHO_RESPONSE_OUTPUT, CONNECTION_ERROR);
            },
        }
    }

    // -----------------------------------------------------------------------
    // request:
    // -----------------------------------------------------------------------
    /// Build the POST request.  The message travels raw in the body, not
    /// url-encoded, with a plain text content type.
    fn request(&self, message: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}/app/hello", self.base_url))
            .header(CONTENT_TYPE, "text/plain")
            .body(message.to_owned())
    }

    // -----------------------------------------------------------------------
    // fetch_echo:
    // -----------------------------------------------------------------------
    async fn fetch_echo(&self, message: &str) -> Result<String> {
        let resp = self.request(message).send().await?.error_for_status()?;
        let payload: RespEcho = serde_json::from_slice(&resp.bytes().await?)?;
        Ok(payload.echo)
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::endpoint::make_sync;
    use poem::Route;

    use super::EchoHandler;
    use crate::client::page::{CONNECTION_ERROR, ECHO_INPUT, ECHO_RESPONSE_OUTPUT};
    use crate::client::testing::{spawn_route, spawn_server, FakePage};

    #[test]
    fn request_body_is_raw_message() {
        let handler = EchoHandler::new("http://localhost:35000");
        let req = handler.request("hola mundo & más").build().expect("request builds");

        assert_eq!(req.url().as_str(), "http://localhost:35000/app/hello");
        assert_eq!(req.headers()["content-type"], "text/plain");
        assert_eq!(
            req.body().and_then(|b| b.as_bytes()),
            Some("hola mundo & más".as_bytes())
        );
    }

    #[tokio::test]
    async fn renders_echoed_message() {
        let base_url = spawn_server().await;
        let handler = EchoHandler::new(&base_url);
        let mut page = FakePage::new().with_input(ECHO_INPUT, "ping");

        handler.on_send(&mut page).await;

        assert_eq!(page.output(ECHO_RESPONSE_OUTPUT), Some("ping"));
    }

    #[tokio::test]
    async fn quotes_round_trip_verbatim() {
        let base_url = spawn_server().await;
        let handler = EchoHandler::new(&base_url);
        let mut page = FakePage::new().with_input(ECHO_INPUT, "say \"hola\"");

        handler.on_send(&mut page).await;

        assert_eq!(page.output(ECHO_RESPONSE_OUTPUT), Some("say \"hola\""));
    }

    #[tokio::test]
    async fn missing_message_sends_empty_string() {
        let base_url = spawn_server().await;
        let handler = EchoHandler::new(&base_url);
        let mut page = FakePage::new();

        handler.on_send(&mut page).await;

        assert_eq!(page.output(ECHO_RESPONSE_OUTPUT), Some(""));
    }

    #[tokio::test]
    async fn connection_failure_renders_error_string() {
        // Nothing listens on the discard port.
        let handler = EchoHandler::new("http://127.0.0.1:9");
        let mut page = FakePage::new().with_input(ECHO_INPUT, "ping");

        handler.on_send(&mut page).await;

        assert_eq!(page.output(ECHO_RESPONSE_OUTPUT), Some(CONNECTION_ERROR));
    }

    #[tokio::test]
    async fn undecodable_response_renders_error_string() {
        // A server that answers with something other than JSON.
        let route = Route::new().at("/app/hello", make_sync(|_| "no es json"));
        let base_url = spawn_route(route).await;
        let handler = EchoHandler::new(&base_url);
        let mut page = FakePage::new().with_input(ECHO_INPUT, "ping");

        handler.on_send(&mut page).await;

        assert_eq!(page.output(ECHO_RESPONSE_OUTPUT), Some(CONNECTION_ERROR));
    }
}
