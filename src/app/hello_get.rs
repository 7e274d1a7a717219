#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{param::Query, payload::Json, Object, OpenApi};

use crate::utils::app_utils::{self, RequestDebug};

// Name used when the request doesn't supply one.
const DEFAULT_NAME: &str = "Mundo";

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct HelloGetApi;

struct ReqHello
{
    name: Option<String>,
}

#[derive(Object, Debug)]
pub struct RespHello
{
    mensaje: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqHello {
    type Req = ReqHello;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request parameters:");
        s.push_str("\n    name: ");
        s.push_str(self.name.as_deref().unwrap_or("<not provided>"));
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HelloGetApi {
    #[oai(path = "/hello", method = "get")]
    async fn get_hello(&self, http_req: &Request, name: Query<Option<String>>) -> Json<RespHello> {
        // Package the request parameters.
        let req = ReqHello { name: name.0 };

        // Conditional logging depending on log level.
        app_utils::debug_request(http_req, &req);

        Json(RespHello::process(&req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespHello {
    /// Create a new response.
    fn new(mensaje: String) -> Self {
        Self { mensaje }
    }

    /// Process the request.  A missing or empty name falls back to the
    /// default greeting target.
    fn process(req: &ReqHello) -> Self {
        let name = match &req.name {
            Some(n) if !n.is_empty() => n.as_str(),
            _ => DEFAULT_NAME,
        };
        Self::new(format!("Hola {}", name))
    }
}
