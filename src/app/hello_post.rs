#![forbid(unsafe_code)]

use poem::Request;
use poem_openapi::{payload::Json, payload::PlainText, Object, OpenApi};

use crate::utils::app_utils::{self, RequestDebug};

// ***************************************************************************
//                          Request/Response Definitions
// ***************************************************************************
pub struct HelloPostApi;

struct ReqEcho
{
    message: String,
}

#[derive(Object, Debug)]
pub struct RespEcho
{
    echo: String,
}

// Implement the debug record trait for logging.
impl RequestDebug for ReqEcho {
    type Req = ReqEcho;
    fn get_request_info(&self) -> String {
        let mut s = String::with_capacity(64);
        s.push_str("  Request body:");
        s.push_str("\n    message: ");
        s.push_str(&self.message);
        s
    }
}

// ***************************************************************************
//                             OpenAPI Endpoint
// ***************************************************************************
#[OpenApi]
impl HelloPostApi {
    #[oai(path = "/hello", method = "post")]
    async fn post_hello(&self, http_req: &Request, body: PlainText<String>) -> Json<RespEcho> {
        // Package the request body.
        let req = ReqEcho { message: body.0 };

        // Conditional logging depending on log level.
        app_utils::debug_request(http_req, &req);

        Json(RespEcho::process(req))
    }
}

// ***************************************************************************
//                          Request/Response Methods
// ***************************************************************************
impl RespEcho {
    /// Create a new response.
    fn new(echo: String) -> Self {
        Self { echo }
    }

    /// Process the request.  The body is returned verbatim; the JSON
    /// serializer takes care of any escaping.
    fn process(req: ReqEcho) -> Self {
        Self::new(req.message)
    }
}
