#![forbid(unsafe_code)]

pub mod hello_get;
pub mod hello_post;
pub mod version;

use poem::endpoint::StaticFilesEndpoint;
use poem_openapi::OpenApiService;

use hello_get::HelloGetApi;
use hello_post::HelloPostApi;
use version::VersionApi;

// Endpoints mounted under the /app path prefix.
pub type AppEndpoints = (HelloGetApi, HelloPostApi, VersionApi);

// ---------------------------------------------------------------------------
// api_service:
// ---------------------------------------------------------------------------
/** Assemble the OpenAPI service shared by the server binary and the tests. */
pub fn api_service(server_url: &str) -> OpenApiService<AppEndpoints, ()> {
    OpenApiService::new(
        (HelloGetApi, HelloPostApi, VersionApi),
        "Hello Server",
        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
    )
    .server(server_url)
}

// ---------------------------------------------------------------------------
// static_site:
// ---------------------------------------------------------------------------
/** The static content endpoint mounted at the site root.  Serves the bundled
 * web page; / resolves to index.html, anything else 404s.
 */
pub fn static_site(www_dir: &str) -> StaticFilesEndpoint {
    StaticFilesEndpoint::new(www_dir).index_file("index.html")
}
