#![forbid(unsafe_code)]

use log::info;
use poem::listener::TcpListener;
use poem::Route;

// Hello Utilities
use hello_server::app;
use hello_server::utils::app_utils::get_absolute_path;
use hello_server::utils::config::{init_log, HELLO_ARGS};
use hello_server::utils::errors::Errors;
use hello_server::RUNTIME_CTX;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "HelloServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting hello_server!");

    // Initialize the server.
    server_init();

    // --------------- Main Loop Set Up ---------------
    // Assign base URL.
    let app_url = format!("{}:{}{}",
        RUNTIME_CTX.parms.config.http_addr,
        RUNTIME_CTX.parms.config.http_port,
        "/app");

    // Create the OpenAPI service with the greeting, echo and version endpoints.
    let api_service = app::api_service(&app_url);

    // Allow the generated openapi specs to be retrieved from the server.
    let spec = api_service.spec_endpoint();
    let ui = api_service.swagger_ui();

    // The web page and other static content.  The configuration can point
    // at a directory outside the data root.
    let www_dir = RUNTIME_CTX.parms.config.www_dir.clone()
        .map(|d| get_absolute_path(&d))
        .unwrap_or_else(|| RUNTIME_CTX.dirs.www_dir.clone());
    let www = app::static_site(&www_dir);

    // Create the routes and run the server.
    let addr = format!("{}{}", "0.0.0.0:", RUNTIME_CTX.parms.config.http_port);
    let app = Route::new()
        .nest("/app", api_service)
        .nest("/docs", ui)
        .at("/spec", spec)
        .nest("/", www);

    // ------------------ Main Loop -------------------
    poem::Server::new(TcpListener::bind(addr))
        .name(SERVER_NAME)
        .run(app)
        .await
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// server_init:
// ---------------------------------------------------------------------------
/** Initialize all subsystems and data structures other than those needed
 * to configure the main loop processor.
 */
fn server_init() {
    // Configure our log.
    init_log();

    // Force the reading of input parameters and initialization of runtime context.
    info!("{}", Errors::InputParms(format!("{:#?}", *RUNTIME_CTX)));

    // Log build info.
    print_version_info();

    // Stop here when only the data directories were requested.
    if HELLO_ARGS.create_dirs_only {
        println!("Data directories created under {}. Exiting.", RUNTIME_CTX.dirs.root_dir);
        std::process::exit(0);
    }
}

// ---------------------------------------------------------------------------
// print_version_info:
// ---------------------------------------------------------------------------
fn print_version_info() {
    info!("Running hello_server version {}.",
          option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"));
}
