#![forbid(unsafe_code)]

use structopt::StructOpt;

use hello_server::client::echo::EchoHandler;
use hello_server::client::greeting::GreetingHandler;
use hello_server::client::page::{ConsolePage, ECHO_INPUT, NAME_INPUT};
use hello_server::utils::config::init_console_log;

// ***************************************************************************
//                             Command Line Args
// ***************************************************************************
#[derive(Debug, StructOpt)]
#[structopt(name = "hello_client", about = "Command line client for the hello server.")]
struct ClientArgs {
    /// Base URL of the server.
    #[structopt(short, long, default_value = "http://localhost:35000")]
    url: String,

    #[structopt(subcommand)]
    cmd: ClientCmd,
}

#[derive(Debug, StructOpt)]
enum ClientCmd {
    /// Request a greeting for the given name.
    Greet {
        /// Name to greet; the server default is used when omitted.
        name: Option<String>,
    },
    /// Send a message and print the server's echo of it.
    Echo {
        /// Message to send; an empty message is sent when omitted.
        message: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() {
    let args = ClientArgs::from_args();

    // Request failures are reported on the page; details go to the log.
    init_console_log();

    // Seed the page inputs from the command line and fire the handler.
    let mut page = ConsolePage::new();
    match args.cmd {
        ClientCmd::Greet { name } => {
            if let Some(name) = name {
                page.set_input(NAME_INPUT, &name);
            }
            GreetingHandler::new(&args.url).on_send(&mut page).await;
        },
        ClientCmd::Echo { message } => {
            if let Some(message) = message {
                page.set_input(ECHO_INPUT, &message);
            }
            EchoHandler::new(&args.url).on_send(&mut page).await;
        },
    }
}
