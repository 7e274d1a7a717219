#![forbid(unsafe_code)]

use lazy_static::lazy_static;

use crate::utils::config::{init_runtime_context, RuntimeCtx};

// Modules
pub mod app;
pub mod client;
pub mod utils;

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Lazily initialize the runtime context so that it has a 'static lifetime.
// Initialization reads the command line arguments, creates the data
// directories and parses the configuration file.  We exit if any of that
// fails.  Binaries that never touch the context (hello_client) never pay
// for it.
lazy_static! {
    pub static ref RUNTIME_CTX: RuntimeCtx = init_runtime_context();
}
