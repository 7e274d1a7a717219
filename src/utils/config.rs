#![forbid(unsafe_code)]

use anyhow::{anyhow, Result};
use fs_mistrust::Mistrust;
use lazy_static::lazy_static;
use log::{error, info, LevelFilter};
use serde::Deserialize;
use std::os::unix::fs::PermissionsExt;
use std::{env, fs, path::Path};
use structopt::StructOpt;
use toml;

use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;

// Hello Utilities
use crate::utils::errors::Errors;

use super::app_utils::get_absolute_path;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Directory and file locations. Unless otherwise noted, all files and directories
// are relative to the root directory.
const ENV_HELLO_ROOT_DIR   : &str = "HELLO_ROOT_DIR";
const DEFAULT_ROOT_DIR     : &str = "~/.hello_server";
const CONFIG_DIR           : &str = "/config";
const LOGS_DIR             : &str = "/logs";
const WWW_DIR              : &str = "/www";
const LOG4RS_CONFIG_FILE   : &str = "/log4rs.yml";    // relative to config dir
const HELLO_CONFIG_FILE    : &str = "/hello.toml";    // relative to config dir

// Networking.
const DEFAULT_HTTP_ADDR    : &str = "http://localhost";
const DEFAULT_HTTP_PORT    : u16  = 35000;

// ***************************************************************************
//                             Static Variables
// ***************************************************************************
// Assign the command line arguments BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref HELLO_ARGS: ServerArgs = init_server_args();
}

// Calculate the data directories BEFORE RUNTIME_CTX is initialized in main.
lazy_static! {
    pub static ref HELLO_DIRS: HelloDirs = init_hello_dirs();
}

// ***************************************************************************
//                             Directory Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// HelloDirs:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct HelloDirs {
    pub root_dir: String,
    pub config_dir: String,
    pub logs_dir: String,
    pub www_dir: String,
}

// ***************************************************************************
//                               Config Structs
// ***************************************************************************
// ---------------------------------------------------------------------------
// CommandLineArgs:
// ---------------------------------------------------------------------------
#[derive(Debug, StructOpt)]
#[structopt(name = "hello_server", about = "Command line arguments for the hello server.")]
pub struct ServerArgs {
    /// Specify the server's root data directory.
    ///
    /// This directory contains all the files the server uses during execution.
    #[structopt(short, long)]
    pub root_dir: Option<String>,

    /// Create the data directories and then exit.
    ///
    /// The data directories will be rooted at a root directory calculated
    /// using the following priority order:
    ///
    ///   1. If set, the value of the HELLO_ROOT_DIR environment,
    ///
    ///   2. Otherwise, if set, the value of the --root_dir command line argument,
    ///
    ///   3. Otherwise, ~/.hello_server
    ///
    #[structopt(short, long)]
    pub create_dirs_only: bool,
}

// ---------------------------------------------------------------------------
// Parms:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct Parms {
    pub config_file: String,
    pub config: Config,
}

// ---------------------------------------------------------------------------
// RuntimeCtx:
// ---------------------------------------------------------------------------
#[derive(Debug)]
pub struct RuntimeCtx {
    pub parms: Parms,
    pub args: &'static ServerArgs,
    pub dirs: &'static HelloDirs,
}

// ---------------------------------------------------------------------------
// Config:
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
pub struct Config {
    pub title: String,
    pub http_addr: String,
    pub http_port: u16,
    pub www_dir: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Config::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello Server".to_string(),
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
            http_port: DEFAULT_HTTP_PORT,
            www_dir: None,
        }
    }
}

// ***************************************************************************
//                            Directory Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_server_args:
// ---------------------------------------------------------------------------
/** Get the command line arguments. */
fn init_server_args() -> ServerArgs {
    let args = ServerArgs::from_args();
    println!("{:?}", args);
    args
}

// ---------------------------------------------------------------------------
// init_hello_dirs:
// ---------------------------------------------------------------------------
/** Calculate the external data directories. */
fn init_hello_dirs() -> HelloDirs {
    // Initialize the mistrust object.
    let mistrust = get_mistrust();

    // Check that each path is absolute and is a directory with the
    // proper permission assigned if it exists.  If it doesn't exist,
    // create it.
    let root_dir = get_root_dir();
    check_hello_dir(&root_dir, "root directory", &mistrust);

    let config_dir = root_dir.clone() + CONFIG_DIR;
    check_hello_dir(&config_dir, "config directory", &mistrust);

    let logs_dir = root_dir.clone() + LOGS_DIR;
    check_hello_dir(&logs_dir, "logs directory", &mistrust);

    let www_dir = root_dir.clone() + WWW_DIR;
    check_hello_dir(&www_dir, "www directory", &mistrust);

    // Package up and return the directories.
    HelloDirs {
        root_dir, config_dir, logs_dir, www_dir,
    }
}

// ---------------------------------------------------------------------------
// check_hello_dir:
// ---------------------------------------------------------------------------
/** Check that the path is absolute and, if it exists, that it has the proper
 * permissions assigned.  If it doesn't exist, create it.  The mistrust package
 * creates directories with 0o700 permissions.
 *
 * Any failure results in a panic.
 */
fn check_hello_dir(dir: &String, msgname: &str, mistrust: &Mistrust) {
    // Get the path object.
    let path = Path::new(dir);
    if !path.is_absolute() {
        panic!("The {} path must be absolute: {}", msgname, dir);
    }
    if path.exists() {
        // Make sure the path represents a directory.
        if !path.is_dir() {
            panic!("The {} path must be a directory: {}", msgname, dir);
        }

        // Make sure the directory has rwx for owner only.
        let meta = path.metadata().unwrap_or_else(|_| panic!("Unable to read metadata for {}: {}", msgname, dir));
        let perm = meta.permissions().mode();
        if perm & 0o777 != 0o700 {
            panic!("The {} path must have 0o700 permissions: {}", msgname, dir);
        }
    } else {
        // Create the directory with the correct permissions.
        match mistrust.make_directory(path) {
            Ok(_) => (),
            Err(e) => {
                panic!("Make directory error for {:?}: {}", path, &e.to_string());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// get_mistrust:
// ---------------------------------------------------------------------------
/** Configure a new mistrust object for initial directory processing. */
fn get_mistrust() -> Mistrust {
    // Configure our mistrust object.
    let mistrust = match Mistrust::builder()
        .ignore_prefix(get_absolute_path("~"))
        .trust_group(0)
        .build() {
            Ok(m) => m,
            Err(e) => {
                panic!("Mistrust configuration error: {}", &e.to_string());
            }
        };
    mistrust
}

// ---------------------------------------------------------------------------
// get_root_dir:
// ---------------------------------------------------------------------------
fn get_root_dir() -> String {
    // Order of precedence:
    //  1. Environment variable
    //  2. Command line --root-dir argument
    //  3. Default location
    //
    let root_dir = env::var(ENV_HELLO_ROOT_DIR).unwrap_or_else(
        |_| {
            match HELLO_ARGS.root_dir.clone() {
                Some(r) => r,
                None => DEFAULT_ROOT_DIR.to_string(),
            }
        });

    // Canonicalize the path.
    get_absolute_path(&root_dir)
}

// ***************************************************************************
//                               Log Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_log:
// ---------------------------------------------------------------------------
/** Initialize log4rs from the configuration file if one is present, otherwise
 * fall back to console logging so a fresh installation still gets output.
 */
pub fn init_log() {
    let logconfig = init_log_config();
    if Path::new(&logconfig).exists() {
        match log4rs::init_file(logconfig.clone(), Default::default()) {
            Ok(_) => (),
            Err(e) => {
                println!("{}", e);
                let s = format!("{}", Errors::Log4rsInitialization(logconfig.clone()));
                panic!("{}", s);
            },
        }
        info!("Log4rs initialized using: {}", logconfig);
    } else {
        init_console_log();
        info!("Log4rs configuration not found at {}, logging to console.", logconfig);
    }
}

// ---------------------------------------------------------------------------
// init_console_log:
// ---------------------------------------------------------------------------
/** Programmatic console appender used when no log4rs.yml exists.  Also used
 * by the hello_client binary, which has no data directories at all.
 */
pub fn init_console_log() {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%dT%H:%M:%S%.6fZ)(utc)} {l} {t} - {m}{n}")))
        .build();
    let config = match log4rs::config::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(LevelFilter::Info)) {
            Ok(c) => c,
            Err(e) => {
                panic!("Log4rs console configuration error: {}", &e.to_string());
            },
        };

    // Ignore the error if a logger is already installed.
    let _ = log4rs::init_config(config);
}

// ---------------------------------------------------------------------------
// init_log_config:
// ---------------------------------------------------------------------------
fn init_log_config() -> String {
    HELLO_DIRS.config_dir.clone() + LOG4RS_CONFIG_FILE
}

// ***************************************************************************
//                             Parms Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// get_parms:
// ---------------------------------------------------------------------------
/** Retrieve the application parameters from the configuration file in the
 * config data directory.  If the file doesn't exist, default values are used.
 */
fn get_parms() -> Result<Parms> {
    // Get the config file path from its data directory.
    let config_file = HELLO_DIRS.config_dir.clone() + HELLO_CONFIG_FILE;

    // Read the configuration file.
    let config_file_abs = get_absolute_path(&config_file);
    info!("{}", Errors::ReadingConfigFile(config_file_abs.clone()));
    let contents = match fs::read_to_string(&config_file_abs) {
        Ok(c) => c,
        Err(_) => {
            println!("Unable to read configuration at {}. Using default values.", config_file);
            return Ok(Parms { config_file: Default::default(), config: Config::new() });
        }
    };

    // Parse the toml configuration.
    let config : Config = match toml::from_str(&contents) {
        Ok(c)  => c,
        Err(e) => {
            let msg = format!("{}\n   {}", Errors::TOMLParseError(config_file_abs), e);
            error!("{}", msg);
            return Result::Err(anyhow!(msg));
        }
    };

    Ok(Parms { config_file: config_file_abs, config })
}

// ***************************************************************************
//                             Config Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// init_runtime_context:
// ---------------------------------------------------------------------------
pub fn init_runtime_context() -> RuntimeCtx {
    // If this fails the application aborts.
    let parms = get_parms().expect("FAILED to read configuration file.");
    RuntimeCtx { parms, args: &HELLO_ARGS, dirs: &HELLO_DIRS }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use crate::utils::config::Config;

    #[test]
    fn print_config() {
        println!("{:?}", Config::new());
    }

    #[test]
    fn default_config_values() {
        let config = Config::new();
        assert_eq!(config.http_port, 35000);
        assert_eq!(config.http_addr, "http://localhost");
        assert!(config.www_dir.is_none());
    }

    #[test]
    fn parse_toml_config() {
        let toml_str = r#"
            title = "Hello Server"
            http_addr = "http://example.com"
            http_port = 8080
        "#;
        let config: Config = toml::from_str(toml_str).expect("toml should parse");
        assert_eq!(config.http_addr, "http://example.com");
        assert_eq!(config.http_port, 8080);
        assert!(config.www_dir.is_none());
    }
}
