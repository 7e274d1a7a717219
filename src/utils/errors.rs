#![forbid(unsafe_code)]

use thiserror::Error;

/// Error enumerates the errors returned by this application.
#[derive(Error, Debug)]
pub enum Errors {
    /// Input parameter logging.
    #[error("hello_server input parameters:\n{}", .0)]
    InputParms(String),

    /// Inaccessible logger configuration file.
    #[error("Unable to access the Log4rs configuration file: {}", .0)]
    Log4rsInitialization(String),

    #[error("Reading application configuration file: {}", .0)]
    ReadingConfigFile(String),

    #[error("Unable to parse TOML file: {}", .0)]
    TOMLParseError(String),
}

#[cfg(test)]
mod tests {
    use super::Errors;

    #[test]
    fn messages_include_offending_path() {
        let e = Errors::ReadingConfigFile("/tmp/hello.toml".to_string());
        assert!(e.to_string().contains("/tmp/hello.toml"));

        let e = Errors::TOMLParseError("/tmp/hello.toml".to_string());
        assert!(e.to_string().contains("/tmp/hello.toml"));
    }
}
