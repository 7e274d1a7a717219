#![forbid(unsafe_code)]

use std::collections::HashMap;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// Element ids of the page the handlers read from and write to.  These mirror
// the ids used in the bundled web page (www/index.html).
pub const NAME_INPUT           : &str = "name";
pub const ECHO_INPUT           : &str = "echo";
pub const RESPONSE_OUTPUT      : &str = "response";
pub const ECHO_RESPONSE_OUTPUT : &str = "echoResponse";

// Default greeting target used when the name field is empty or missing.
pub const FALLBACK_NAME        : &str = "Mundo";

// Fixed localized string shown for any request failure.
pub const CONNECTION_ERROR     : &str = "Error de conexión";

// ***************************************************************************
//                                  Traits
// ***************************************************************************
/** The rendering surface the handlers operate on.  Reads input field values
 * and writes result text into output elements.  Whichever text was last
 * written to an output is what's shown; success and error text are mutually
 * exclusive.
 */
pub trait Page {
    /// Current value of an input field, None if the field is absent.
    fn input_value(&self, id: &str) -> Option<String>;

    /// Replace the text of an output element.
    fn set_output(&mut self, id: &str, text: &str);
}

// ***************************************************************************
//                               ConsolePage
// ***************************************************************************
/** Page implementation for the command line client.  Inputs are seeded from
 * command line arguments and output writes are printed to stdout.
 */
pub struct ConsolePage {
    inputs: HashMap<String, String>,
}

impl ConsolePage {
    pub fn new() -> Self {
        Self { inputs: HashMap::new() }
    }

    /// Seed an input field value.
    pub fn set_input(&mut self, id: &str, value: &str) {
        self.inputs.insert(id.to_string(), value.to_string());
    }
}

impl Default for ConsolePage {
    fn default() -> Self {
        Self::new()
    }
}

impl Page for ConsolePage {
    fn input_value(&self, id: &str) -> Option<String> {
        self.inputs.get(id).cloned()
    }

    fn set_output(&mut self, _id: &str, text: &str) {
        println!("{}", text);
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::{ConsolePage, Page, NAME_INPUT};

    #[test]
    fn console_page_returns_seeded_input() {
        let mut page = ConsolePage::new();
        page.set_input(NAME_INPUT, "Ada");
        assert_eq!(page.input_value(NAME_INPUT), Some("Ada".to_string()));
    }

    #[test]
    fn console_page_missing_input_is_none() {
        let page = ConsolePage::new();
        assert_eq!(page.input_value(NAME_INPUT), None);
    }
}
