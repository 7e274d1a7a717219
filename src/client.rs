#![forbid(unsafe_code)]

pub mod echo;
pub mod greeting;
pub mod page;

// ***************************************************************************
//                               Test Helpers
// ***************************************************************************
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;

    use poem::listener::{Acceptor, Listener, TcpListener};
    use poem::Route;

    use super::page::Page;

    // -----------------------------------------------------------------------
    // FakePage:
    // -----------------------------------------------------------------------
    /// In-memory page double that records output writes.
    #[derive(Default)]
    pub struct FakePage {
        inputs: HashMap<String, String>,
        outputs: HashMap<String, String>,
    }

    impl FakePage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_input(mut self, id: &str, value: &str) -> Self {
            self.inputs.insert(id.to_string(), value.to_string());
            self
        }

        pub fn output(&self, id: &str) -> Option<&str> {
            self.outputs.get(id).map(|s| s.as_str())
        }
    }

    impl Page for FakePage {
        fn input_value(&self, id: &str) -> Option<String> {
            self.inputs.get(id).cloned()
        }

        fn set_output(&mut self, id: &str, text: &str) {
            self.outputs.insert(id.to_string(), text.to_string());
        }
    }

    // -----------------------------------------------------------------------
    // spawn_route:
    // -----------------------------------------------------------------------
    /// Serve the given routes on an ephemeral port and return the base URL.
    pub async fn spawn_route(app: Route) -> String {
        let acceptor = TcpListener::bind("127.0.0.1:0")
            .into_acceptor()
            .await
            .expect("bind ephemeral port");
        let port = acceptor
            .local_addr()
            .remove(0)
            .as_socket_addr()
            .expect("socket address")
            .port();

        tokio::spawn(async move {
            let _ = poem::Server::new_with_acceptor(acceptor).run(app).await;
        });

        format!("http://127.0.0.1:{}", port)
    }

    // -----------------------------------------------------------------------
    // spawn_server:
    // -----------------------------------------------------------------------
    /// Start the real API on an ephemeral port and return its base URL.
    pub async fn spawn_server() -> String {
        let app = Route::new().nest("/app", crate::app::api_service("http://localhost:35000/app"));
        spawn_route(app).await
    }
}
