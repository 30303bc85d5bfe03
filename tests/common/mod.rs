#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

use mock_server::{ACCESS_TOKEN, MockState, PASSWORD, USERNAME};
use ultradns_sdk::{Client, Config};

/// A mock API running on its own runtime in a background thread.
pub struct MockApi {
    pub state: Arc<MockState>,
    pub url: String,
}

impl MockApi {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener.set_nonblocking(true).expect("non-blocking listener");
        let url = format!("http://{}", listener.local_addr().expect("local addr"));

        let state = MockState::new();
        let server_state = state.clone();
        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .expect("mock server runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).expect("tokio listener");
                mock_server::run(listener, server_state).await.expect("mock server");
            });
        });

        Self { state, url }
    }

    /// Credentials accepted by the mock.
    pub fn config(&self) -> Config {
        Config {
            username: USERNAME.into(),
            password: PASSWORD.into(),
            host_url: self.url.clone(),
            ..Config::default()
        }
    }

    pub fn token_config(&self) -> Config {
        Config {
            token: Some(ACCESS_TOKEN.into()),
            host_url: self.url.clone(),
            ..Config::default()
        }
    }

    pub fn client(&self) -> Arc<Client> {
        Arc::new(Client::new(self.config()).expect("client against mock"))
    }
}

/// A local address nothing listens on.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
