use std::env;

use mock_server::{MockState, run};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let addr = env::var("MOCK_SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = TcpListener::bind(&addr).await?;
    println!("mock UltraDNS API listening on http://{}", listener.local_addr()?);
    run(listener, MockState::new()).await
}
