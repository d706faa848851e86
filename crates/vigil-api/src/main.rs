//! Binary entrypoint for the Vigil API server.
use vigil_api::run;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    // Default listen address can be overridden with VIGIL_ADDR
    let addr = std::env::var("VIGIL_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    run(&addr).await;
}
