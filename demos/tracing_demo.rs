//! Demonstrates tracing integration with chain evaluation
//!
//! Run with: cargo run --example tracing_demo --features tracing

use std::time::Duration;

use serde_json::json;
use typs::{typs, Rejection, Subject, TypeTree};

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    tracing::info!("Starting tracing demo");

    // A synchronous failure is traced where the chain short-circuits
    let port = typs().integer().positive();
    tracing::info!("port 8080 checks: {:?}", port.check_on(8080));
    tracing::info!("port -1 checks: {:?}", port.check_on(-1));

    // A deferred step is logged when evaluation becomes pending
    let user = TypeTree::fields([
        ("name", typs().string().satisfies_async(lookup).into()),
        ("age", typs().integer().positive().into()),
    ]);
    let verdict = typs!(json!({"name": "ada", "age": 36})).is(user).await;
    tracing::info!("user verdict: {:?}", verdict);

    // A rejected lookup terminates the chain
    let verdict = typs!("mallory").satisfies_async(lookup).check().await;
    match verdict {
        Ok(valid) => tracing::info!("lookup completed: {}", valid),
        Err(e) => tracing::error!("lookup failed: {}", e),
    }
}

fn lookup(subject: &Subject) -> impl std::future::Future<Output = Result<bool, Rejection>> {
    let name = subject.as_value().and_then(|v| v.as_str()).map(str::to_owned);
    async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        match name.as_deref() {
            Some("mallory") => Err(Rejection::msg("directory refused the lookup")),
            Some(_) => Ok(true),
            None => Ok(false),
        }
    }
}
