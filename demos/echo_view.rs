//! Echo View - newline-delimited JSON requests on stdin.
//!
//! This example demonstrates:
//! - Declaring a view type with the builder
//! - Turning it into an endpoint with `as_view`
//! - Reporting dispatch failures with their status hints
//!
//! # Running
//!
//! ```text
//! $ printf '%s\n' '{"method": " GET ", "text": "hi"}' '{"method": 42}' \
//!     | RUST_LOG=debug cargo run --example echo_view
//! {"status":200,"data":{"echo":{"text":"hi"},"visits":1}}
//! {"status":400,"detail":"Method name must be a string, found number"}
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use verbview::stdio::write_json_line;
use verbview::{Args, JsonCodec, ViewDescriptor};

/// State for one request.
struct EchoView {
    visits: Arc<AtomicUsize>,
}

impl EchoView {
    fn visit(&self) -> usize {
        self.visits.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries responses only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let descriptor = Arc::new(
        ViewDescriptor::<EchoView, Value>::builder("echo")
            .handle("get", |view, req, _args| {
                json!({"echo": req, "visits": view.visit()})
            })
            .handle("post", |view, req, args| {
                json!({"created": req, "args": args.positional, "visits": view.visit()})
            })
            .build(),
    );

    let visits = Arc::new(AtomicUsize::new(0));
    let endpoint = descriptor.as_view("echo", move || EchoView {
        visits: visits.clone(),
    });
    tracing::info!(
        "Serving view {} with methods {:?}",
        endpoint.name(),
        endpoint.supported_methods()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match JsonCodec::decode_request(line.as_bytes()) {
            Ok(mut request) => match endpoint.call(&mut request, &Args::new()) {
                Ok(data) => json!({"status": 200, "data": data}),
                Err(e) => json!({"status": e.status_hint(), "detail": e.to_string()}),
            },
            Err(e) => json!({"status": 400, "detail": e.to_string()}),
        };

        write_stdout_json(&response)?;
    }

    Ok(())
}

/// Write one JSON response line to stdout.
fn write_stdout_json<T: Serialize>(value: &T) -> verbview::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_json_line(&mut handle, value)
}
