use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;

use polyglot_core::config::CoreConfig;
use polyglot_core::protocol::{self, Session};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries responses, logs go to stderr
    let stderr_layer = fmt::layer().with_target(true).with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

fn main() {
    init_tracing();

    let config = CoreConfig::from_env();
    tracing::info!(?config, "polyglot-core starting");
    let mut session = Session::new(config);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!("failed to read request line: {e}");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let result = std::panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(&mut session, &line)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => {
                tracing::error!("request handler panicked");
                serde_json::json!({
                    "status": "error",
                    "code": "internal",
                    "message": "internal core error"
                })
                .to_string()
            }
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }

    tracing::info!("stdin closed, shutting down");
}
