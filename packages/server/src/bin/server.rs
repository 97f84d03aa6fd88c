//! Watch-together session server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sajiki-server
//! cargo run --bin sajiki-server -- --host 127.0.0.1 --port 8080
//! PORT=8080 cargo run --bin sajiki-server
//! ```

use std::sync::Arc;

use clap::Parser;
use sajiki_server::{bootstrap::build_app_state, ui::Server};
use sajiki_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sajiki-server")]
#[command(about = "Watch-together session server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = Server::new(build_app_state(Arc::new(SystemClock)));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
