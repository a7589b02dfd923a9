use anyhow::Result;
use clap::Parser;
use log::{error, LevelFilter};
use server::{start_server, MemoryStore, StoreContext};
use shared::security::rate_limit_middleware::{
    RateLimiter, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_SECS,
};
use std::sync::Arc;

#[derive(Parser)]
struct Args {
    /// Bind address
    #[arg(short = 'e', long, default_value = "0.0.0.0")]
    host: String,

    /// Port
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,

    /// Rate limit window in seconds
    #[arg(long, default_value_t = DEFAULT_WINDOW_SECS)]
    rate_limit_window: u64,

    /// Maximum requests per client per window
    #[arg(long, default_value_t = DEFAULT_MAX_REQUESTS)]
    rate_limit_max: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp(None)
        .init();
    let args = Args::parse();

    let store = Arc::new(MemoryStore::new());
    let store_context = Arc::new(StoreContext::new(store));
    let rate_limiter = RateLimiter::new(args.rate_limit_window, args.rate_limit_max);

    tokio::select! {
        res = start_server(&args.host, args.port, store_context, rate_limiter) => {
            if let Err(e) = res {
                error!("Server error: {e}");
                std::process::exit(1);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            error!("Shutdown signal received");
        }
    }
    Ok(())
}
