mod config;
mod error;
mod voting;
mod web;

use dotenvy::dotenv;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    web::setup().await;
}
