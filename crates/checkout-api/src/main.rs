//! # Cart Checkout
//!
//! Cart-to-Stripe checkout session broker.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export SITE_URL=http://localhost:3000
//!
//! # Run the server (LOG_FORMAT=json for structured logs)
//! cart-checkout
//! ```

use checkout_api::{routes, state::AppState, CREATE_SESSION_PATH};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.broker.provider_name());
    info!("Success redirect: {}", state.broker.urls().success_url());

    let is_prod = state.config.is_production();
    let app = routes::create_router(state);

    info!("Cart checkout listening on http://{}", addr);
    if !is_prod {
        info!("Checkout: POST http://{}{}", addr, CREATE_SESSION_PATH);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}
