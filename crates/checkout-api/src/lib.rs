//! # checkout-api
//!
//! HTTP API layer for cart-checkout-rs.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/stripe/create-session` | Create checkout session |
//! | GET | `/order/success` | Success landing page |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, CREATE_SESSION_PATH};
pub use state::{AppConfig, AppState};
