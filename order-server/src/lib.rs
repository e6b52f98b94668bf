//! Luwei order server
//!
//! Backend for a Taiwanese braised-snack (滷味) pre-order shop:
//!
//! - **Order intake** (`orders`): catalog-priced validation, loyalty
//!   bonus/redemption, atomic persistence
//! - **Storage** (`db`): embedded redb database with typed repositories
//! - **Broadcast** (`broadcast`): best-effort WebSocket fan-out to dashboards
//! - **HTTP API** (`api`): REST endpoints plus the viewer WebSocket
//!
//! # Module structure
//!
//! ```text
//! order-server/src/
//! ├── core/       # config, state, HTTP server
//! ├── api/        # routes and handlers
//! ├── db/         # redb store and repositories
//! ├── orders/     # pricing and the submission pipeline
//! ├── broadcast/  # realtime fan-out hub
//! └── utils/      # logging
//! ```

pub mod api;
pub mod broadcast;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

pub use broadcast::BroadcastHub;
pub use core::{Config, Server, ServerState};
pub use db::{Store, StoreError};
pub use orders::{OrderOutcome, OrderPipeline};
pub use utils::init_logger;

/// Load .env and initialize logging
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_dir.as_deref());
}
