//! Tea Shop API server
//!
//! REST back end of the tea shop: storefront catalog, cart and checkout,
//! order tracking, blog and landing content, plus the back office
//! (dashboard, discounts, shipping, company info, user management).
//!
//! # Module layout
//!
//! ```text
//! tea-server/src/
//! ├── core/        # config, state, server, errors
//! ├── auth/        # JWT, argon2, permissions, rate limiting
//! ├── db/          # SQLite pool, migrations, repositories
//! ├── pricing/     # discount and shipping rules
//! ├── orders/      # checkout and order lifecycle
//! ├── dashboard/   # period comparisons and charts
//! ├── api/         # HTTP handlers, one folder per resource
//! ├── routes/      # router assembly and HTTP middleware
//! └── utils/       # errors, logging, validation, money
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod dashboard;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod routes;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use routes::build_app;
pub use utils::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
  _____                ____  _
 |_   _|__  __ _      / ___|| |__   ___  _ __
   | |/ _ \/ _` |_____\___ \| '_ \ / _ \| '_ \
   | |  __/ (_| |_____|___) | | | | (_) | |_) |
   |_|\___|\__,_|     |____/|_| |_|\___/| .__/
                                        |_|
    "#
    );
}
