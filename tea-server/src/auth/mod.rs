//! Authentication and authorization
//!
//! - [`JwtService`] - token issue / validation
//! - [`CurrentUser`] - user context injected by [`require_auth`]
//! - [`require_permission`] / [`require_admin`] - route group guards
//! - [`RateLimiter`] - login / registration throttling

pub mod cookie;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod permissions;
pub mod rate_limit;

pub use extractor::MaybeUser;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{is_public_route, require_admin, require_auth, require_permission};
pub use password::{hash_password, verify_password};
pub use rate_limit::{RateLimiter, login_rate_limit, register_rate_limit};
