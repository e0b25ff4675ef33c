//! Server state shared by all handlers

use std::sync::Arc;

use shared::models::UserRole;
use sqlx::SqlitePool;

use crate::auth::{JwtService, RateLimiter, hash_password};
use crate::core::{Config, Result, ServerError};
use crate::db::{DbService, repository::user};

/// Cloned into every request (all fields are cheap handles)
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub rate_limiter: RateLimiter,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            pool,
            jwt_service,
            rate_limiter: RateLimiter::new(),
        }
    }

    /// Open the database, run migrations and create the bootstrap admin
    pub async fn initialize(config: &Config) -> Result<Self> {
        let db = DbService::new(&config.database_url).await?;
        let state = Self::new(config.clone(), db.pool);
        state.ensure_bootstrap_admin().await?;
        Ok(state)
    }

    /// Create `ADMIN_EMAIL` as an admin account when no admin exists yet
    async fn ensure_bootstrap_admin(&self) -> Result<()> {
        let (Some(email), Some(password)) = (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        if user::count_by_role(&self.pool, UserRole::Admin).await? > 0 {
            return Ok(());
        }

        let email = email.trim().to_lowercase();
        if user::find_by_email(&self.pool, &email).await?.is_some() {
            tracing::warn!(email = %email, "Bootstrap admin email already belongs to a non-admin account");
            return Ok(());
        }

        let hash = hash_password(password)
            .map_err(|e| ServerError::Init(format!("Failed to hash admin password: {e}")))?;
        user::create(&self.pool, &email, &hash, "Administrator", None, UserRole::Admin).await?;
        tracing::info!(email = %email, "Bootstrap admin account created");
        Ok(())
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Periodic maintenance: rate limiter cleanup
    pub fn start_background_tasks(&self) {
        let limiter = self.rate_limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
            loop {
                interval.tick().await;
                limiter.cleanup().await;
            }
        });
    }
}
