pub mod config;
pub mod database;
pub mod dto;
pub mod email;
pub mod error;
pub mod media;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::Config;
use crate::email::Mailer;
use crate::error::{Error, Result};
use crate::media::MediaStore;
use crate::services::{
    hiring_service::HiringService, notification_service::NotificationService,
    principal_service::PrincipalService, submission_service::SubmissionService,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub mailer: Mailer,
    pub media: MediaStore,
    pub principal_service: PrincipalService,
    pub hiring_service: HiringService,
    pub submission_service: SubmissionService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Result<Self> {
        let mailer = Mailer::from_config(&config)
            .map_err(|e| Error::Config(format!("Mail transport setup failed: {}", e)))?;
        let media = MediaStore::new(config.uploads_dir.clone(), config.public_base_url.clone());

        let principal_service = PrincipalService::new(pool.clone());
        let hiring_service = HiringService::new(pool.clone());
        let submission_service = SubmissionService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());

        Ok(Self {
            pool,
            config: Arc::new(config),
            mailer,
            media,
            principal_service,
            hiring_service,
            submission_service,
            notification_service,
        })
    }
}
