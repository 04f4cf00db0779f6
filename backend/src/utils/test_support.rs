//! Shared fixtures for the in-crate tests.

use crate::auth::models::SignupRequest;
use crate::config::Config;
use crate::database;
use crate::repositories::user_repository::UserRepository;
use crate::services::account_service::AccountService;
use crate::services::admin_service::AdminService;
use crate::services::credential_service::CredentialService;
use crate::utils::uploads::{ImageStore, ImageUpload};
use axum::Router;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use std::path::PathBuf;
use tempfile::TempDir;

pub const TEST_PASSWORD: &str = "pw123456";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: "test-secret".to_string(),
        bcrypt_cost: 4,
        server_port: 0,
        upload_dir: PathBuf::from("uploads"),
        max_upload_bytes: 1024 * 1024,
        allow_admin_signup: true,
    }
}

pub fn signup_request(name: &str, email: &str, phone_number: &str) -> SignupRequest {
    SignupRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        phone_number: phone_number.to_string(),
    }
}

pub fn png_upload() -> ImageUpload {
    ImageUpload {
        file_name: Some("avatar.png".to_string()),
        content_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
    }
}

/// In-memory database, services and a throwaway upload directory.
pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub credentials: CredentialService,
    pub images: ImageStore,
    _upload_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("create upload dir");
        let mut config = test_config();
        config.upload_dir = upload_dir.path().to_path_buf();

        // A single connection that never recycles keeps the in-memory database alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(&config.database_url)
            .await
            .expect("open in-memory database");
        database::migrate(&pool).await.expect("run migrations");

        Self {
            credentials: CredentialService::new(&config),
            images: ImageStore::new(&config.upload_dir),
            pool,
            config,
            _upload_dir: upload_dir,
        }
    }

    pub fn account_service(&self) -> AccountService<'_> {
        AccountService::new(&self.pool, &self.credentials, &self.images)
    }

    pub fn admin_service(&self) -> AdminService<'_> {
        AdminService::new(
            &self.pool,
            &self.credentials,
            &self.images,
            self.config.allow_admin_signup,
        )
    }

    pub fn router(&self) -> Router {
        crate::api::router(self.pool.clone(), &self.config)
    }

    pub async fn user_count(&self) -> i64 {
        UserRepository::new(&self.pool)
            .count_users()
            .await
            .expect("count users")
    }
}
