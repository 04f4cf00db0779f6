//! Admin business logic service.
//!
//! Every privileged operation takes an `AdminCaller`, which can only be
//! obtained from `authorize_admin`. The admin flag is read from the stored
//! record on every request; nothing in the token is trusted for the role.

use crate::auth::models::{SignupRequest, UpdateProfileRequest};
use crate::database::models::User;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::account_service::{AccountService, AuthenticatedUser};
use crate::services::credential_service::CredentialService;
use crate::utils::uploads::{ImageStore, ImageUpload};
use sqlx::SqlitePool;

pub const NOT_ADMIN_MESSAGE: &str = "You Cannot Access This Data. You Are Not Admin";

/// Proof that the caller's stored record has the admin flag set.
#[derive(Debug, Clone)]
pub struct AdminCaller {
    user: User,
}

impl AdminCaller {
    pub fn id(&self) -> &str {
        &self.user.id
    }
}

/// Looks up the caller and checks the admin flag.
///
/// # Errors
/// Returns `ServiceError::Forbidden` if the caller no longer exists or is not an admin
pub async fn authorize_admin(pool: &SqlitePool, caller_id: &str) -> ServiceResult<AdminCaller> {
    let repo = UserRepository::new(pool);

    match repo.get_user_by_id(caller_id).await? {
        Some(user) if user.is_admin => Ok(AdminCaller { user }),
        _ => {
            tracing::warn!("Denied admin access to {}", caller_id);
            Err(ServiceError::forbidden(NOT_ADMIN_MESSAGE))
        }
    }
}

/// Service layer for admin operations.
pub struct AdminService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    accounts: AccountService<'a>,
    allow_admin_signup: bool,
}

impl<'a> AdminService<'a> {
    /// Creates a new AdminService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `credentials` - Password hashing and token issuing
    /// * `images` - Where uploaded profile images are written
    /// * `allow_admin_signup` - Whether unauthenticated admin creation is open
    pub fn new(
        pool: &'a SqlitePool,
        credentials: &'a CredentialService,
        images: &'a ImageStore,
        allow_admin_signup: bool,
    ) -> Self {
        Self {
            pool,
            accounts: AccountService::new(pool, credentials, images),
            allow_admin_signup,
        }
    }

    /// Creates an admin account through the regular registration pipeline.
    ///
    /// # Errors
    /// Same as signup, plus `Forbidden` when admin signup is disabled
    pub async fn create_admin(
        &self,
        request: SignupRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<AuthenticatedUser> {
        if !self.allow_admin_signup {
            return Err(ServiceError::forbidden("Admin signup is disabled"));
        }
        self.accounts.register(request, image, true).await
    }

    /// Lists every non-admin user.
    pub async fn list_users(&self, caller: &AdminCaller) -> ServiceResult<Vec<User>> {
        let repo = UserRepository::new(self.pool);
        let users = repo.get_non_admin_users().await?;

        tracing::debug!("Admin {} listed {} users", caller.id(), users.len());
        Ok(users)
    }

    /// Changes a non-admin user's name and/or profile image.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if no non-admin user has `user_id`
    pub async fn update_user(
        &self,
        caller: &AdminCaller,
        user_id: &str,
        request: UpdateProfileRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<User> {
        let user = self
            .accounts
            .apply_profile_changes(user_id, request, image, true)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))?;

        tracing::info!("Admin {} updated user {}", caller.id(), user_id);
        Ok(user)
    }

    /// Deletes a non-admin user. Deleting a missing user succeeds.
    pub async fn delete_user(&self, caller: &AdminCaller, user_id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        let removed = repo.delete_non_admin_user(user_id).await?;

        if let Some(user) = &removed {
            self.accounts.discard_profile_image(user).await;
        }

        tracing::info!(
            "Admin {} deleted user {} (existed: {})",
            caller.id(),
            user_id,
            removed.is_some()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_support::{TestContext, png_upload, signup_request};

    async fn seed(ctx: &TestContext) -> (AdminCaller, User) {
        let admin = ctx
            .admin_service()
            .create_admin(signup_request("Root", "root@x.com", "9999"), None)
            .await
            .unwrap();
        let user = ctx
            .account_service()
            .signup(signup_request("A", "a@x.com", "1111"), None)
            .await
            .unwrap();

        let caller = authorize_admin(&ctx.pool, &admin.user.id).await.unwrap();
        (caller, user.user)
    }

    #[tokio::test]
    async fn test_create_admin_sets_flag() {
        let ctx = TestContext::new().await;

        let created = ctx
            .admin_service()
            .create_admin(signup_request("Root", "root@x.com", "9999"), None)
            .await
            .unwrap();

        assert!(created.user.is_admin);
        assert_eq!(created.user.profile_img, None);
        let claims = ctx.credentials.verify_token(&created.token).unwrap();
        assert_eq!(claims.user_id(), created.user.id);
    }

    #[tokio::test]
    async fn test_create_admin_shares_uniqueness_rules() {
        let ctx = TestContext::new().await;
        seed(&ctx).await;

        let result = ctx
            .admin_service()
            .create_admin(signup_request("Other", "a@x.com", "5555"), None)
            .await;

        assert!(matches!(result, Err(ServiceError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_create_admin_can_be_disabled() {
        let ctx = TestContext::new().await;
        let service = AdminService::new(&ctx.pool, &ctx.credentials, &ctx.images, false);

        let result = service
            .create_admin(signup_request("Root", "root@x.com", "9999"), None)
            .await;

        assert!(matches!(result, Err(ServiceError::Forbidden { .. })));
        assert_eq!(ctx.user_count().await, 0);
    }

    #[tokio::test]
    async fn test_authorize_rejects_regular_and_missing_users() {
        let ctx = TestContext::new().await;
        let (_, user) = seed(&ctx).await;

        assert!(matches!(
            authorize_admin(&ctx.pool, &user.id).await,
            Err(ServiceError::Forbidden { .. })
        ));
        assert!(matches!(
            authorize_admin(&ctx.pool, "no-such-user").await,
            Err(ServiceError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_users_excludes_admins() {
        let ctx = TestContext::new().await;
        let (caller, user) = seed(&ctx).await;

        let users = ctx.admin_service().list_users(&caller).await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, user.id);
        assert!(users.iter().all(|u| !u.is_admin));
    }

    #[tokio::test]
    async fn test_update_user_is_partial() {
        let ctx = TestContext::new().await;
        let (caller, user) = seed(&ctx).await;
        let service = ctx.admin_service();

        let renamed = service
            .update_user(
                &caller,
                &user.id,
                UpdateProfileRequest {
                    name: Some("Renamed".to_string()),
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(renamed.name, "Renamed");
        assert_eq!(renamed.email, "a@x.com");

        let with_image = service
            .update_user(
                &caller,
                &user.id,
                UpdateProfileRequest::default(),
                Some(png_upload()),
            )
            .await
            .unwrap();
        assert_eq!(with_image.name, "Renamed");
        assert!(with_image.profile_img.is_some());
        assert!(!with_image.is_admin);
    }

    #[tokio::test]
    async fn test_update_missing_or_admin_target_is_not_found() {
        let ctx = TestContext::new().await;
        let (caller, _) = seed(&ctx).await;
        let service = ctx.admin_service();
        let rename = || UpdateProfileRequest {
            name: Some("X".to_string()),
        };

        let missing = service.update_user(&caller, "missing", rename(), None).await;
        assert!(matches!(missing, Err(ServiceError::NotFound { .. })));

        let admin_target = service
            .update_user(&caller, caller.id(), rename(), None)
            .await;
        assert!(matches!(admin_target, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_admin_image_changes_clean_up_files() {
        let ctx = TestContext::new().await;
        let (caller, user) = seed(&ctx).await;
        let service = ctx.admin_service();

        let first = service
            .update_user(&caller, &user.id, UpdateProfileRequest::default(), Some(png_upload()))
            .await
            .unwrap()
            .profile_img
            .unwrap();
        let second = service
            .update_user(&caller, &user.id, UpdateProfileRequest::default(), Some(png_upload()))
            .await
            .unwrap()
            .profile_img
            .unwrap();
        assert!(tokio::fs::metadata(&first).await.is_err());
        assert!(tokio::fs::metadata(&second).await.is_ok());

        service.delete_user(&caller, &user.id).await.unwrap();
        assert!(tokio::fs::metadata(&second).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_user_is_idempotent_and_spares_admins() {
        let ctx = TestContext::new().await;
        let (caller, user) = seed(&ctx).await;
        let service = ctx.admin_service();

        service.delete_user(&caller, &user.id).await.unwrap();
        service.delete_user(&caller, &user.id).await.unwrap();
        service.delete_user(&caller, caller.id()).await.unwrap();

        assert_eq!(ctx.user_count().await, 1);
        assert!(authorize_admin(&ctx.pool, caller.id()).await.is_ok());
    }
}
