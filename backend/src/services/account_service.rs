//! Account business logic service.
//!
//! Handles signup, signin and the self-service profile operations. The
//! registration pipeline is shared with admin creation.

use crate::auth::models::{CredentialKind, SigninRequest, SignupRequest, UpdateProfileRequest};
use crate::database::models::{CreateUser, UpdateUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::credential_service::CredentialService;
use crate::utils::uploads::{ImageStore, ImageUpload};
use crate::utils::validation::OrderedValidate;
use sqlx::SqlitePool;
use uuid::Uuid;

/// A user together with the token just issued for it.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Service layer for account operations.
pub struct AccountService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    credentials: &'a CredentialService,
    images: &'a ImageStore,
}

impl<'a> AccountService<'a> {
    /// Creates a new AccountService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `credentials` - Password hashing and token issuing
    /// * `images` - Where uploaded profile images are written
    pub fn new(
        pool: &'a SqlitePool,
        credentials: &'a CredentialService,
        images: &'a ImageStore,
    ) -> Self {
        Self {
            pool,
            credentials,
            images,
        }
    }

    /// Registers a regular (non-admin) user.
    pub async fn signup(
        &self,
        request: SignupRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<AuthenticatedUser> {
        self.register(request, image, false).await
    }

    /// Registration pipeline shared by signup and admin creation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - The first violated validation rule
    /// - `DuplicateEmail` when the email is taken (checked before the phone number)
    /// - `DuplicatePhone` when the phone number is taken
    pub(crate) async fn register(
        &self,
        request: SignupRequest,
        image: Option<ImageUpload>,
        is_admin: bool,
    ) -> ServiceResult<AuthenticatedUser> {
        request.validate_first()?;
        if let Some(image) = &image {
            image.ensure_image()?;
        }

        let repo = UserRepository::new(self.pool);
        let email = request.email.to_lowercase();

        let (email_taken, phone_taken) = futures::try_join!(
            repo.email_exists(&email),
            repo.phone_number_exists(&request.phone_number)
        )?;
        if email_taken {
            return Err(ServiceError::DuplicateEmail);
        }
        if phone_taken {
            return Err(ServiceError::DuplicatePhone);
        }

        let password_hash = self.credentials.hash(&request.password).await?;

        let profile_img = match &image {
            Some(image) => Some(self.images.save(image).await?),
            None => None,
        };

        let data = CreateUser {
            id: Uuid::now_v7().to_string(),
            name: request.name.trim().to_string(),
            email,
            phone_number: request.phone_number,
            password_hash,
            profile_img: profile_img.clone(),
            is_admin,
        };

        // The UNIQUE constraints catch signups racing past the pre-check above.
        let user = match repo.create_user(data).await {
            Ok(user) => user,
            Err(error) => {
                if let Some(path) = &profile_img {
                    self.images.remove(path).await;
                }
                return Err(classify_insert_error(error));
            }
        };

        let token = self.credentials.issue_token(&user.id)?;

        tracing::info!("Created {} account {}", if is_admin { "admin" } else { "user" }, user.id);
        Ok(AuthenticatedUser { user, token })
    }

    /// Authenticates a user by email or phone number.
    ///
    /// # Returns
    /// The matching user and a fresh token
    ///
    /// # Errors
    /// - `NotFound` if no user has the credential
    /// - `InvalidCredentials` if the password does not match
    pub async fn signin(&self, request: SigninRequest) -> ServiceResult<AuthenticatedUser> {
        request.validate_first()?;

        let repo = UserRepository::new(self.pool);
        let user = match request.credential_kind() {
            CredentialKind::Email(email) => repo.get_user_by_email(email).await?,
            CredentialKind::PhoneNumber(phone_number) => {
                repo.get_user_by_phone_number(phone_number).await?
            }
        }
        .ok_or_else(|| ServiceError::not_found("User", &request.credential))?;

        if !self
            .credentials
            .verify(&request.password, &user.password_hash)
            .await?
        {
            tracing::info!("Rejected signin for user {}", user.id);
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.credentials.issue_token(&user.id)?;
        Ok(AuthenticatedUser { user, token })
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;
        Ok(user)
    }

    /// Changes the caller's own name and/or profile image.
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
        image: Option<ImageUpload>,
    ) -> ServiceResult<User> {
        self.apply_profile_changes(user_id, request, image, false)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }

    /// Partial update shared by self-service and admin edits.
    ///
    /// Only supplied fields are written. Returns `None` when no matching row
    /// exists; a stored image is removed again in that case. A replaced
    /// image is deleted once the new one is recorded.
    pub(crate) async fn apply_profile_changes(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
        image: Option<ImageUpload>,
        non_admin_only: bool,
    ) -> ServiceResult<Option<User>> {
        if let Some(image) = &image {
            image.ensure_image()?;
        }

        let repo = UserRepository::new(self.pool);
        let previous_img = match &image {
            Some(_) => repo
                .get_user_by_id(user_id)
                .await?
                .and_then(|user| user.profile_img),
            None => None,
        };

        let profile_img = match &image {
            Some(image) => Some(self.images.save(image).await?),
            None => None,
        };

        let changes = UpdateUser {
            name: request.supplied_name(),
            profile_img: profile_img.clone(),
        };

        if changes.is_empty() {
            // Nothing to write; updated_at stays as it is.
            let current = repo
                .get_user_by_id(user_id)
                .await?
                .filter(|user| !(non_admin_only && user.is_admin));
            return Ok(current);
        }

        let updated = match repo.update_user(user_id, changes, non_admin_only).await {
            Ok(updated) => updated,
            Err(error) => {
                if let Some(path) = &profile_img {
                    self.images.remove(path).await;
                }
                return Err(error.into());
            }
        };

        match (&updated, &profile_img) {
            (None, Some(new_path)) => self.images.remove(new_path).await,
            (Some(_), Some(_)) => {
                if let Some(old_path) = &previous_img {
                    self.images.remove(old_path).await;
                }
            }
            _ => {}
        }

        Ok(updated)
    }

    /// Deletes the image of a row that no longer exists.
    pub(crate) async fn discard_profile_image(&self, removed: &User) {
        if let Some(path) = &removed.profile_img {
            self.images.remove(path).await;
        }
    }

    /// Deletes the caller's account. Deleting an already removed account succeeds.
    pub async fn delete_account(&self, user_id: &str) -> ServiceResult<()> {
        let repo = UserRepository::new(self.pool);
        let removed = repo.delete_user(user_id).await?;

        if let Some(user) = &removed {
            self.discard_profile_image(user).await;
        }

        tracing::info!("Deleted account {} (existed: {})", user_id, removed.is_some());
        Ok(())
    }
}

/// Maps UNIQUE violations raised by the insert onto the duplicate errors.
fn classify_insert_error(error: anyhow::Error) -> ServiceError {
    if let Some(sqlx::Error::Database(db_error)) = error.downcast_ref::<sqlx::Error>() {
        if db_error.is_unique_violation() {
            let message = db_error.message();
            if message.contains("users.email") {
                return ServiceError::DuplicateEmail;
            }
            if message.contains("users.phone_number") {
                return ServiceError::DuplicatePhone;
            }
        }
    }
    ServiceError::from(error)
}
