//! User management service
//!
//! Credential verification only; sessions and tokens are the caller's
//! concern.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;
use validator::Validate;

use crate::domain::{DomainError, DomainResult, Operation, Role, User};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::infrastructure::database::entities::user;

#[derive(Debug, Clone, Validate)]
pub struct NewUserInput {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "full name is required"))]
    pub full_name: String,
    pub role: Role,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

pub struct IdentityService {
    db: DatabaseConnection,
}

impl IdentityService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a staff account. Admin only.
    pub async fn create_user(&self, input: NewUserInput, actor: &User) -> DomainResult<User> {
        actor.require(Operation::ManageUsers)?;
        input
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        if self.find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already exists".into()));
        }

        let password_hash = hash_password(&input.password)?;

        let model = user::ActiveModel {
            username: Set(input.username),
            password_hash: Set(password_hash),
            role: Set(input.role.into()),
            full_name: Set(input.full_name),
            active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(user_id = model.id, username = %model.username, role = %input.role, "user created");
        Ok(model.into())
    }

    /// Verify username + password. The hash never leaves this service.
    pub async fn authenticate(&self, username: &str, password: &str) -> DomainResult<User> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        let Some(model) = model else {
            return Err(DomainError::Authorization("Invalid credentials".into()));
        };

        if !model.active {
            return Err(DomainError::Authorization("Account is disabled".into()));
        }

        let valid = verify_password(password, &model.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Authorization("Invalid credentials".into()));
        }

        Ok(model.into())
    }

    /// Activate or deactivate an account. Admin only; an admin cannot
    /// deactivate their own account.
    pub async fn set_active(&self, user_id: i32, active: bool, actor: &User) -> DomainResult<User> {
        actor.require(Operation::ManageUsers)?;
        if user_id == actor.id && !active {
            return Err(DomainError::Precondition(
                "cannot deactivate your own account".into(),
            ));
        }

        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let username = model.username.clone();
        let mut active_model: user::ActiveModel = model.into();
        active_model.active = Set(active);
        let updated = active_model.update(&self.db).await?;

        info!(user_id, username = %username, active, "user active flag changed");
        Ok(updated.into())
    }

    pub async fn get(&self, user_id: i32) -> DomainResult<User> {
        let model = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;
        Ok(model.into())
    }

    pub async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    pub async fn list(&self) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
