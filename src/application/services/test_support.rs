//! Shared helpers for service tests: in-memory database plus one seeded user
//! per role.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use crate::domain::{Role, User};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::Migrator;

pub async fn test_db() -> DatabaseConnection {
    // A single connection so every query sees the same in-memory database.
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn seed_user(db: &DatabaseConnection, username: &str, role: Role) -> User {
    // Low bcrypt cost keeps the test suite fast.
    let hash = bcrypt::hash("changeme1", 4).unwrap();
    let model = user::ActiveModel {
        username: Set(username.to_string()),
        password_hash: Set(hash),
        role: Set(role.into()),
        full_name: Set(username.to_string()),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();
    model.into()
}

pub struct Fixture {
    pub db: DatabaseConnection,
    pub admin: User,
    pub staff: User,
    pub technician: User,
}

pub async fn fixture() -> Fixture {
    let db = test_db().await;
    let admin = seed_user(&db, "admin", Role::Admin).await;
    let staff = seed_user(&db, "staff", Role::ShopStaff).await;
    let technician = seed_user(&db, "tech", Role::Technician).await;
    Fixture {
        db,
        admin,
        staff,
        technician,
    }
}
