//! System settings service - string key/value store
//!
//! Holds the shop name and the battery-code format. Reads are lenient
//! (missing or unparseable values fall back to defaults), writes are strict
//! (the numeric keys must parse before they are stored).

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use tracing::info;

use crate::domain::{BatteryCodeConfig, DomainError, DomainResult, Operation, User};
use crate::infrastructure::database::entities::system_setting;

pub const SHOP_NAME_KEY: &str = "shop_name";
pub const BATTERY_ID_PREFIX_KEY: &str = "battery_id_prefix";
pub const BATTERY_ID_START_KEY: &str = "battery_id_start";
pub const BATTERY_ID_PADDING_KEY: &str = "battery_id_padding";

pub const DEFAULT_SHOP_NAME: &str = "Battery Repair Service";

/// Fold the three `battery_id_*` settings into an explicit config struct.
/// Used by intake inside its own transaction, so the generator never touches
/// the settings store itself.
pub(crate) async fn load_battery_code_config<C: ConnectionTrait>(
    conn: &C,
) -> Result<BatteryCodeConfig, sea_orm::DbErr> {
    let defaults = BatteryCodeConfig::default();
    let prefix = read_setting(conn, BATTERY_ID_PREFIX_KEY)
        .await?
        .unwrap_or(defaults.prefix);
    let start = read_setting(conn, BATTERY_ID_START_KEY)
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.start);
    let padding = read_setting(conn, BATTERY_ID_PADDING_KEY)
        .await?
        .and_then(|v| v.parse().ok())
        .unwrap_or(defaults.padding);
    Ok(BatteryCodeConfig {
        prefix,
        start,
        padding,
    })
}

async fn read_setting<C: ConnectionTrait>(
    conn: &C,
    key: &str,
) -> Result<Option<String>, sea_orm::DbErr> {
    Ok(system_setting::Entity::find()
        .filter(system_setting::Column::SettingKey.eq(key))
        .one(conn)
        .await?
        .map(|s| s.setting_value))
}

pub struct SettingsService {
    db: DatabaseConnection,
}

impl SettingsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, key: &str) -> DomainResult<Option<String>> {
        Ok(read_setting(&self.db, key).await?)
    }

    /// Upsert a setting. Admin only.
    pub async fn set(&self, key: &str, value: &str, actor: &User) -> DomainResult<()> {
        actor.require(Operation::ManageSettings)?;
        if key.trim().is_empty() {
            return Err(DomainError::Validation("setting key is required".into()));
        }
        if matches!(key, BATTERY_ID_START_KEY | BATTERY_ID_PADDING_KEY)
            && value.parse::<u64>().is_err()
        {
            return Err(DomainError::Validation(format!(
                "{} must be a non-negative number",
                key
            )));
        }

        let now = Utc::now();
        let existing = system_setting::Entity::find()
            .filter(system_setting::Column::SettingKey.eq(key))
            .one(&self.db)
            .await?;

        match existing {
            Some(model) => {
                let mut active: system_setting::ActiveModel = model.into();
                active.setting_value = Set(value.to_string());
                active.updated_at = Set(now);
                active.update(&self.db).await?;
            }
            None => {
                system_setting::ActiveModel {
                    setting_key: Set(key.to_string()),
                    setting_value: Set(value.to_string()),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await?;
            }
        }

        info!(key, "setting updated");
        Ok(())
    }

    pub async fn shop_name(&self) -> DomainResult<String> {
        Ok(read_setting(&self.db, SHOP_NAME_KEY)
            .await?
            .unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()))
    }

    pub async fn battery_code_config(&self) -> DomainResult<BatteryCodeConfig> {
        Ok(load_battery_code_config(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::fixture;

    #[tokio::test]
    async fn set_upserts_and_get_reads_back() {
        let fx = fixture().await;
        let service = SettingsService::new(fx.db.clone());

        service.set(SHOP_NAME_KEY, "Volt Clinic", &fx.admin).await.unwrap();
        assert_eq!(service.shop_name().await.unwrap(), "Volt Clinic");

        service.set(SHOP_NAME_KEY, "Volt Clinic 2", &fx.admin).await.unwrap();
        assert_eq!(service.shop_name().await.unwrap(), "Volt Clinic 2");
    }

    #[tokio::test]
    async fn defaults_apply_when_nothing_is_stored() {
        let fx = fixture().await;
        let service = SettingsService::new(fx.db.clone());

        assert_eq!(service.shop_name().await.unwrap(), DEFAULT_SHOP_NAME);
        let config = service.battery_code_config().await.unwrap();
        assert_eq!(config, crate::domain::BatteryCodeConfig::default());
    }

    #[tokio::test]
    async fn code_config_folds_the_three_settings() {
        let fx = fixture().await;
        let service = SettingsService::new(fx.db.clone());

        service.set(BATTERY_ID_PREFIX_KEY, "BX", &fx.admin).await.unwrap();
        service.set(BATTERY_ID_START_KEY, "100", &fx.admin).await.unwrap();
        service.set(BATTERY_ID_PADDING_KEY, "6", &fx.admin).await.unwrap();

        let config = service.battery_code_config().await.unwrap();
        assert_eq!(config.prefix, "BX");
        assert_eq!(config.start, 100);
        assert_eq!(config.padding, 6);
    }

    #[tokio::test]
    async fn numeric_keys_reject_garbage() {
        let fx = fixture().await;
        let service = SettingsService::new(fx.db.clone());

        let err = service
            .set(BATTERY_ID_START_KEY, "ten", &fx.admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn only_admin_may_write() {
        let fx = fixture().await;
        let service = SettingsService::new(fx.db.clone());

        let err = service
            .set(SHOP_NAME_KEY, "Nope", &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));
    }
}
