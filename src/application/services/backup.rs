//! Backup and restore service
//!
//! Exports the core tables (users, customers, batteries, status history,
//! settings) into a flat JSON snapshot and restores one in a single database
//! transaction. Restore is destructive: it wipes the core tables, rebuilds
//! them from the snapshot and remaps every foreign key through an old-id to
//! new-id map. Password hashes never leave the database; restored accounts
//! come back with a placeholder password that must be rotated.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::{info, warn};

use crate::domain::{
    BatteryRecord, BatteryStatus, CustomerRecord, DomainError, DomainResult, Operation, Role,
    SettingRecord, Snapshot, StatusHistoryRecord, User, UserRecord,
};
use crate::infrastructure::crypto::hash_password;
use crate::infrastructure::database::entities::{
    battery, customer, material_usage, staff_note, status_history, stock_transaction,
    system_setting, user,
};

/// Token the caller must echo back before a restore is allowed to run.
pub const RESTORE_CONFIRMATION: &str = "CONFIRM";

/// Password assigned to every restored account except the acting admin's.
const PLACEHOLDER_PASSWORD: &str = "password123";

/// What a restore actually wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreSummary {
    pub users: usize,
    pub customers: usize,
    pub batteries: usize,
    pub status_history: usize,
    pub settings: usize,
    /// History rows whose battery id had no match in the snapshot.
    pub skipped_history: usize,
}

pub struct BackupService {
    db: DatabaseConnection,
}

impl BackupService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Serialize the core tables into a snapshot. Ids are included so restore
    /// can stitch foreign keys back together; password hashes are not.
    pub async fn export_snapshot(&self, actor: &User) -> DomainResult<Snapshot> {
        actor.require(Operation::ExportSnapshot)?;

        let users = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|u| UserRecord {
                username: u.username,
                full_name: u.full_name,
                role: Role::from(u.role).as_str().to_string(),
                created_at: Some(u.created_at.to_rfc3339()),
                is_active: u.active,
            })
            .collect();

        let customers = customer::Entity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|c| CustomerRecord {
                id: c.id,
                name: c.name,
                mobile: c.mobile,
                created_at: Some(c.created_at.to_rfc3339()),
            })
            .collect();

        let batteries = battery::Entity::find()
            .order_by_asc(battery::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|b| BatteryRecord {
                id: b.id,
                battery_id: b.code,
                customer_id: b.customer_id,
                battery_type: b.battery_type,
                voltage: b.voltage,
                capacity: b.capacity,
                status: BatteryStatus::from(b.status).as_str().to_string(),
                inward_date: Some(b.inward_date.to_rfc3339()),
                service_price: b.service_price,
            })
            .collect();

        let status_history = status_history::Entity::find()
            .order_by_asc(status_history::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|h| StatusHistoryRecord {
                id: h.id,
                battery_id: h.battery_id,
                status: BatteryStatus::from(h.status).as_str().to_string(),
                comments: h.comments,
                updated_by: h.updated_by,
                updated_at: Some(h.updated_at.to_rfc3339()),
            })
            .collect();

        let settings = system_setting::Entity::find()
            .order_by_asc(system_setting::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| SettingRecord {
                setting_key: s.setting_key,
                setting_value: s.setting_value,
                updated_at: Some(s.updated_at.to_rfc3339()),
            })
            .collect();

        info!(by = %actor.username, "snapshot exported");
        Ok(Snapshot {
            timestamp: Utc::now().to_rfc3339(),
            users,
            customers,
            batteries,
            status_history,
            settings,
        })
    }

    /// Replace the core tables with the snapshot's contents. The caller must
    /// pass [`RESTORE_CONFIRMATION`] verbatim. Everything runs in one
    /// transaction: a bad customer reference, unknown status or unparseable
    /// timestamp aborts the whole restore. History rows pointing at a battery
    /// the snapshot does not contain are skipped, not fatal.
    ///
    /// The acting admin's own account is left untouched so the session that
    /// ran the restore survives it. The inventory catalog and stock ledger
    /// are outside the snapshot and survive too; surviving ledger rows are
    /// re-attributed to the acting admin because their authors are replaced.
    pub async fn restore_snapshot(
        &self,
        snapshot: &Snapshot,
        confirmation: &str,
        actor: &User,
    ) -> DomainResult<RestoreSummary> {
        actor.require(Operation::RestoreSnapshot)?;
        if confirmation != RESTORE_CONFIRMATION {
            return Err(DomainError::Validation(format!(
                "restore requires the confirmation token \"{RESTORE_CONFIRMATION}\""
            )));
        }

        // Hash once, outside the transaction.
        let placeholder_hash = hash_password(PLACEHOLDER_PASSWORD)?;

        let txn = self.db.begin().await?;

        // Children first. Notes, material usage and the stock ledger are not
        // part of the snapshot; the battery-scoped ones go with their
        // batteries.
        status_history::Entity::delete_many().exec(&txn).await?;
        staff_note::Entity::delete_many().exec(&txn).await?;
        material_usage::Entity::delete_many().exec(&txn).await?;
        battery::Entity::delete_many().exec(&txn).await?;
        customer::Entity::delete_many().exec(&txn).await?;
        system_setting::Entity::delete_many().exec(&txn).await?;
        // The stock ledger survives a restore but its author accounts do
        // not; re-attribute the rows to the restoring admin so the user
        // delete does not trip the created_by foreign key.
        stock_transaction::Entity::update_many()
            .col_expr(
                stock_transaction::Column::CreatedBy,
                sea_orm::sea_query::Expr::value(actor.id),
            )
            .filter(stock_transaction::Column::CreatedBy.ne(actor.id))
            .exec(&txn)
            .await?;
        user::Entity::delete_many()
            .filter(user::Column::Id.ne(actor.id))
            .exec(&txn)
            .await?;

        let mut summary = RestoreSummary {
            users: 0,
            customers: 0,
            batteries: 0,
            status_history: 0,
            settings: 0,
            skipped_history: 0,
        };

        for record in &snapshot.users {
            if record.username == actor.username {
                continue;
            }
            let role = Role::parse(&record.role).ok_or_else(|| {
                DomainError::Validation(format!(
                    "unknown role \"{}\" for user {}",
                    record.role, record.username
                ))
            })?;
            user::ActiveModel {
                username: Set(record.username.clone()),
                password_hash: Set(placeholder_hash.clone()),
                role: Set(role.into()),
                full_name: Set(record.full_name.clone()),
                active: Set(record.is_active),
                created_at: Set(parse_timestamp(record.created_at.as_deref(), "users")?),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            summary.users += 1;
        }

        let mut customer_ids: HashMap<i32, i32> = HashMap::new();
        for record in &snapshot.customers {
            let inserted = customer::ActiveModel {
                name: Set(record.name.clone()),
                mobile: Set(record.mobile.clone()),
                mobile_secondary: Set(None),
                created_at: Set(parse_timestamp(record.created_at.as_deref(), "customers")?),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            customer_ids.insert(record.id, inserted.id);
            summary.customers += 1;
        }

        let mut battery_ids: HashMap<i32, i32> = HashMap::new();
        for record in &snapshot.batteries {
            let customer_id = customer_ids.get(&record.customer_id).copied().ok_or_else(|| {
                DomainError::Validation(format!(
                    "battery {} references unknown customer id {}",
                    record.battery_id, record.customer_id
                ))
            })?;
            let status = BatteryStatus::parse(&record.status).ok_or_else(|| {
                DomainError::Validation(format!(
                    "unknown status \"{}\" for battery {}",
                    record.status, record.battery_id
                ))
            })?;
            let inserted = battery::ActiveModel {
                code: Set(record.battery_id.clone()),
                customer_id: Set(customer_id),
                battery_type: Set(record.battery_type.clone()),
                voltage: Set(record.voltage.clone()),
                capacity: Set(record.capacity.clone()),
                status: Set(status.into()),
                inward_date: Set(parse_timestamp(record.inward_date.as_deref(), "batteries")?),
                service_price: Set(record.service_price),
                pickup_charge: Set(0.0),
                is_pickup: Set(false),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            battery_ids.insert(record.id, inserted.id);
            summary.batteries += 1;
        }

        for record in &snapshot.status_history {
            let Some(battery_id) = battery_ids.get(&record.battery_id).copied() else {
                warn!(
                    history_id = record.id,
                    battery_id = record.battery_id,
                    "skipping history row with unknown battery id"
                );
                summary.skipped_history += 1;
                continue;
            };
            let status = BatteryStatus::parse(&record.status).ok_or_else(|| {
                DomainError::Validation(format!(
                    "unknown status \"{}\" in history row {}",
                    record.status, record.id
                ))
            })?;
            status_history::ActiveModel {
                battery_id: Set(battery_id),
                status: Set(status.into()),
                comments: Set(record.comments.clone()),
                // Original user ids are gone after the wipe; the restoring
                // admin takes attribution.
                updated_by: Set(actor.id),
                updated_at: Set(parse_timestamp(record.updated_at.as_deref(), "status_history")?),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            summary.status_history += 1;
        }

        for record in &snapshot.settings {
            system_setting::ActiveModel {
                setting_key: Set(record.setting_key.clone()),
                setting_value: Set(record.setting_value.clone()),
                updated_at: Set(parse_timestamp(record.updated_at.as_deref(), "settings")?),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            summary.settings += 1;
        }

        txn.commit().await?;

        info!(
            by = %actor.username,
            users = summary.users,
            customers = summary.customers,
            batteries = summary.batteries,
            history = summary.status_history,
            skipped = summary.skipped_history,
            "snapshot restored"
        );
        Ok(summary)
    }
}

fn parse_timestamp(value: Option<&str>, table: &str) -> DomainResult<DateTime<Utc>> {
    match value {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| {
                DomainError::Validation(format!("invalid timestamp \"{s}\" in {table}"))
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{fixture, Fixture};
    use crate::application::services::{IntakeInput, LifecycleService, SettingsService};
    use crate::infrastructure::crypto::verify_password;
    use sea_orm::PaginatorTrait;

    fn intake_input(mobile: &str) -> IntakeInput {
        IntakeInput {
            customer_name: "Suresh Kumar".into(),
            mobile: mobile.into(),
            mobile_secondary: Some("040-1234".into()),
            battery_type: "Lead Acid".into(),
            voltage: "12V".into(),
            capacity: "100Ah".into(),
            is_pickup: false,
            pickup_charge: 0.0,
        }
    }

    async fn seed_shop(fx: &Fixture) {
        let lifecycle = LifecycleService::new(fx.db.clone());
        let settings = SettingsService::new(fx.db.clone());

        let first = lifecycle.intake(intake_input("9000000001"), &fx.staff).await.unwrap();
        lifecycle.intake(intake_input("9000000002"), &fx.staff).await.unwrap();
        lifecycle
            .update_status(
                first.id,
                crate::domain::BatteryStatus::Pending,
                Some("opened"),
                None,
                &fx.technician,
            )
            .await
            .unwrap();
        settings.set("shop_name", "Kumar Battery Works", &fx.admin).await.unwrap();
    }

    #[tokio::test]
    async fn export_then_restore_round_trips_the_core_tables() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());
        seed_shop(&fx).await;

        let snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        assert_eq!(snapshot.users.len(), 3);
        assert_eq!(snapshot.customers.len(), 2);
        assert_eq!(snapshot.batteries.len(), 2);
        assert_eq!(snapshot.status_history.len(), 3);
        assert_eq!(snapshot.settings.len(), 1);

        // Data written after the export is wiped by the restore.
        LifecycleService::new(fx.db.clone())
            .intake(intake_input("9000000003"), &fx.staff)
            .await
            .unwrap();

        let summary = backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.admin)
            .await
            .unwrap();
        assert_eq!(summary.users, 2); // admin account kept, not recreated
        assert_eq!(summary.customers, 2);
        assert_eq!(summary.batteries, 2);
        assert_eq!(summary.status_history, 3);
        assert_eq!(summary.settings, 1);
        assert_eq!(summary.skipped_history, 0);

        assert_eq!(user::Entity::find().count(&fx.db).await.unwrap(), 3);
        assert_eq!(battery::Entity::find().count(&fx.db).await.unwrap(), 2);

        // Every restored foreign key resolves.
        let customers: Vec<i32> = customer::Entity::find()
            .all(&fx.db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        let batteries = battery::Entity::find().all(&fx.db).await.unwrap();
        for b in &batteries {
            assert!(customers.contains(&b.customer_id));
        }
        let battery_ids: Vec<i32> = batteries.iter().map(|b| b.id).collect();
        for h in status_history::Entity::find().all(&fx.db).await.unwrap() {
            assert!(battery_ids.contains(&h.battery_id));
            assert_eq!(h.updated_by, fx.admin.id);
        }

        let setting = system_setting::Entity::find()
            .filter(system_setting::Column::SettingKey.eq("shop_name"))
            .one(&fx.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(setting.setting_value, "Kumar Battery Works");
    }

    #[tokio::test]
    async fn restored_accounts_get_the_placeholder_password() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());

        let snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.admin)
            .await
            .unwrap();

        let staff = user::Entity::find()
            .filter(user::Column::Username.eq("staff"))
            .one(&fx.db)
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password("password123", &staff.password_hash).unwrap());

        // The acting admin's credentials were never touched.
        let admin = user::Entity::find_by_id(fx.admin.id)
            .one(&fx.db)
            .await
            .unwrap()
            .unwrap();
        assert!(verify_password("changeme1", &admin.password_hash).unwrap());
    }

    #[tokio::test]
    async fn restore_requires_the_confirmation_token_and_admin_role() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());
        seed_shop(&fx).await;

        let snapshot = backup.export_snapshot(&fx.staff).await.unwrap();

        let err = backup
            .restore_snapshot(&snapshot, "confirm", &fx.admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));

        // Nothing was wiped by the refused attempts.
        assert_eq!(battery::Entity::find().count(&fx.db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn restore_keeps_the_stock_ledger_and_reattributes_it() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());
        seed_shop(&fx).await;

        // Ordinary shop state: a staff account has written ledger rows.
        let inventory = crate::application::services::InventoryService::new(fx.db.clone());
        let item = inventory
            .add_item(
                crate::application::services::NewItemInput {
                    item_name: "Battery Acid".into(),
                    item_code: "ACID-01".into(),
                    category: "acid".into(),
                    unit: "liters".into(),
                    opening_stock: 10.0,
                    minimum_stock: 5.0,
                    unit_cost: 2.5,
                    supplier: None,
                },
                &fx.staff,
            )
            .await
            .unwrap();
        inventory
            .record_purchase(item.id, 5.0, 3.0, None, &fx.staff)
            .await
            .unwrap();

        let snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.admin)
            .await
            .unwrap();

        // The catalog and ledger are outside the snapshot and survive, with
        // the rows now attributed to the restoring admin.
        let item = inventory.get_item(item.id).await.unwrap();
        assert_eq!(item.current_stock, 15.0);
        let ledger = stock_transaction::Entity::find().all(&fx.db).await.unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].created_by, fx.admin.id);
    }

    #[tokio::test]
    async fn technician_cannot_export() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());

        let err = backup.export_snapshot(&fx.technician).await.unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));
    }

    #[tokio::test]
    async fn history_rows_with_unknown_battery_ids_are_skipped() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());
        seed_shop(&fx).await;

        let mut snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        snapshot.status_history.push(StatusHistoryRecord {
            id: 999,
            battery_id: 999,
            status: "Pending".into(),
            comments: Some("orphan".into()),
            updated_by: 1,
            updated_at: None,
        });

        let summary = backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.admin)
            .await
            .unwrap();
        assert_eq!(summary.status_history, 3);
        assert_eq!(summary.skipped_history, 1);
    }

    #[tokio::test]
    async fn bad_references_or_statuses_abort_the_whole_restore() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());
        seed_shop(&fx).await;

        let before = battery::Entity::find().count(&fx.db).await.unwrap();

        let mut snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        snapshot.batteries[0].customer_id = 999;
        let err = backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // The failed transaction rolled back: nothing lost.
        assert_eq!(battery::Entity::find().count(&fx.db).await.unwrap(), before);

        let mut snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        snapshot.batteries[0].status = "Exploded".into();
        let err = backup
            .restore_snapshot(&snapshot, RESTORE_CONFIRMATION, &fx.admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(battery::Entity::find().count(&fx.db).await.unwrap(), before);
    }

    #[tokio::test]
    async fn snapshot_json_round_trips_and_carries_no_hashes() {
        let fx = fixture().await;
        let backup = BackupService::new(fx.db.clone());
        seed_shop(&fx).await;

        let snapshot = backup.export_snapshot(&fx.admin).await.unwrap();
        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("$2b$"));

        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.batteries.len(), snapshot.batteries.len());

        // Lists omitted from the document deserialize as empty.
        let minimal: Snapshot =
            serde_json::from_str(r#"{"timestamp":"2026-01-01T00:00:00Z"}"#).unwrap();
        assert!(minimal.users.is_empty());
        assert!(minimal.batteries.is_empty());
    }
}
