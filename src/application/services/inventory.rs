//! Inventory service
//!
//! Stocked repair materials plus the append-only stock ledger. Every stock
//! movement writes a ledger entry and the new `current_stock` level in the
//! same database transaction; material usage additionally records which
//! battery consumed what.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::domain::{
    DomainError, DomainResult, InventoryItem, MaterialUsage, Operation, StockTransaction, User,
};
use crate::infrastructure::database::entities::{
    battery, inventory_item, material_usage, stock_transaction,
};

#[derive(Debug, Clone, Validate)]
pub struct NewItemInput {
    #[validate(length(min = 1, message = "item name is required"))]
    pub item_name: String,
    #[validate(length(min = 1, message = "item code is required"))]
    pub item_code: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
    #[validate(range(min = 0.0, message = "opening stock cannot be negative"))]
    pub opening_stock: f64,
    #[validate(range(min = 0.0, message = "minimum stock cannot be negative"))]
    pub minimum_stock: f64,
    #[validate(range(min = 0.0, message = "unit cost cannot be negative"))]
    pub unit_cost: f64,
    pub supplier: Option<String>,
}

pub struct InventoryService {
    db: DatabaseConnection,
}

impl InventoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a new material. Item codes are unique; a duplicate surfaces
    /// as a conflict.
    pub async fn add_item(&self, input: NewItemInput, actor: &User) -> DomainResult<InventoryItem> {
        actor.require(Operation::ManageInventory)?;
        input
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let now = Utc::now();
        let model = inventory_item::ActiveModel {
            item_name: Set(input.item_name),
            item_code: Set(input.item_code),
            category: Set(input.category),
            unit: Set(input.unit),
            current_stock: Set(input.opening_stock),
            minimum_stock: Set(input.minimum_stock),
            unit_cost: Set(input.unit_cost),
            supplier: Set(input.supplier),
            created_at: Set(now),
            last_updated: Set(now),
            active: Set(true),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(code = %model.item_code, "inventory item added");
        Ok(model.into())
    }

    /// Record a stock purchase: ledger entry plus stock increment. The
    /// item's unit cost is overwritten with the purchase cost, not averaged.
    pub async fn record_purchase(
        &self,
        item_id: i32,
        quantity: f64,
        unit_cost: f64,
        notes: Option<&str>,
        actor: &User,
    ) -> DomainResult<()> {
        actor.require(Operation::ManageInventory)?;
        if quantity <= 0.0 {
            return Err(DomainError::Validation(
                "purchase quantity must be positive".into(),
            ));
        }
        if unit_cost < 0.0 {
            return Err(DomainError::Validation("unit cost cannot be negative".into()));
        }

        let txn = self.db.begin().await?;
        let item = find_item(&txn, item_id).await?;

        stock_transaction::ActiveModel {
            inventory_item_id: Set(item.id),
            transaction_type: Set(stock_transaction::TransactionType::Purchase),
            quantity: Set(quantity),
            unit_cost: Set(unit_cost),
            total_cost: Set(quantity * unit_cost),
            reference_id: Set(None),
            notes: Set(notes.map(str::to_string)),
            created_by: Set(actor.id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let new_stock = item.current_stock + quantity;
        let code = item.item_code.clone();
        let mut active: inventory_item::ActiveModel = item.into();
        active.current_stock = Set(new_stock);
        active.unit_cost = Set(unit_cost);
        active.last_updated = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        info!(code = %code, quantity, "stock purchase recorded");
        Ok(())
    }

    /// Consume material for a battery repair. Writes the negative `usage`
    /// ledger entry, the per-battery usage record and the stock decrement
    /// atomically; refuses to take stock below zero.
    ///
    /// The stock check is read-then-write without row locking: two
    /// overlapping usages can both pass it. Accepted under the same
    /// single-writer assumption as battery-code generation.
    pub async fn record_usage(
        &self,
        battery_id: i32,
        item_id: i32,
        quantity: f64,
        notes: Option<&str>,
        actor: &User,
    ) -> DomainResult<MaterialUsage> {
        actor.require(Operation::RecordUsage)?;
        if quantity <= 0.0 {
            return Err(DomainError::Validation(
                "usage quantity must be positive".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let battery = battery::Entity::find_by_id(battery_id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Battery",
                field: "id",
                value: battery_id.to_string(),
            })?;
        let item = find_item(&txn, item_id).await?;

        if item.current_stock < quantity {
            return Err(DomainError::InsufficientStock {
                item: item.item_name,
                available: item.current_stock,
                requested: quantity,
            });
        }

        let now = Utc::now();
        let total_cost = quantity * item.unit_cost;
        let ledger_note = match notes {
            Some(n) if !n.trim().is_empty() => {
                format!("Used for battery {}: {}", battery.code, n)
            }
            _ => format!("Used for battery {}", battery.code),
        };

        stock_transaction::ActiveModel {
            inventory_item_id: Set(item.id),
            transaction_type: Set(stock_transaction::TransactionType::Usage),
            quantity: Set(-quantity),
            unit_cost: Set(item.unit_cost),
            total_cost: Set(total_cost),
            reference_id: Set(Some(battery.code.clone())),
            notes: Set(Some(ledger_note)),
            created_by: Set(actor.id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let usage = material_usage::ActiveModel {
            battery_id: Set(battery.id),
            inventory_item_id: Set(item.id),
            quantity_used: Set(quantity),
            unit_cost: Set(item.unit_cost),
            total_cost: Set(total_cost),
            used_by: Set(actor.id),
            used_at: Set(now),
            notes: Set(notes.map(str::to_string)),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let new_stock = item.current_stock - quantity;
        let mut active: inventory_item::ActiveModel = item.into();
        active.current_stock = Set(new_stock);
        active.last_updated = Set(now);
        active.update(&txn).await?;

        txn.commit().await?;
        info!(battery = %battery.code, item_id, quantity, "material usage recorded");
        Ok(usage.into())
    }

    /// Manual stock correction. The delta may be positive or negative but
    /// the resulting level must stay at or above zero.
    pub async fn record_adjustment(
        &self,
        item_id: i32,
        delta: f64,
        notes: Option<&str>,
        actor: &User,
    ) -> DomainResult<()> {
        actor.require(Operation::ManageInventory)?;
        if delta == 0.0 {
            return Err(DomainError::Validation(
                "adjustment quantity cannot be zero".into(),
            ));
        }

        let txn = self.db.begin().await?;
        let item = find_item(&txn, item_id).await?;

        let new_stock = item.current_stock + delta;
        if new_stock < 0.0 {
            return Err(DomainError::InsufficientStock {
                item: item.item_name,
                available: item.current_stock,
                requested: -delta,
            });
        }

        stock_transaction::ActiveModel {
            inventory_item_id: Set(item.id),
            transaction_type: Set(stock_transaction::TransactionType::Adjustment),
            quantity: Set(delta),
            unit_cost: Set(item.unit_cost),
            total_cost: Set(delta.abs() * item.unit_cost),
            reference_id: Set(None),
            notes: Set(notes.map(str::to_string)),
            created_by: Set(actor.id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let code = item.item_code.clone();
        let mut active: inventory_item::ActiveModel = item.into();
        active.current_stock = Set(new_stock);
        active.last_updated = Set(Utc::now());
        active.update(&txn).await?;

        txn.commit().await?;
        info!(code = %code, delta, "stock adjustment recorded");
        Ok(())
    }

    /// Retire an item from the catalog. The ledger keeps its history; the
    /// item just stops showing up in active listings.
    pub async fn deactivate_item(&self, item_id: i32, actor: &User) -> DomainResult<()> {
        actor.require(Operation::ManageInventory)?;

        let item = find_item(&self.db, item_id).await?;
        let code = item.item_code.clone();
        let mut active: inventory_item::ActiveModel = item.into();
        active.active = Set(false);
        active.last_updated = Set(Utc::now());
        active.update(&self.db).await?;

        info!(code = %code, "inventory item deactivated");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get_item(&self, item_id: i32) -> DomainResult<InventoryItem> {
        let item = find_item(&self.db, item_id).await?;
        Ok(item.into())
    }

    pub async fn list_active(&self) -> DomainResult<Vec<InventoryItem>> {
        let models = inventory_item::Entity::find()
            .filter(inventory_item::Column::Active.eq(true))
            .order_by_asc(inventory_item::Column::ItemName)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Active items at or below their reorder threshold.
    pub async fn list_low_stock(&self) -> DomainResult<Vec<InventoryItem>> {
        let models = inventory_item::Entity::find()
            .filter(inventory_item::Column::Active.eq(true))
            .filter(
                Expr::col(inventory_item::Column::CurrentStock)
                    .lte(Expr::col(inventory_item::Column::MinimumStock)),
            )
            .order_by_asc(inventory_item::Column::ItemName)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Ledger entries for one item, newest first.
    pub async fn item_ledger(&self, item_id: i32) -> DomainResult<Vec<StockTransaction>> {
        let models = stock_transaction::Entity::find()
            .filter(stock_transaction::Column::InventoryItemId.eq(item_id))
            .order_by_desc(stock_transaction::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Materials consumed by one battery, oldest first.
    pub async fn battery_usage(&self, battery_id: i32) -> DomainResult<Vec<MaterialUsage>> {
        let models = material_usage::Entity::find()
            .filter(material_usage::Column::BatteryId.eq(battery_id))
            .order_by_asc(material_usage::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

async fn find_item<C: sea_orm::ConnectionTrait>(
    conn: &C,
    item_id: i32,
) -> DomainResult<inventory_item::Model> {
    inventory_item::Entity::find_by_id(item_id)
        .one(conn)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "InventoryItem",
            field: "id",
            value: item_id.to_string(),
        })
}
