//! Battery lifecycle service
//!
//! Intake, status updates, handover and warranty reopen, plus the staff
//! annotation log. Every transition writes its status-history row in the
//! same database transaction as the status change itself; a failure anywhere
//! rolls the whole operation back.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::application::services::settings::load_battery_code_config;
use crate::domain::{
    next_battery_code, Battery, BatteryStatus, DeliveryKind, DomainError, DomainResult, NoteType,
    Operation, StaffNote, StatusHistoryEntry, User,
};
use crate::infrastructure::database::entities::{battery, customer, staff_note, status_history};

/// Intake form. Customer fields and battery attributes are all required.
#[derive(Debug, Clone, Validate)]
pub struct IntakeInput {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "mobile number is required"))]
    pub mobile: String,
    pub mobile_secondary: Option<String>,
    #[validate(length(min = 1, message = "battery type is required"))]
    pub battery_type: String,
    #[validate(length(min = 1, message = "voltage is required"))]
    pub voltage: String,
    #[validate(length(min = 1, message = "capacity is required"))]
    pub capacity: String,
    pub is_pickup: bool,
    #[validate(range(min = 0.0, message = "pickup charge cannot be negative"))]
    pub pickup_charge: f64,
}

pub struct LifecycleService {
    db: DatabaseConnection,
}

impl LifecycleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Register a battery. Looks the customer up by mobile (first-seen wins,
    /// creating one if needed), assigns the next sequential code and writes
    /// the initial `Received` history row, all in one transaction.
    ///
    /// Code generation is read-compute, not reserve: two overlapping intakes
    /// can read the same last code and collide on the unique constraint.
    /// Accepted gap under the single-writer assumption.
    pub async fn intake(&self, input: IntakeInput, actor: &User) -> DomainResult<Battery> {
        actor.require(Operation::IntakeBattery)?;
        input
            .validate()
            .map_err(|e| DomainError::Validation(e.to_string()))?;

        let now = Utc::now();
        let txn = self.db.begin().await?;

        let existing = customer::Entity::find()
            .filter(customer::Column::Mobile.eq(input.mobile.as_str()))
            .one(&txn)
            .await?;
        let owner = match existing {
            Some(c) => c,
            None => {
                customer::ActiveModel {
                    name: Set(input.customer_name.clone()),
                    mobile: Set(input.mobile.clone()),
                    mobile_secondary: Set(input.mobile_secondary.clone()),
                    created_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        let config = load_battery_code_config(&txn).await?;
        let last = battery::Entity::find()
            .order_by_desc(battery::Column::Id)
            .one(&txn)
            .await?;
        let code = next_battery_code(&config, last.as_ref().map(|b| b.code.as_str()));

        let row = battery::ActiveModel {
            code: Set(code.clone()),
            customer_id: Set(owner.id),
            battery_type: Set(input.battery_type.clone()),
            voltage: Set(input.voltage.clone()),
            capacity: Set(input.capacity.clone()),
            status: Set(battery::BatteryStatus::Received),
            inward_date: Set(now),
            service_price: Set(0.0),
            pickup_charge: Set(input.pickup_charge),
            is_pickup: Set(input.is_pickup),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let comment = if input.is_pickup {
            "Battery received from customer - Pickup service"
        } else {
            "Battery received from customer"
        };
        status_history::ActiveModel {
            battery_id: Set(row.id),
            status: Set(battery::BatteryStatus::Received),
            comments: Set(Some(comment.to_string())),
            updated_by: Set(actor.id),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(code = %code, customer_id = owner.id, "battery registered");
        Ok(row.into())
    }

    /// Workshop status update (`Received -> Pending`, `Pending <-> Ready`,
    /// open statuses `-> Not Repairable`). Available to all roles; may set
    /// the service price at the same time.
    pub async fn update_status(
        &self,
        battery_id: i32,
        new_status: BatteryStatus,
        comments: Option<&str>,
        service_price: Option<f64>,
        actor: &User,
    ) -> DomainResult<()> {
        actor.require(Operation::UpdateStatus)?;
        if let Some(price) = service_price {
            if price < 0.0 {
                return Err(DomainError::Validation(
                    "service price cannot be negative".into(),
                ));
            }
        }

        let txn = self.db.begin().await?;
        let model = find_battery(&txn, battery_id).await?;
        let current: BatteryStatus = model.status.clone().into();

        if !current.can_update_to(new_status) {
            return Err(DomainError::Precondition(format!(
                "cannot move battery {} from {} to {}",
                model.code, current, new_status
            )));
        }

        let code = model.code.clone();
        let mut active: battery::ActiveModel = model.into();
        active.status = Set(new_status.into());
        if let Some(price) = service_price {
            active.service_price = Set(price);
        }
        active.update(&txn).await?;

        append_history(&txn, battery_id, new_status, comments.map(str::to_string), actor).await?;
        txn.commit().await?;

        info!(code = %code, status = %new_status, "battery status updated");
        Ok(())
    }

    /// Hand a `Ready` battery over to the customer, as delivered or returned.
    /// Shop staff and admin only; refuses unbilled work.
    pub async fn deliver(
        &self,
        battery_id: i32,
        kind: DeliveryKind,
        comments: Option<&str>,
        actor: &User,
    ) -> DomainResult<()> {
        actor.require(Operation::DeliverBattery)?;

        let txn = self.db.begin().await?;
        let model = find_battery(&txn, battery_id).await?;
        let current: BatteryStatus = model.status.clone().into();

        if !current.can_deliver() {
            return Err(DomainError::Precondition(format!(
                "only batteries marked Ready can be handed over, battery {} is {}",
                model.code, current
            )));
        }
        let domain: Battery = model.clone().into();
        if !domain.billable() {
            return Err(DomainError::Precondition(
                "cannot deliver battery without service charges set".into(),
            ));
        }

        let target = kind.target_status();
        let code = model.code.clone();
        let mut active: battery::ActiveModel = model.into();
        active.status = Set(target.into());
        active.update(&txn).await?;

        append_history(&txn, battery_id, target, comments.map(str::to_string), actor).await?;
        txn.commit().await?;

        info!(code = %code, status = %target, "battery handed over");
        Ok(())
    }

    /// Reopen a completed battery (`Ready`, `Delivered` or `Returned`) for
    /// warranty work. Sets it back to `Pending`, records a history row
    /// embedding the previous status and reason, and appends an `issue` staff
    /// note - the one transition that writes a note and a status change
    /// atomically.
    pub async fn reopen_for_warranty(
        &self,
        battery_id: i32,
        reason: &str,
        actor: &User,
    ) -> DomainResult<()> {
        actor.require(Operation::ReopenWarranty)?;
        if reason.trim().is_empty() {
            return Err(DomainError::Validation("warranty reason is required".into()));
        }

        let txn = self.db.begin().await?;
        let model = find_battery(&txn, battery_id).await?;
        let current: BatteryStatus = model.status.clone().into();

        if !current.can_reopen() {
            return Err(DomainError::Precondition(format!(
                "only completed batteries can be reopened for warranty, battery {} is {}",
                model.code, current
            )));
        }

        let now = Utc::now();
        let code = model.code.clone();
        let mut active: battery::ActiveModel = model.into();
        active.status = Set(battery::BatteryStatus::Pending);
        active.update(&txn).await?;

        append_history(
            &txn,
            battery_id,
            BatteryStatus::Pending,
            Some(format!(
                "Reopened for warranty - Previous status: {}. Reason: {}",
                current, reason
            )),
            actor,
        )
        .await?;

        staff_note::ActiveModel {
            battery_id: Set(battery_id),
            note: Set(format!("WARRANTY RETURN: {}", reason)),
            note_type: Set(staff_note::NoteType::Issue),
            created_by: Set(actor.id),
            created_at: Set(now),
            is_resolved: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(code = %code, reason, "battery reopened for warranty");
        Ok(())
    }

    /// Append a free-text staff note. Shop staff and admin only.
    pub async fn add_note(
        &self,
        battery_id: i32,
        note: &str,
        note_type: NoteType,
        actor: &User,
    ) -> DomainResult<StaffNote> {
        actor.require(Operation::AddStaffNote)?;
        if note.trim().is_empty() {
            return Err(DomainError::Validation("note cannot be empty".into()));
        }
        // Existence check so a bad id is NotFound rather than an FK error.
        self.get(battery_id).await?;

        let model = staff_note::ActiveModel {
            battery_id: Set(battery_id),
            note: Set(note.to_string()),
            note_type: Set(note_type.into()),
            created_by: Set(actor.id),
            created_at: Set(Utc::now()),
            is_resolved: Set(false),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model.into())
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn get(&self, battery_id: i32) -> DomainResult<Battery> {
        let model = find_battery(&self.db, battery_id).await?;
        Ok(model.into())
    }

    pub async fn find_by_code(&self, code: &str) -> DomainResult<Option<Battery>> {
        let model = battery::Entity::find()
            .filter(battery::Column::Code.eq(code))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    /// Batteries in any of the given statuses, oldest intake first (the work
    /// queue ordering).
    pub async fn list_by_status(&self, statuses: &[BatteryStatus]) -> DomainResult<Vec<Battery>> {
        let statuses: Vec<battery::BatteryStatus> =
            statuses.iter().map(|s| (*s).into()).collect();
        let models = battery::Entity::find()
            .filter(battery::Column::Status.is_in(statuses))
            .order_by_asc(battery::Column::InwardDate)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Full audit trail, oldest first.
    pub async fn history(&self, battery_id: i32) -> DomainResult<Vec<StatusHistoryEntry>> {
        let models = status_history::Entity::find()
            .filter(status_history::Column::BatteryId.eq(battery_id))
            .order_by_asc(status_history::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    /// Staff notes, newest first.
    pub async fn notes(&self, battery_id: i32) -> DomainResult<Vec<StaffNote>> {
        let models = staff_note::Entity::find()
            .filter(staff_note::Column::BatteryId.eq(battery_id))
            .order_by_desc(staff_note::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

async fn find_battery<C: sea_orm::ConnectionTrait>(
    conn: &C,
    battery_id: i32,
) -> DomainResult<battery::Model> {
    battery::Entity::find_by_id(battery_id)
        .one(conn)
        .await?
        .ok_or(DomainError::NotFound {
            entity: "Battery",
            field: "id",
            value: battery_id.to_string(),
        })
}

async fn append_history<C: sea_orm::ConnectionTrait>(
    conn: &C,
    battery_id: i32,
    status: BatteryStatus,
    comments: Option<String>,
    actor: &User,
) -> DomainResult<()> {
    status_history::ActiveModel {
        battery_id: Set(battery_id),
        status: Set(status.into()),
        comments: Set(comments),
        updated_by: Set(actor.id),
        updated_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(conn)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{fixture, Fixture};
    use crate::domain::BatteryCodeConfig;
    use crate::infrastructure::database::entities::user;
    use sea_orm::{ModelTrait, PaginatorTrait};

    fn intake_input(mobile: &str) -> IntakeInput {
        IntakeInput {
            customer_name: "Suresh Kumar".into(),
            mobile: mobile.into(),
            mobile_secondary: None,
            battery_type: "Lead Acid".into(),
            voltage: "12V".into(),
            capacity: "100Ah".into(),
            is_pickup: false,
            pickup_charge: 0.0,
        }
    }

    async fn service(fx: &Fixture) -> LifecycleService {
        LifecycleService::new(fx.db.clone())
    }

    #[tokio::test]
    async fn intake_creates_customer_battery_and_history() {
        let fx = fixture().await;
        let service = service(&fx).await;

        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();
        assert_eq!(battery.code, "BAT0001");
        assert_eq!(battery.status, BatteryStatus::Received);

        let history = service.history(battery.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, BatteryStatus::Received);
        assert_eq!(history[0].updated_by, fx.staff.id);
        assert_eq!(
            history[0].comments.as_deref(),
            Some("Battery received from customer")
        );
    }

    #[tokio::test]
    async fn intake_reuses_customer_with_known_mobile() {
        let fx = fixture().await;
        let service = service(&fx).await;

        let first = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        // Same mobile, different spelling of the name: first-seen wins.
        let mut input = intake_input("9876543210");
        input.customer_name = "S. Kumar".into();
        let second = service.intake(input, &fx.staff).await.unwrap();

        assert_eq!(first.customer_id, second.customer_id);
        assert_eq!(second.code, "BAT0002");

        let customers = customer::Entity::find().count(&fx.db).await.unwrap();
        assert_eq!(customers, 1);
    }

    #[tokio::test]
    async fn intake_notes_pickup_service_in_history() {
        let fx = fixture().await;
        let service = service(&fx).await;

        let mut input = intake_input("9000000001");
        input.is_pickup = true;
        input.pickup_charge = 100.0;
        let battery = service.intake(input, &fx.staff).await.unwrap();

        let history = service.history(battery.id).await.unwrap();
        assert_eq!(
            history[0].comments.as_deref(),
            Some("Battery received from customer - Pickup service")
        );
    }

    #[tokio::test]
    async fn intake_requires_all_fields_and_staff_role() {
        let fx = fixture().await;
        let service = service(&fx).await;

        let mut input = intake_input("9876543210");
        input.voltage = "".into();
        let err = service.intake(input, &fx.staff).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .intake(intake_input("9876543210"), &fx.technician)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));

        // Nothing was written by the failed attempts.
        let count = battery::Entity::find().count(&fx.db).await.unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn status_updates_follow_the_transition_table() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        // Technician works the battery through the shop floor.
        service
            .update_status(battery.id, BatteryStatus::Pending, Some("opened up"), None, &fx.technician)
            .await
            .unwrap();
        service
            .update_status(
                battery.id,
                BatteryStatus::Ready,
                Some("plates replaced"),
                Some(450.0),
                &fx.technician,
            )
            .await
            .unwrap();

        let current = service.get(battery.id).await.unwrap();
        assert_eq!(current.status, BatteryStatus::Ready);
        assert_eq!(current.service_price, 450.0);

        let history = service.history(battery.id).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[2].comments.as_deref(), Some("plates replaced"));

        // Received -> Ready is not in the table.
        let another = service
            .intake(intake_input("9000000002"), &fx.staff)
            .await
            .unwrap();
        let err = service
            .update_status(another.id, BatteryStatus::Ready, None, None, &fx.technician)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }

    #[tokio::test]
    async fn rejected_transition_leaves_no_history_row() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        let err = service
            .update_status(battery.id, BatteryStatus::Delivered, None, None, &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));

        assert_eq!(service.history(battery.id).await.unwrap().len(), 1);
        assert_eq!(
            service.get(battery.id).await.unwrap().status,
            BatteryStatus::Received
        );
    }

    #[tokio::test]
    async fn not_repairable_is_a_dead_end() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        service
            .update_status(battery.id, BatteryStatus::NotRepairable, Some("sulfated beyond recovery"), None, &fx.technician)
            .await
            .unwrap();

        for target in [BatteryStatus::Pending, BatteryStatus::Ready, BatteryStatus::Received] {
            let err = service
                .update_status(battery.id, target, None, None, &fx.staff)
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::Precondition(_)));
        }
        let err = service
            .reopen_for_warranty(battery.id, "customer insists", &fx.admin)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }

    #[tokio::test]
    async fn deliver_refuses_unbilled_work() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();
        service
            .update_status(battery.id, BatteryStatus::Pending, None, None, &fx.technician)
            .await
            .unwrap();
        service
            .update_status(battery.id, BatteryStatus::Ready, None, None, &fx.technician)
            .await
            .unwrap();

        let err = service
            .deliver(battery.id, DeliveryKind::Delivered, None, &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));

        service
            .update_status(battery.id, BatteryStatus::Ready, None, Some(50.0), &fx.staff)
            .await
            .unwrap_err(); // Ready -> Ready is not a transition
        service
            .update_status(battery.id, BatteryStatus::Pending, None, None, &fx.staff)
            .await
            .unwrap();
        service
            .update_status(battery.id, BatteryStatus::Ready, None, Some(50.0), &fx.staff)
            .await
            .unwrap();

        service
            .deliver(battery.id, DeliveryKind::Delivered, Some("paid cash"), &fx.staff)
            .await
            .unwrap();
        let current = service.get(battery.id).await.unwrap();
        assert_eq!(current.status, BatteryStatus::Delivered);

        let history = service.history(battery.id).await.unwrap();
        assert_eq!(history.last().unwrap().status, BatteryStatus::Delivered);
    }

    #[tokio::test]
    async fn pickup_charge_alone_makes_a_battery_billable() {
        let fx = fixture().await;
        let service = service(&fx).await;

        let mut input = intake_input("9876543210");
        input.is_pickup = true;
        input.pickup_charge = 80.0;
        let battery = service.intake(input, &fx.staff).await.unwrap();
        service
            .update_status(battery.id, BatteryStatus::Pending, None, None, &fx.technician)
            .await
            .unwrap();
        service
            .update_status(battery.id, BatteryStatus::Ready, None, None, &fx.technician)
            .await
            .unwrap();

        service
            .deliver(battery.id, DeliveryKind::Returned, None, &fx.staff)
            .await
            .unwrap();
        assert_eq!(
            service.get(battery.id).await.unwrap().status,
            BatteryStatus::Returned
        );
    }

    #[tokio::test]
    async fn technician_cannot_deliver_or_reopen() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        let err = service
            .deliver(battery.id, DeliveryKind::Delivered, None, &fx.technician)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));

        let err = service
            .reopen_for_warranty(battery.id, "leaking", &fx.technician)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));
    }

    #[tokio::test]
    async fn warranty_reopen_writes_history_and_issue_note_atomically() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();
        service
            .update_status(battery.id, BatteryStatus::Pending, None, None, &fx.technician)
            .await
            .unwrap();
        service
            .update_status(battery.id, BatteryStatus::Ready, None, Some(300.0), &fx.technician)
            .await
            .unwrap();
        service
            .deliver(battery.id, DeliveryKind::Delivered, None, &fx.staff)
            .await
            .unwrap();

        service
            .reopen_for_warranty(battery.id, "cell leaking", &fx.staff)
            .await
            .unwrap();

        let current = service.get(battery.id).await.unwrap();
        assert_eq!(current.status, BatteryStatus::Pending);

        let history = service.history(battery.id).await.unwrap();
        let last = history.last().unwrap();
        assert_eq!(last.status, BatteryStatus::Pending);
        let comment = last.comments.as_deref().unwrap();
        assert!(comment.contains("cell leaking"));
        assert!(comment.contains("Previous status: Delivered"));

        let notes = service.notes(battery.id).await.unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note_type, NoteType::Issue);
        assert_eq!(notes[0].note, "WARRANTY RETURN: cell leaking");
        assert!(!notes[0].is_resolved);
    }

    #[tokio::test]
    async fn warranty_reopen_requires_a_reason_and_completed_status() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        let err = service
            .reopen_for_warranty(battery.id, "  ", &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        // Received is not a completed status.
        let err = service
            .reopen_for_warranty(battery.id, "came back dead", &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }

    #[tokio::test]
    async fn notes_are_gated_and_non_empty() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();

        let err = service
            .add_note(battery.id, "call tomorrow", NoteType::Followup, &fx.technician)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Authorization(_)));

        let err = service
            .add_note(battery.id, "", NoteType::Followup, &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let note = service
            .add_note(battery.id, "call tomorrow", NoteType::Reminder, &fx.staff)
            .await
            .unwrap();
        assert_eq!(note.note_type, NoteType::Reminder);
        assert_eq!(service.notes(battery.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn audit_rows_are_reachable_from_their_author() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let battery = service
            .intake(intake_input("9876543210"), &fx.staff)
            .await
            .unwrap();
        service
            .add_note(battery.id, "call tomorrow", NoteType::Followup, &fx.staff)
            .await
            .unwrap();

        let author = user::Entity::find_by_id(fx.staff.id)
            .one(&fx.db)
            .await
            .unwrap()
            .unwrap();
        let history = author
            .find_related(status_history::Entity)
            .all(&fx.db)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].battery_id, battery.id);

        let notes = author
            .find_related(staff_note::Entity)
            .all(&fx.db)
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].note, "call tomorrow");
    }

    #[tokio::test]
    async fn unknown_battery_is_not_found() {
        let fx = fixture().await;
        let service = service(&fx).await;

        let err = service
            .update_status(999, BatteryStatus::Pending, None, None, &fx.staff)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn codes_continue_after_a_prefix_change_resets_the_sequence() {
        let fx = fixture().await;
        let service = service(&fx).await;
        let settings = crate::application::services::SettingsService::new(fx.db.clone());

        service.intake(intake_input("9000000001"), &fx.staff).await.unwrap();
        service.intake(intake_input("9000000002"), &fx.staff).await.unwrap();

        settings
            .set(super::super::settings::BATTERY_ID_PREFIX_KEY, "BX", &fx.admin)
            .await
            .unwrap();

        // Last code BAT0002 does not parse under the BX prefix: fall back to
        // the configured start.
        let battery = service.intake(intake_input("9000000003"), &fx.staff).await.unwrap();
        assert_eq!(battery.code, "BX0001");
    }

    #[tokio::test]
    async fn overlapping_intakes_would_generate_the_same_code() {
        // Demonstrates the documented id-generation race: both requests read
        // the same last battery before either commits, so both compute the
        // same next code. The unique constraint on `code` turns the loser
        // into an error rather than silent duplication.
        let fx = fixture().await;
        let service = service(&fx).await;
        service.intake(intake_input("9000000001"), &fx.staff).await.unwrap();

        let config = BatteryCodeConfig::default();
        let last = battery::Entity::find()
            .order_by_desc(battery::Column::Id)
            .one(&fx.db)
            .await
            .unwrap()
            .unwrap();

        let first = next_battery_code(&config, Some(&last.code));
        let second = next_battery_code(&config, Some(&last.code));
        assert_eq!(first, second);
    }
}
