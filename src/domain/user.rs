//! Users, roles and the permission table

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Staff role. Gates which operations a user may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    ShopStaff,
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::ShopStaff => "shop_staff",
            Self::Technician => "technician",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "shop_staff" => Some(Self::ShopStaff),
            "technician" => Some(Self::Technician),
            _ => None,
        }
    }

    /// Permission table, one row per role. Admin may do everything,
    /// shop staff everything but administration, technicians only the
    /// workshop-floor operations.
    pub fn permits(&self, op: Operation) -> bool {
        use Operation::*;
        match self {
            Self::Admin => true,
            Self::ShopStaff => !matches!(op, RestoreSnapshot | ManageUsers | ManageSettings),
            Self::Technician => matches!(op, UpdateStatus | RecordUsage),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gated operations of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    IntakeBattery,
    UpdateStatus,
    DeliverBattery,
    ReopenWarranty,
    AddStaffNote,
    ManageInventory,
    RecordUsage,
    ExportSnapshot,
    RestoreSnapshot,
    ManageUsers,
    ManageSettings,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IntakeBattery => "register batteries",
            Self::UpdateStatus => "update battery status",
            Self::DeliverBattery => "deliver batteries",
            Self::ReopenWarranty => "reopen batteries for warranty",
            Self::AddStaffNote => "add staff notes",
            Self::ManageInventory => "manage inventory",
            Self::RecordUsage => "record material usage",
            Self::ExportSnapshot => "export backups",
            Self::RestoreSnapshot => "restore backups",
            Self::ManageUsers => "manage users",
            Self::ManageSettings => "manage settings",
        };
        f.write_str(s)
    }
}

/// Acting user, as resolved by the caller's session layer.
///
/// The password hash deliberately does not travel with this struct; it stays
/// inside the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role check every service entry point starts with.
    pub fn require(&self, op: Operation) -> DomainResult<()> {
        if !self.active {
            return Err(DomainError::Authorization("account is disabled".into()));
        }
        if self.role.permits(op) {
            Ok(())
        } else {
            Err(DomainError::Authorization(format!(
                "{} role may not {}",
                self.role, op
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn technician_is_limited_to_floor_operations() {
        let role = Role::Technician;
        assert!(role.permits(Operation::UpdateStatus));
        assert!(role.permits(Operation::RecordUsage));
        assert!(!role.permits(Operation::IntakeBattery));
        assert!(!role.permits(Operation::DeliverBattery));
        assert!(!role.permits(Operation::ReopenWarranty));
        assert!(!role.permits(Operation::ExportSnapshot));
    }

    #[test]
    fn restore_and_administration_are_admin_only() {
        for op in [
            Operation::RestoreSnapshot,
            Operation::ManageUsers,
            Operation::ManageSettings,
        ] {
            assert!(Role::Admin.permits(op));
            assert!(!Role::ShopStaff.permits(op));
            assert!(!Role::Technician.permits(op));
        }
        assert!(Role::ShopStaff.permits(Operation::ExportSnapshot));
    }

    #[test]
    fn inactive_user_is_rejected_regardless_of_role() {
        let user = User {
            id: 1,
            username: "admin".into(),
            full_name: "Admin".into(),
            role: Role::Admin,
            active: false,
            created_at: Utc::now(),
        };
        assert!(matches!(
            user.require(Operation::UpdateStatus),
            Err(DomainError::Authorization(_))
        ));
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in [Role::Admin, Role::ShopStaff, Role::Technician] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("viewer"), None);
    }
}
