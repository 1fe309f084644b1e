//! Battery lifecycle: status enum, transition table and entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repair status of a battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryStatus {
    Received,
    Pending,
    Ready,
    Delivered,
    Returned,
    NotRepairable,
}

impl BatteryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "Received",
            Self::Pending => "Pending",
            Self::Ready => "Ready",
            Self::Delivered => "Delivered",
            Self::Returned => "Returned",
            Self::NotRepairable => "Not Repairable",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Received" => Some(Self::Received),
            "Pending" => Some(Self::Pending),
            "Ready" => Some(Self::Ready),
            "Delivered" => Some(Self::Delivered),
            "Returned" => Some(Self::Returned),
            "Not Repairable" => Some(Self::NotRepairable),
            _ => None,
        }
    }

    /// Legal targets of the plain status-update operation. Deliver and
    /// warranty-reopen have their own gates and are not part of this table.
    ///
    /// `Not Repairable`, `Delivered` and `Returned` have no outgoing edge
    /// here; in particular `Not Repairable` is terminal for the whole
    /// state machine.
    pub fn can_update_to(&self, target: BatteryStatus) -> bool {
        use BatteryStatus::*;
        matches!(
            (self, target),
            (Received, Pending)
                | (Pending, Ready)
                | (Ready, Pending)
                | (Received, NotRepairable)
                | (Pending, NotRepairable)
                | (Ready, NotRepairable)
        )
    }

    /// Whether the battery may be handed over to the customer.
    pub fn can_deliver(&self) -> bool {
        *self == Self::Ready
    }

    /// Whether the battery may be reopened for warranty work.
    pub fn can_reopen(&self) -> bool {
        matches!(self, Self::Ready | Self::Delivered | Self::Returned)
    }
}

impl std::fmt::Display for BatteryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome chosen at handover: repaired and delivered, or returned unrepaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryKind {
    Delivered,
    Returned,
}

impl DeliveryKind {
    pub fn target_status(&self) -> BatteryStatus {
        match self {
            Self::Delivered => BatteryStatus::Delivered,
            Self::Returned => BatteryStatus::Returned,
        }
    }
}

/// A battery under repair.
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    pub id: i32,
    /// Human-readable sequential code (e.g. `BAT0001`). Immutable once
    /// assigned.
    pub code: String,
    pub customer_id: i32,
    pub battery_type: String,
    pub voltage: String,
    pub capacity: String,
    pub status: BatteryStatus,
    pub inward_date: DateTime<Utc>,
    pub service_price: f64,
    pub pickup_charge: f64,
    pub is_pickup: bool,
}

impl Battery {
    /// A battery cannot be delivered until at least one charge is set.
    pub fn billable(&self) -> bool {
        self.service_price > 0.0 || self.pickup_charge > 0.0
    }
}

/// Immutable audit record of one status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistoryEntry {
    pub id: i32,
    pub battery_id: i32,
    pub status: BatteryStatus,
    pub comments: Option<String>,
    pub updated_by: i32,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use BatteryStatus::*;

    const ALL: [BatteryStatus; 6] = [Received, Pending, Ready, Delivered, Returned, NotRepairable];

    #[test]
    fn update_table_lists_exactly_the_workshop_transitions() {
        let legal = [
            (Received, Pending),
            (Pending, Ready),
            (Ready, Pending),
            (Received, NotRepairable),
            (Pending, NotRepairable),
            (Ready, NotRepairable),
        ];
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_update_to(to),
                    legal.contains(&(from, to)),
                    "unexpected table entry for {from} -> {to}",
                );
            }
        }
    }

    #[test]
    fn not_repairable_is_terminal() {
        for to in ALL {
            assert!(!NotRepairable.can_update_to(to));
        }
        assert!(!NotRepairable.can_deliver());
        assert!(!NotRepairable.can_reopen());
    }

    #[test]
    fn only_ready_batteries_can_be_delivered() {
        for status in ALL {
            assert_eq!(status.can_deliver(), status == Ready);
        }
    }

    #[test]
    fn completed_batteries_can_be_reopened() {
        for status in ALL {
            let expected = matches!(status, Ready | Delivered | Returned);
            assert_eq!(status.can_reopen(), expected);
        }
    }

    #[test]
    fn status_round_trips_through_db_strings() {
        for status in ALL {
            assert_eq!(BatteryStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BatteryStatus::parse("NotRepairable"), None);
    }

    #[test]
    fn billable_requires_a_positive_charge() {
        let mut battery = Battery {
            id: 1,
            code: "BAT0001".into(),
            customer_id: 1,
            battery_type: "Lead Acid".into(),
            voltage: "12V".into(),
            capacity: "100Ah".into(),
            status: Ready,
            inward_date: Utc::now(),
            service_price: 0.0,
            pickup_charge: 0.0,
            is_pickup: false,
        };
        assert!(!battery.billable());
        battery.pickup_charge = 50.0;
        assert!(battery.billable());
    }
}
