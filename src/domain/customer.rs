use chrono::{DateTime, Utc};

/// A battery owner. Identity key is the primary mobile number: intake looks
/// customers up by mobile and creates one on first sight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub mobile: String,
    pub mobile_secondary: Option<String>,
    pub created_at: DateTime<Utc>,
}
