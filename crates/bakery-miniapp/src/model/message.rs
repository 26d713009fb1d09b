//! Payloads for the messaging endpoints.
use serde::{Deserialize, Serialize};

/// Name sent with a message when the host reported no identity.
pub const ANONYMOUS_CUSTOMER: &str = "Customer";

/// A customer's note to the administrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminMessage {
    pub customer_name: String,
    pub telegram_username: String,
    pub message: String,
}

/// An announcement the administrator sends to every known customer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastMessage {
    pub message: String,
    pub sender_telegram_id: Option<String>,
}

/// Delivery counts returned by the backend after a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastReport {
    pub total_customers: u32,
    pub successful_deliveries: u32,
    pub failed_deliveries: u32,
}

/// Customer profile registered with the backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub telegram_id: String,
    pub name: String,
    pub username: String,
    pub contact: String,
}
