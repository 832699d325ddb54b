//! Payment method domain model

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Counter for generating unique IDs within the same millisecond
static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a document-unique payment method ID from the payment type
/// plus a timestamp.
///
/// Lower 48 bits carry the millisecond timestamp, upper 16 bits a
/// process-wide counter, so IDs created in the same millisecond never
/// collide.
fn generate_id(kind: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64;

    let counter = ID_COUNTER.fetch_add(1, Ordering::Relaxed) & 0xFFFF;
    format!("{}{}", kind, (timestamp << 16) | counter)
}

/// A payment method attached to the account
///
/// Note: `kind` is a freeform string on the wire (`"type"` key). Known
/// values are "ethereum", "wise" and "bank"; any other string is
/// accepted and rendered with a generic display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Unique within the document; assigned at creation, never reused
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Display name derived from the payment type
    pub name: String,
    /// Address or account identifier
    pub value: String,
    pub is_connected: bool,
}

impl PaymentMethod {
    /// Create a new payment method with a fresh unique ID
    ///
    /// New methods start connected.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            id: generate_id(&kind),
            name: Self::display_name(&kind).to_string(),
            kind,
            value: value.into(),
            is_connected: true,
        }
    }

    /// Derive the display name for a payment type
    pub fn display_name(kind: &str) -> &'static str {
        match kind {
            "ethereum" => "Ethereum Wallet",
            "wise" => "Wise Account",
            "bank" => "Bank Account",
            _ => "Payment Method",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_mapping() {
        assert_eq!(PaymentMethod::display_name("ethereum"), "Ethereum Wallet");
        assert_eq!(PaymentMethod::display_name("wise"), "Wise Account");
        assert_eq!(PaymentMethod::display_name("bank"), "Bank Account");
        assert_eq!(PaymentMethod::display_name("paypal"), "Payment Method");
    }

    #[test]
    fn test_new_method_starts_connected() {
        let method = PaymentMethod::new("wise", "wise-acct-1");
        assert!(method.is_connected);
        assert_eq!(method.name, "Wise Account");
        assert_eq!(method.value, "wise-acct-1");
        assert!(method.id.starts_with("wise"));
    }

    #[test]
    fn test_rapid_creation_yields_distinct_ids() {
        let a = PaymentMethod::new("bank", "acct-1");
        let b = PaymentMethod::new("bank", "acct-2");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_wire_format_uses_type_key() {
        let method = PaymentMethod::new("bank", "acct-1");
        let value = serde_json::to_value(&method).unwrap();
        assert_eq!(value["type"], "bank");
        assert_eq!(value["isConnected"], true);
        assert!(value.get("kind").is_none());
    }
}
