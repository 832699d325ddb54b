//! Account document domain model

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::payment::PaymentMethod;
use crate::domain::result::{Error, Result};

/// The persisted account document
///
/// One JSON document per account, stored at a well-known path. Field
/// names follow the wire format (camelCase). Structural equality via
/// the derived `PartialEq` is what suppresses redundant snapshot
/// replacements: sequences compare order-sensitively, records field by
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDocument {
    pub user: UserProfile,
    /// Display order; insertion order preserving
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
    /// Read-only to this core
    pub billing: Billing,
}

/// User profile section of the account document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// File reference within the account's store, when a picture is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Billing section of the account document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub balance: Decimal,
    pub currency: String,
    #[serde(default)]
    pub usage_history: Vec<UsageRecord>,
}

/// A single entry in the billing usage history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
}

impl AccountDocument {
    /// Parse and validate a raw store value into a typed document
    ///
    /// Fails with `InvalidDocument` on either schema mismatch or a
    /// violated document invariant.
    pub fn from_raw(raw: JsonValue) -> Result<Self> {
        let doc: AccountDocument =
            serde_json::from_value(raw).map_err(|e| Error::invalid_document(e.to_string()))?;
        doc.validate().map_err(Error::invalid_document)?;
        Ok(doc)
    }

    /// Validate document invariants
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.user.name.trim().is_empty() {
            return Err("user name cannot be empty");
        }
        if self.billing.currency.trim().is_empty() {
            return Err("billing currency cannot be empty");
        }
        let mut seen = HashSet::new();
        for method in &self.payment_methods {
            if !seen.insert(method.id.as_str()) {
                return Err("payment method ids must be unique");
            }
        }
        Ok(())
    }

    /// Demo document matching the hosted app's placeholder account
    pub fn demo() -> Self {
        Self {
            user: UserProfile {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                profile_picture: None,
            },
            payment_methods: vec![PaymentMethod {
                id: "ethereum1".to_string(),
                kind: "ethereum".to_string(),
                name: "Ethereum Wallet".to_string(),
                value: "0x123...abc".to_string(),
                is_connected: true,
            }],
            billing: Billing {
                balance: Decimal::new(25, 0),
                currency: "USD".to_string(),
                usage_history: Vec::new(),
            },
        }
    }
}
