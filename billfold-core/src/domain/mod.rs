//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O or external dependencies.

mod account;
mod payment;
mod status;
pub mod result;

pub use account::{AccountDocument, Billing, UsageRecord, UserProfile};
pub use payment::PaymentMethod;
pub use status::{Existence, SyncStatus};
