//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod feature;
mod label;
mod permission;
mod security;

pub use feature::{Feature, FeatureAction};
pub use label::LabelName;
pub use permission::{ActionGrantRecord, ActionGrants, PermissionUniqueId};
pub use security::AuditAction;
