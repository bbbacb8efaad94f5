mod catalog;
mod inputs;
mod matrix;
mod records;
mod repositories;

pub use catalog::FeatureWithActions;
pub use inputs::{PermissionGrantInput, ProvisionPermissionInput};
pub use matrix::{PermissionMatrixAction, PermissionMatrixFeature};
pub use records::{PermissionRecord, UpsertedPermission};
pub use repositories::{FeatureCatalogRepository, PermissionRepository};
