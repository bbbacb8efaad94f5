//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_feature_catalog_repository;
mod in_memory_label_repository;
mod in_memory_permission_repository;
mod in_memory_timestamp;
mod postgres_audit_repository;
mod postgres_feature_catalog_repository;
mod postgres_label_repository;
mod postgres_permission_repository;

#[cfg(test)]
mod postgres_test_support;

pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_feature_catalog_repository::InMemoryFeatureCatalogRepository;
pub use in_memory_label_repository::InMemoryLabelRepository;
pub use in_memory_permission_repository::InMemoryPermissionRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_feature_catalog_repository::PostgresFeatureCatalogRepository;
pub use postgres_label_repository::PostgresLabelRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
