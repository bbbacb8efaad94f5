pub mod catalog;
pub mod health;
pub mod labels;
pub mod permissions;
pub mod roles;
