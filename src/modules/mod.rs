pub mod admin;
pub mod health;
pub mod navigation;
pub mod permissions;
pub mod workflow;
