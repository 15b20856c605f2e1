// src/services/mod.rs
pub mod store;
pub mod summary;
pub mod timeline;
