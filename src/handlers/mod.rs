// src/handlers/mod.rs
pub mod contacts;
pub mod dashboard;
pub mod deposits;
pub mod error;
pub mod loans;
pub mod members;
pub mod notices;
pub mod timeline;
