//! Core use-case services.
//!
//! # Responsibility
//! - Startup seeding of the entity store from external records.

pub mod seed_service;
