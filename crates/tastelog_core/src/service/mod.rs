//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the shell layer decoupled from storage details.

pub mod restaurant_service;
