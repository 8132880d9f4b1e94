//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the GraphQL layer decoupled from storage details.

pub mod music_service;
