//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate analysis, translation and repository calls into use-case
//!   level APIs.
//! - Keep the API facade decoupled from storage details.

pub mod string_service;
