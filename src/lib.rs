//! TinyLink - A minimalist URL shortener service
//!
//! This library provides the core functionality for the TinyLink service:
//! short alphanumeric codes mapping to target URLs, HTTP 302 redirection
//! with atomic click tracking, and an admin REST API.
//!
//! # Architecture
//! - `storage`: Link store backed by sea-orm (SQLite/PostgreSQL/MySQL)
//! - `services`: HTTP handlers (redirect, admin API, health)
//! - `config`: Environment-driven configuration
//! - `system`: Logging initialization
//! - `utils`: Code generation, code shape and URL validation

pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
