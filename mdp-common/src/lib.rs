//! # MDP Common Library
//!
//! Shared code for the Multi-Domain Platform dashboard including:
//! - Database initialization, schema synchronization, and seeding
//! - Record repositories (datasets, tickets, incidents, CSV staging)
//! - Password hashing and the authentication service
//! - Configuration loading

pub mod auth;
pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
