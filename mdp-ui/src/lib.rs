//! mdp-ui library - HTTP front door for the Multi-Domain Platform
//!
//! The binary in `main.rs` wires CLI arguments and database startup around
//! the router built here; tests drive the router directly.

pub mod api;
pub mod assistant;
