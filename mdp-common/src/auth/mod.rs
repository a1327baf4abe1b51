//! Authentication: password hashing and the account service

pub mod password;
pub mod service;

pub use service::AuthService;
