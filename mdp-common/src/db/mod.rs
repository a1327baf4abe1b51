//! Database layer: initialization, schema evolution, and repositories

pub mod csv_staging;
pub mod datasets;
pub mod incidents;
pub mod init;
pub mod models;
pub mod schema_sync;
pub mod seed;
pub mod table_schemas;
pub mod tickets;
pub mod users;

pub use init::init_database;
