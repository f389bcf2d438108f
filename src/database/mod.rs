//! PostgreSQL connection and schema migrations.

pub mod connection;

pub use connection::DatabaseConnection;
