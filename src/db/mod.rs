pub mod connection;
pub mod listings;

pub const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

pub use connection::Database;
pub use listings::save_listings;
