//! Shopping list backend: CRUD endpoints for products kept in one SQLite table.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
