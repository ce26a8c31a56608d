pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod payments;
pub mod state;
pub mod store;
pub mod users;
