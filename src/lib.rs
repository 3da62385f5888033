pub mod auth;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod settings;
pub mod templates_structs;
