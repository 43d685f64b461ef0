pub mod config;
pub mod error;
pub mod models;
pub mod panel;
pub mod routes;
pub mod services;
pub mod state;
pub mod views;
