// src/lib.rs
pub mod client;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod store;
