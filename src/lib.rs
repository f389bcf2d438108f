//! Fleet back office: users, drivers, trucks, clients, trips and their
//! expenses, plus per-entity reports, served over a cookie-authenticated
//! JSON API.

pub mod config;
pub mod database;
pub mod docs;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
