//! Library entrypoint for RustShop.
//!
//! This file exists mainly to make controller tests easy (integration tests
//! under `tests/` can import the app state, routers, controllers, services).

use std::sync::Arc;

pub mod config;
pub mod models;

// Keep this module at crate root because the codebase references it as
// `crate::auth`.
#[path = "middleware/auth.rs"]
pub mod auth;

pub mod events;
pub mod sync;

pub mod services;
pub mod controllers;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub events: Arc<events::OrderEvents>,
}
