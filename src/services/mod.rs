pub mod db_init;

pub mod auth_service;
pub mod order_service;
