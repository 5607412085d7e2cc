pub mod auth_controller;
pub mod home_controller;
pub mod orders_controller;
pub mod realtime_controller;
