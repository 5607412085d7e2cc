use axum::{Router, routing::{get, put}};

use crate::{AppState, controllers::orders_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/orders", get(orders_controller::get_orders).post(orders_controller::post_order))
        .route("/orders/mine", get(orders_controller::get_my_orders))
        .route("/orders/:id", get(orders_controller::get_order))
        .route("/orders/:id/status", put(orders_controller::put_order_status))
}
