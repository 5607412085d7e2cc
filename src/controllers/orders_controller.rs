use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{CurrentUser, OrderStatus},
    services::order_service::{self, NewOrderItem, OrderError},
    AppState,
};

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "authentication required" })),
    )
        .into_response()
}

pub fn order_error_response(err: OrderError) -> Response {
    match err {
        OrderError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "order not found" })),
        )
            .into_response(),
        OrderError::Forbidden => (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "operator authority required" })),
        )
            .into_response(),
        // stale-UI hint: the caller should refetch the order and recompute
        // the legal next status rather than resend this request
        OrderError::IllegalTransition { from, requested } => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "illegal transition",
                "current_status": from,
                "requested_status": requested,
            })),
        )
            .into_response(),
        OrderError::NoItems => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "no order items" })),
        )
            .into_response(),
        OrderError::Store(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": format!("store unavailable: {e}") })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
pub struct UpdateStatusBody {
    pub status: OrderStatus,
}

// PUT /orders/:id/status
pub async fn put_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<UpdateStatusBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let Ok(order_id) = ObjectId::parse_str(&id) else {
        return order_error_response(OrderError::NotFound);
    };

    match order_service::update_status(&state, order_id, body.status, &u).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => order_error_response(e),
    }
}

#[derive(Deserialize)]
pub struct NewOrderItemBody {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: f64,
    pub qty: i64,
}

#[derive(Deserialize)]
pub struct CreateOrderBody {
    pub items: Vec<NewOrderItemBody>,
}

// POST /orders
pub async fn post_order(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
    Json(body): Json<CreateOrderBody>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let mut items = Vec::with_capacity(body.items.len());
    for item in body.items {
        let Ok(product_id) = ObjectId::parse_str(&item.product_id) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid product id: {}", item.product_id) })),
            )
                .into_response();
        };
        if item.qty <= 0 || item.price < 0.0 {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid item quantity or price" })),
            )
                .into_response();
        }
        items.push(NewOrderItem {
            product_id,
            name: item.name,
            image: item.image,
            price: item.price,
            qty: item.qty,
        });
    }

    match order_service::create_order(&state, items, Some(&u)).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => order_error_response(e),
    }
}

// GET /orders  (operator snapshot, newest first)
pub async fn get_orders(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    if !u.is_admin {
        return order_error_response(OrderError::Forbidden);
    }

    match order_service::list_all(&state).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => order_error_response(e),
    }
}

// GET /orders/mine  (customer snapshot, newest first)
pub async fn get_my_orders(
    State(state): State<AppState>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    match order_service::list_for_user(&state, u.id).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => order_error_response(e),
    }
}

// GET /orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    user: Option<Extension<CurrentUser>>,
) -> Response {
    let Some(Extension(u)) = user else {
        return unauthorized();
    };

    let Ok(order_id) = ObjectId::parse_str(&id) else {
        return order_error_response(OrderError::NotFound);
    };

    match order_service::get_order(&state, order_id).await {
        Ok(order) => {
            if !u.is_admin && order.user_id != Some(u.id) {
                return order_error_response(OrderError::Forbidden);
            }
            (StatusCode::OK, Json(order)).into_response()
        }
        Err(e) => order_error_response(e),
    }
}
