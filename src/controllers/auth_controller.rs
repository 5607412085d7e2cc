use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::CookieJar;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;

use crate::{models::CurrentUser, services::auth_service, AppState};

fn is_valid_email(email: &str) -> bool {
    let re = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    re.is_match(email)
}

fn field_errors_response(errs: auth_service::FieldErrors) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "errors": errs }))).into_response()
}

#[derive(Deserialize)]
pub struct RegisterBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

// POST /auth/register
pub async fn post_register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterBody>,
) -> Response {
    let name = body.name.trim().to_string();
    let email = body.email.trim().to_lowercase();
    let password = body.password.trim().to_string();

    let mut errs = auth_service::FieldErrors::new();

    if name.is_empty() {
        errs.insert("name".into(), "Name is required.".into());
    }
    if email.is_empty() {
        errs.insert("email".into(), "Email is required.".into());
    } else if !is_valid_email(&email) {
        errs.insert("email".into(), "Invalid email.".into());
    }
    if password.len() < 6 {
        errs.insert("password".into(), "Password must be at least 6 characters.".into());
    }

    if !errs.is_empty() {
        return field_errors_response(errs);
    }

    let user_id = match auth_service::register_user(&state, &name, &email, &password).await {
        Ok(id) => id,
        Err(errs) => return field_errors_response(errs),
    };

    let token = match auth_service::make_jwt_with_days(&state, &user_id, 30) {
        Ok(t) => t,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("token error: {e}") })),
            )
                .into_response();
        }
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token));

    (
        StatusCode::CREATED,
        jar,
        Json(json!({
            "id": user_id.to_hex(),
            "name": name,
            "email": email,
            "is_admin": false,
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

// POST /auth/login
pub async fn post_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginBody>,
) -> Response {
    let email = body.email.trim().to_lowercase();
    let password = body.password.trim().to_string();

    let mut errs = auth_service::FieldErrors::new();

    if email.is_empty() {
        errs.insert("email".into(), "Email is required.".into());
    } else if !is_valid_email(&email) {
        errs.insert("email".into(), "Invalid email.".into());
    }
    if password.is_empty() {
        errs.insert("password".into(), "Password is required.".into());
    }

    if !errs.is_empty() {
        return field_errors_response(errs);
    }

    let user = match auth_service::login_user(&state, &email, &password).await {
        Ok(u) => u,
        Err(errs) => {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "errors": errs }))).into_response();
        }
    };

    let token = match auth_service::make_jwt_with_days(&state, &user.id, 30) {
        Ok(t) => t,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("token error: {e}") })),
            )
                .into_response();
        }
    };

    let jar = jar.add(auth_service::auth_cookie(&state, token));

    (
        StatusCode::OK,
        jar,
        Json(json!({
            "id": user.id.to_hex(),
            "name": user.name,
            "email": user.email,
            "is_admin": user.is_admin,
        })),
    )
        .into_response()
}

// POST /auth/logout
pub async fn post_logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let jar = jar.add(auth_service::clear_auth_cookie(&state));
    (StatusCode::OK, jar, Json(json!({ "ok": true }))).into_response()
}

// GET /auth/me
pub async fn get_me(user: Option<Extension<CurrentUser>>) -> Response {
    let Some(Extension(u)) = user else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "authentication required" })),
        )
            .into_response();
    };

    (
        StatusCode::OK,
        Json(json!({
            "id": u.id.to_hex(),
            "name": u.name,
            "email": u.email,
            "is_admin": u.is_admin,
        })),
    )
        .into_response()
}
