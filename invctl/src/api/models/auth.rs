//! API request/response models for authentication.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::models::MessageResponse;

/// Login credentials. Fields are optional so an incomplete body produces
/// a clean 400 from the handler instead of a deserialization rejection.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Successful login body. The token is returned for header-based clients
/// in addition to being set as the session cookie.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginBody {
    pub message: String,
    pub token: String,
}

/// Login response: JSON body plus the session cookie.
#[derive(Debug)]
pub struct LoginResponse {
    pub body: LoginBody,
    pub cookie: String,
}

impl IntoResponse for LoginResponse {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, Json(self.body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        response
    }
}

/// Logout response: JSON body plus the clearing cookie.
#[derive(Debug)]
pub struct LogoutResponse {
    pub body: MessageResponse,
    pub cookie: String,
}

impl IntoResponse for LogoutResponse {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::OK, Json(self.body)).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.cookie) {
            response.headers_mut().insert(header::SET_COOKIE, value);
        }
        response
    }
}
