use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::users::CustomerRequest;
use super::{Auth, Users};
use crate::domain::user::{CustomerInput, Principal};
use crate::errors::AppError;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// "Employee" or "Customer".
    pub user_type: String,
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl From<Principal> for LoginResponse {
    fn from(p: Principal) -> Self {
        LoginResponse {
            user_type: p.user_type.as_str().to_string(),
            id: p.id,
            name: p.name,
            role: p.role,
        }
    }
}

/// POST /api/auth/login
///
/// Employees are matched before customers. Any failure yields the same 401
/// body.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid email or password"),
    ),
    tag = "auth"
)]
pub async fn login(
    auth: web::Data<Auth>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let LoginRequest { email, password } = body.into_inner();

    let principal = web::block(move || auth.login(&email, &password)).await??;

    Ok(HttpResponse::Ok().json(LoginResponse::from(principal)))
}

/// POST /api/auth/register
///
/// Self-service customer sign-up.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer registered", body = LoginResponse),
        (status = 400, description = "Invalid input or email already registered"),
    ),
    tag = "auth"
)]
pub async fn register(
    users: web::Data<Users>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let input = CustomerInput::from(body.into_inner());

    let customer = web::block(move || users.create_customer(input)).await??;

    Ok(HttpResponse::Ok().json(LoginResponse::from(Principal::from(&customer))))
}
