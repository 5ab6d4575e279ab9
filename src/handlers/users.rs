use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{PageParams, PageResponse, Users};
use crate::domain::user::{Customer, CustomerInput, Employee, EmployeeInput};
use crate::errors::AppError;

// ── Customers ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    /// Required on create. Leave empty on update to keep the current one.
    #[serde(default)]
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub phone: Option<String>,
}

impl From<CustomerRequest> for CustomerInput {
    fn from(r: CustomerRequest) -> Self {
        CustomerInput {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            password: r.password,
            address: r.address,
            city: r.city,
            state: r.state,
            zipcode: r.zipcode,
            phone: r.phone,
        }
    }
}

/// A customer as returned by the API. The password is never included.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub phone: Option<String>,
    pub registered_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        CustomerResponse {
            id: c.id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            address: c.address,
            city: c.city,
            state: c.state,
            zipcode: c.zipcode,
            phone: c.phone,
            registered_at: c.registered_at.to_rfc3339(),
        }
    }
}

/// GET /api/users/customers
#[utoipa::path(
    get,
    path = "/api/users/customers",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated customers", body = PageResponse<CustomerResponse>),
    ),
    tag = "users"
)]
pub async fn list_customers(
    users: web::Data<Users>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = query.clamped();

    let result = web::block(move || users.list_customers(page, limit)).await??;

    Ok(HttpResponse::Ok().json(PageResponse {
        items: result
            .items
            .into_iter()
            .map(CustomerResponse::from)
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// POST /api/users/customers
#[utoipa::path(
    post,
    path = "/api/users/customers",
    request_body = CustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse),
        (status = 400, description = "Invalid input or email already registered"),
    ),
    tag = "users"
)]
pub async fn create_customer(
    users: web::Data<Users>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let input = CustomerInput::from(body.into_inner());

    let customer = web::block(move || users.create_customer(input)).await??;

    Ok(HttpResponse::Created().json(CustomerResponse::from(customer)))
}

/// PUT /api/users/customers/{id}
#[utoipa::path(
    put,
    path = "/api/users/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    request_body = CustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerResponse),
        (status = 400, description = "Invalid input or email taken by another customer"),
        (status = 404, description = "Customer not found"),
    ),
    tag = "users"
)]
pub async fn update_customer(
    users: web::Data<Users>,
    path: web::Path<Uuid>,
    body: web::Json<CustomerRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = CustomerInput::from(body.into_inner());

    let customer = web::block(move || users.update_customer(id, input)).await??;

    Ok(HttpResponse::Ok().json(CustomerResponse::from(customer)))
}

/// DELETE /api/users/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/users/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 204, description = "Customer deleted"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer has orders"),
    ),
    tag = "users"
)]
pub async fn delete_customer(
    users: web::Data<Users>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || users.delete_customer(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

// ── Employees ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    /// Required on create. Leave empty on update to keep the current one.
    #[serde(default)]
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(r: EmployeeRequest) -> Self {
        EmployeeInput {
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            password: r.password,
            phone: r.phone,
            role: r.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub hired_at: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(e: Employee) -> Self {
        EmployeeResponse {
            id: e.id,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone: e.phone,
            role: e.role,
            hired_at: e.hired_at.to_rfc3339(),
        }
    }
}

/// GET /api/users/employees
#[utoipa::path(
    get,
    path = "/api/users/employees",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated employees", body = PageResponse<EmployeeResponse>),
    ),
    tag = "users"
)]
pub async fn list_employees(
    users: web::Data<Users>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = query.clamped();

    let result = web::block(move || users.list_employees(page, limit)).await??;

    Ok(HttpResponse::Ok().json(PageResponse {
        items: result
            .items
            .into_iter()
            .map(EmployeeResponse::from)
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// POST /api/users/employees
#[utoipa::path(
    post,
    path = "/api/users/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Invalid input or email already registered"),
    ),
    tag = "users"
)]
pub async fn create_employee(
    users: web::Data<Users>,
    body: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let input = EmployeeInput::from(body.into_inner());

    let employee = web::block(move || users.create_employee(input)).await??;

    Ok(HttpResponse::Created().json(EmployeeResponse::from(employee)))
}

/// PUT /api/users/employees/{id}
#[utoipa::path(
    put,
    path = "/api/users/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee UUID")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Invalid input or email taken by another employee"),
        (status = 404, description = "Employee not found"),
    ),
    tag = "users"
)]
pub async fn update_employee(
    users: web::Data<Users>,
    path: web::Path<Uuid>,
    body: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = EmployeeInput::from(body.into_inner());

    let employee = web::block(move || users.update_employee(id, input)).await??;

    Ok(HttpResponse::Ok().json(EmployeeResponse::from(employee)))
}

/// DELETE /api/users/employees/{id}
#[utoipa::path(
    delete,
    path = "/api/users/employees/{id}",
    params(("id" = Uuid, Path, description = "Employee UUID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Employee is on record for existing orders"),
    ),
    tag = "users"
)]
pub async fn delete_employee(
    users: web::Data<Users>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || users.delete_employee(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn customer_response_omits_password() {
        let json = serde_json::to_value(CustomerResponse::from(Customer {
            id: Uuid::nil(),
            first_name: Some("Ann".to_string()),
            last_name: None,
            email: "ann@shop.test".to_string(),
            password: "hunter2".to_string(),
            address: None,
            city: None,
            state: None,
            zipcode: None,
            phone: None,
            registered_at: Utc::now(),
        }))
        .unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["firstName"], "Ann");
    }

    #[test]
    fn employee_request_password_defaults_to_empty() {
        let req: EmployeeRequest = serde_json::from_value(serde_json::json!({
            "email": "pat@shop.test",
            "role": "Cashier"
        }))
        .unwrap();
        assert!(EmployeeInput::from(req).password.is_empty());
    }
}
