use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::{money, Money, Products};
use crate::domain::product::{Product, ProductFilter, ProductInput, ProductSort};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortParam {
    Name,
    PriceAsc,
    PriceDesc,
    Stock,
}

impl From<SortParam> for ProductSort {
    fn from(s: SortParam) -> Self {
        match s {
            SortParam::Name => ProductSort::Name,
            SortParam::PriceAsc => ProductSort::PriceAsc,
            SortParam::PriceDesc => ProductSort::PriceDesc,
            SortParam::Stock => ProductSort::Stock,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsParams {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Exact category.
    pub category: Option<String>,
    /// name (default), price_asc, price_desc or stock.
    pub sort: Option<SortParam>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Decimal string such as "19.99"; a JSON number is also accepted.
    #[schema(value_type = String)]
    pub price: Money,
    #[serde(default)]
    pub stock_quantity: i32,
    pub supplier: Option<String>,
}

impl ProductRequest {
    fn into_input(self) -> Result<ProductInput, AppError> {
        Ok(ProductInput {
            price: self.price.parse("price")?,
            name: self.name,
            category: self.category,
            description: self.description,
            stock_quantity: self.stock_quantity,
            supplier: self.supplier,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: String,
    pub stock_quantity: i32,
    pub supplier: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            price: money(&p.price),
            id: p.id,
            name: p.name,
            category: p.category,
            description: p.description,
            stock_quantity: p.stock_quantity,
            supplier: p.supplier,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

pub(crate) fn to_responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

/// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    params(ListProductsParams),
    responses(
        (status = 200, description = "Matching products", body = [ProductResponse]),
        (status = 400, description = "Unknown sort key"),
    ),
    tag = "products"
)]
pub async fn list_products(
    products: web::Data<Products>,
    query: web::Query<ListProductsParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let filter = ProductFilter {
        search: params.search,
        category: params.category,
        sort: params.sort.map(ProductSort::from).unwrap_or_default(),
    };

    let found = web::block(move || products.list(filter)).await??;

    Ok(HttpResponse::Ok().json(to_responses(found)))
}

/// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    products: web::Data<Products>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let product = web::block(move || products.get(id)).await??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid product"),
    ),
    tag = "products"
)]
pub async fn create_product(
    products: web::Data<Products>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let input = body.into_inner().into_input()?;

    let product = web::block(move || products.create(input)).await??;

    Ok(HttpResponse::Created().json(ProductResponse::from(product)))
}

/// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    products: web::Data<Products>,
    path: web::Path<Uuid>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = body.into_inner().into_input()?;

    let product = web::block(move || products.update(id, input)).await??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}

/// DELETE /api/products/{id}
///
/// Products already referenced by order lines cannot be deleted (409).
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "Product appears on existing orders"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    products: web::Data<Products>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    web::block(move || products.delete(id)).await??;

    Ok(HttpResponse::NoContent().finish())
}
