pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod openapi;
pub mod schema;

use std::error::Error;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{AuthService, InventoryService, OrderService, ProductService, UserService};
use config::Settings;
use errors::AppError;
use handlers::{auth, inventory, orders, products, users};
use infrastructure::{
    DieselCustomerRepository, DieselEmployeeRepository, DieselOrderRepository,
    DieselProductRepository,
};
use openapi::ApiDoc;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Build and return an actix-web `Server` bound to `settings.host:settings.port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(pool: DbPool, settings: &Settings) -> std::io::Result<actix_web::dev::Server> {
    let customers = DieselCustomerRepository::new(pool.clone());
    let employees = DieselEmployeeRepository::new(pool.clone());
    let product_repo = DieselProductRepository::new(pool.clone());

    let orders = web::Data::new(OrderService::new(DieselOrderRepository::new(pool)));
    let products = web::Data::new(ProductService::new(product_repo.clone()));
    let inventory = web::Data::new(InventoryService::new(
        product_repo,
        settings.low_stock_threshold,
    ));
    let users = web::Data::new(UserService::new(customers.clone(), employees.clone()));
    let auth = web::Data::new(AuthService::new(customers, employees));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(orders.clone())
            .app_data(products.clone())
            .app_data(inventory.clone())
            .app_data(users.clone())
            .app_data(auth.clone())
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .app_data(
                web::QueryConfig::default()
                    .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
            )
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(api_scope())
    })
    .bind((settings.host.clone(), settings.port))?
    .run())
}

fn api_scope() -> actix_web::Scope {
    web::scope("/api")
        .service(
            web::scope("/transactions")
                .route("", web::post().to(orders::place_order))
                .route("", web::get().to(orders::list_orders))
                .route("/{id}", web::get().to(orders::get_order))
                .route("/{id}/status", web::put().to(orders::update_status)),
        )
        .service(
            web::scope("/products")
                .route("", web::get().to(products::list_products))
                .route("", web::post().to(products::create_product))
                .route("/{id}", web::get().to(products::get_product))
                .route("/{id}", web::put().to(products::update_product))
                .route("/{id}", web::delete().to(products::delete_product)),
        )
        .service(
            web::scope("/inventory")
                .route("", web::get().to(inventory::list_inventory))
                .route("/low-stock", web::get().to(inventory::low_stock))
                .route("/{id}/stock", web::put().to(inventory::update_stock)),
        )
        .service(
            web::scope("/users")
                .route("/customers", web::get().to(users::list_customers))
                .route("/customers", web::post().to(users::create_customer))
                .route("/customers/{id}", web::put().to(users::update_customer))
                .route("/customers/{id}", web::delete().to(users::delete_customer))
                .route("/employees", web::get().to(users::list_employees))
                .route("/employees", web::post().to(users::create_employee))
                .route("/employees/{id}", web::put().to(users::update_employee))
                .route("/employees/{id}", web::delete().to(users::delete_employee)),
        )
        .service(
            web::scope("/auth")
                .route("/login", web::post().to(auth::login))
                .route("/register", web::post().to(auth::register)),
        )
}
