use utoipa::OpenApi;

use crate::handlers::{auth, inventory, orders, products, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront back office",
        description = "Checkout, catalog, inventory and account management."
    ),
    paths(
        orders::place_order,
        orders::list_orders,
        orders::get_order,
        orders::update_status,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        inventory::list_inventory,
        inventory::low_stock,
        inventory::update_stock,
        users::list_customers,
        users::create_customer,
        users::update_customer,
        users::delete_customer,
        users::list_employees,
        users::create_employee,
        users::update_employee,
        users::delete_employee,
        auth::login,
        auth::register,
    ),
    tags(
        (name = "transactions", description = "Checkout and order history"),
        (name = "products", description = "Catalog maintenance"),
        (name = "inventory", description = "Stock levels"),
        (name = "users", description = "Customers and employees"),
        (name = "auth", description = "Login and registration"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_checkout_route() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/transactions"));
        assert!(doc.paths.paths.contains_key("/api/inventory/{id}/stock"));
    }
}
