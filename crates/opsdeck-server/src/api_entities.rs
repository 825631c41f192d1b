//! REST CRUD handlers over the entity store.
//!
//! Thin mapping code: deserialize, call the store, translate the error.
//! Create returns `201` with the full record; a missing required field is
//! `400`; an unknown id is `404`. Lists return full records with `null`
//! for absent fields.

use crate::AppState;
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::Json,
};
use opsdeck_store::{
    CustomerPatch, DashboardMetrics, EmployeePatch, InvoicePatch, NewCustomer, NewEmployee,
    NewInvoice, NewOrder, NewProduct, OrderPatch, ProductPatch, StoreError,
};
use opsdeck_types::{Customer, Employee, Invoice, Order, Product};
use std::sync::Arc;

/// Maps a [`StoreError`] to the HTTP status code.
fn store_err_to_status(e: StoreError) -> StatusCode {
    match e {
        StoreError::MissingField(_) => StatusCode::BAD_REQUEST,
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Duplicate { .. } => StatusCode::CONFLICT,
    }
}

/// GET /api/dashboard
pub async fn dashboard_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<DashboardMetrics> {
    Json(state.store.dashboard_metrics())
}

// ── Customers ────────────────────────────────────────────────────────

/// GET /api/customers
pub async fn list_customers_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Customer>> {
    Json(state.store.list_customers())
}

/// POST /api/customers
pub async fn create_customer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), StatusCode> {
    state
        .store
        .add_customer(payload)
        .map(|c| (StatusCode::CREATED, Json(c)))
        .map_err(store_err_to_status)
}

/// PUT /api/customers/{id}
pub async fn update_customer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<CustomerPatch>,
) -> Result<Json<Customer>, StatusCode> {
    state
        .store
        .update_customer(&id, patch)
        .map(Json)
        .map_err(store_err_to_status)
}

/// DELETE /api/customers/{id}
pub async fn delete_customer_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, StatusCode> {
    state
        .store
        .delete_customer(&id)
        .map(Json)
        .map_err(store_err_to_status)
}

// ── Products ─────────────────────────────────────────────────────────

/// GET /api/products
pub async fn list_products_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Product>> {
    Json(state.store.list_products())
}

/// POST /api/products
pub async fn create_product_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    state
        .store
        .add_product(payload)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(store_err_to_status)
}

/// PUT /api/products/{id}
pub async fn update_product_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>, StatusCode> {
    state
        .store
        .update_product(&id, patch)
        .map(Json)
        .map_err(store_err_to_status)
}

/// DELETE /api/products/{id}
pub async fn delete_product_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, StatusCode> {
    state
        .store
        .delete_product(&id)
        .map(Json)
        .map_err(store_err_to_status)
}

// ── Employees (looked up by employee code, not internal id) ──────────

/// GET /api/employees
pub async fn list_employees_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Employee>> {
    Json(state.store.list_employees())
}

/// POST /api/employees
pub async fn create_employee_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NewEmployee>,
) -> Result<(StatusCode, Json<Employee>), StatusCode> {
    state
        .store
        .add_employee(payload)
        .map(|e| (StatusCode::CREATED, Json(e)))
        .map_err(store_err_to_status)
}

/// PUT /api/employees/{id}
pub async fn update_employee_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
    Json(patch): Json<EmployeePatch>,
) -> Result<Json<Employee>, StatusCode> {
    state
        .store
        .update_employee(&code, patch)
        .map(Json)
        .map_err(store_err_to_status)
}

/// DELETE /api/employees/{id}
pub async fn delete_employee_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Employee>, StatusCode> {
    state
        .store
        .delete_employee(&code)
        .map(Json)
        .map_err(store_err_to_status)
}

// ── Orders ───────────────────────────────────────────────────────────

/// GET /api/orders
pub async fn list_orders_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Vec<Order>> {
    Json(state.store.list_orders())
}

/// POST /api/orders
pub async fn create_order_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), StatusCode> {
    state
        .store
        .add_order(payload)
        .map(|o| (StatusCode::CREATED, Json(o)))
        .map_err(store_err_to_status)
}

/// PUT /api/orders/{id}
pub async fn update_order_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<OrderPatch>,
) -> Result<Json<Order>, StatusCode> {
    state
        .store
        .update_order(&id, patch)
        .map(Json)
        .map_err(store_err_to_status)
}

/// DELETE /api/orders/{id}
pub async fn delete_order_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, StatusCode> {
    state
        .store
        .delete_order(&id)
        .map(Json)
        .map_err(store_err_to_status)
}

// ── Invoices ─────────────────────────────────────────────────────────

/// GET /api/invoices
pub async fn list_invoices_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<Invoice>> {
    Json(state.store.list_invoices())
}

/// POST /api/invoices
pub async fn create_invoice_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<NewInvoice>,
) -> Result<(StatusCode, Json<Invoice>), StatusCode> {
    state
        .store
        .add_invoice(payload)
        .map(|i| (StatusCode::CREATED, Json(i)))
        .map_err(store_err_to_status)
}

/// PUT /api/invoices/{id}
pub async fn update_invoice_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<InvoicePatch>,
) -> Result<Json<Invoice>, StatusCode> {
    state
        .store
        .update_invoice(&id, patch)
        .map(Json)
        .map_err(store_err_to_status)
}

/// DELETE /api/invoices/{id}
pub async fn delete_invoice_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Invoice>, StatusCode> {
    state
        .store
        .delete_invoice(&id)
        .map(Json)
        .map_err(store_err_to_status)
}
