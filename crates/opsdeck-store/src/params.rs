//! Create/update parameter types.
//!
//! `New*` structs carry the fields a caller may supply on create; the store
//! fills generated ids and defaults. `*Patch` structs are all-`Option`:
//! `None` means "leave unchanged". For optional entity fields, an empty
//! string clears the value; for required fields an empty string is ignored.

use opsdeck_types::{CustomerStatus, EmployeeStatus, InvoiceStatus, OrderStatus};
use serde::{Deserialize, Serialize};

/// Fields accepted when creating a customer. `name` and `email` are
/// required (enforced by the store, not the type, so REST payloads with
/// empty strings are rejected too).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub status: Option<CustomerStatus>,
    pub lead_score: Option<i64>,
    pub notes: Option<String>,
}

/// Partial update for a customer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub status: Option<CustomerStatus>,
    pub lead_score: Option<i64>,
    pub last_contact: Option<String>,
    pub notes: Option<String>,
}

/// Fields accepted when creating a product. `name`, `sku` and `price` are
/// required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub category: Option<String>,
    pub cost: Option<f64>,
    pub reorder_level: Option<i64>,
    pub supplier_id: Option<String>,
    pub warehouse_location: Option<String>,
    pub description: Option<String>,
}

/// Partial update for a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub category: Option<String>,
    pub cost: Option<f64>,
    pub reorder_level: Option<i64>,
    pub supplier_id: Option<String>,
    pub warehouse_location: Option<String>,
    pub description: Option<String>,
}

/// Fields accepted when creating an employee. The human-assigned
/// `employee_id` code, `first_name` and `email` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
    pub manager_id: Option<String>,
}

/// Partial update for an employee (looked up by `employee_id` code).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
    pub manager_id: Option<String>,
}

/// Fields accepted when creating an order. `customer_id` and
/// `total_amount` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(default)]
    pub customer_id: String,
    pub order_date: Option<String>,
    pub total_amount: Option<f64>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// Partial update for an order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub customer_id: Option<String>,
    pub order_date: Option<String>,
    pub total_amount: Option<f64>,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// Fields accepted when creating an invoice. `customer_id` and
/// `total_amount` are required; `invoice_number` is auto-generated when
/// blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewInvoice {
    #[serde(default)]
    pub customer_id: String,
    pub invoice_number: Option<String>,
    pub order_id: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub total_amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
}

/// Partial update for an invoice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvoicePatch {
    pub customer_id: Option<String>,
    pub invoice_number: Option<String>,
    pub order_id: Option<String>,
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub total_amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
}
