//! The closed command set and its typed argument structs.
//!
//! [`ToolCommand::parse`] is the single entry point from model output
//! (tool name + JSON arguments) to an executable command. Required fields
//! are required by the types themselves, so a call that withholds one
//! fails here, before anything touches the store or the broadcast
//! channel.

use crate::error::ToolError;
use opsdeck_store::{
    CustomerPatch, EmployeePatch, InvoicePatch, OrderPatch, ProductPatch,
};
use opsdeck_types::{CustomerStatus, EmployeeStatus, InvoiceStatus, OrderStatus, TargetApp};
use serde::Deserialize;

/// Arguments for `navigate_to_page`. Deserializing validates the target
/// against the closed [`TargetApp`] set.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigateArgs {
    pub target_app: TargetApp,
}

/// Arguments for `fill_form_field`. `field_id` is deliberately not
/// validated; clients ignore ids they do not render.
#[derive(Debug, Clone, Deserialize)]
pub struct FillFormFieldArgs {
    pub target_app: String,
    pub field_id: String,
    pub value: String,
}

/// Arguments for the per-entity delete tools. The catalog advertises an
/// entity-specific key name (`customer_id`, `invoice_id`, ...); all of
/// them land on the same lookup id.
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteArgs {
    #[serde(
        alias = "customer_id",
        alias = "product_id",
        alias = "employee_id",
        alias = "order_id",
        alias = "invoice_id"
    )]
    pub id: String,
}

/// Arguments for the per-entity search tools.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCustomerArgs {
    pub name: String,
    pub email: String,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<CustomerStatus>,
    pub lead_score: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCustomerArgs {
    pub customer_id: String,
    #[serde(flatten)]
    pub patch: CustomerPatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductArgs {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub stock_quantity: i64,
    pub category: Option<String>,
    pub cost: Option<f64>,
    pub reorder_level: Option<i64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductArgs {
    pub product_id: String,
    #[serde(flatten)]
    pub patch: ProductPatch,
}

/// `employee_id` is the human-assigned code (e.g. `E001`), not the
/// internal record id — the code is what users say and what the HR page
/// shows.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeArgs {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEmployeeArgs {
    pub employee_id: String,
    #[serde(flatten)]
    pub patch: EmployeePatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderArgs {
    pub customer_id: String,
    pub order_date: String,
    pub total_amount: f64,
    pub status: Option<OrderStatus>,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderArgs {
    pub order_id: String,
    #[serde(flatten)]
    pub patch: OrderPatch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceArgs {
    pub customer_id: String,
    pub issue_date: String,
    pub due_date: String,
    pub total_amount: f64,
    pub order_id: Option<String>,
    pub paid_amount: Option<f64>,
    pub status: Option<InvoiceStatus>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInvoiceArgs {
    pub invoice_id: String,
    #[serde(flatten)]
    pub patch: InvoicePatch,
}

/// One executable command per catalog tool.
#[derive(Debug, Clone)]
pub enum ToolCommand {
    NavigateToPage(NavigateArgs),
    FillFormField(FillFormFieldArgs),
    CreateCustomer(CreateCustomerArgs),
    UpdateCustomer(UpdateCustomerArgs),
    DeleteCustomer(DeleteArgs),
    SearchCustomers(SearchArgs),
    CreateProduct(CreateProductArgs),
    UpdateProduct(UpdateProductArgs),
    DeleteProduct(DeleteArgs),
    SearchProducts(SearchArgs),
    CreateEmployee(CreateEmployeeArgs),
    UpdateEmployee(UpdateEmployeeArgs),
    DeleteEmployee(DeleteArgs),
    SearchEmployees(SearchArgs),
    CreateOrder(CreateOrderArgs),
    UpdateOrder(UpdateOrderArgs),
    DeleteOrder(DeleteArgs),
    SearchOrders(SearchArgs),
    CreateInvoice(CreateInvoiceArgs),
    UpdateInvoice(UpdateInvoiceArgs),
    DeleteInvoice(DeleteArgs),
    SearchInvoices(SearchArgs),
}

impl ToolCommand {
    /// Maps a model tool call (name + JSON argument string) onto a typed
    /// command. Total over the catalog: anything outside it, or arguments
    /// that do not satisfy the schema, is an error with no side effect.
    pub fn parse(name: &str, arguments: &str) -> Result<Self, ToolError> {
        let raw = if arguments.trim().is_empty() { "{}" } else { arguments };
        let invalid = |e: serde_json::Error| ToolError::InvalidArguments {
            tool: name.to_string(),
            reason: e.to_string(),
        };

        match name {
            "navigate_to_page" => serde_json::from_str(raw).map(Self::NavigateToPage).map_err(invalid),
            "fill_form_field" => serde_json::from_str(raw).map(Self::FillFormField).map_err(invalid),
            "create_customer" => serde_json::from_str(raw).map(Self::CreateCustomer).map_err(invalid),
            "update_customer" => serde_json::from_str(raw).map(Self::UpdateCustomer).map_err(invalid),
            "delete_customer" => serde_json::from_str(raw).map(Self::DeleteCustomer).map_err(invalid),
            "search_customers" => serde_json::from_str(raw).map(Self::SearchCustomers).map_err(invalid),
            "create_product" => serde_json::from_str(raw).map(Self::CreateProduct).map_err(invalid),
            "update_product" => serde_json::from_str(raw).map(Self::UpdateProduct).map_err(invalid),
            "delete_product" => serde_json::from_str(raw).map(Self::DeleteProduct).map_err(invalid),
            "search_products" => serde_json::from_str(raw).map(Self::SearchProducts).map_err(invalid),
            "create_employee" => serde_json::from_str(raw).map(Self::CreateEmployee).map_err(invalid),
            "update_employee" => serde_json::from_str(raw).map(Self::UpdateEmployee).map_err(invalid),
            "delete_employee" => serde_json::from_str(raw).map(Self::DeleteEmployee).map_err(invalid),
            "search_employees" => serde_json::from_str(raw).map(Self::SearchEmployees).map_err(invalid),
            "create_order" => serde_json::from_str(raw).map(Self::CreateOrder).map_err(invalid),
            "update_order" => serde_json::from_str(raw).map(Self::UpdateOrder).map_err(invalid),
            "delete_order" => serde_json::from_str(raw).map(Self::DeleteOrder).map_err(invalid),
            "search_orders" => serde_json::from_str(raw).map(Self::SearchOrders).map_err(invalid),
            "create_invoice" => serde_json::from_str(raw).map(Self::CreateInvoice).map_err(invalid),
            "update_invoice" => serde_json::from_str(raw).map(Self::UpdateInvoice).map_err(invalid),
            "delete_invoice" => serde_json::from_str(raw).map(Self::DeleteInvoice).map_err(invalid),
            "search_invoices" => serde_json::from_str(raw).map(Self::SearchInvoices).map_err(invalid),
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Returns the catalog name of this command.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NavigateToPage(_) => "navigate_to_page",
            Self::FillFormField(_) => "fill_form_field",
            Self::CreateCustomer(_) => "create_customer",
            Self::UpdateCustomer(_) => "update_customer",
            Self::DeleteCustomer(_) => "delete_customer",
            Self::SearchCustomers(_) => "search_customers",
            Self::CreateProduct(_) => "create_product",
            Self::UpdateProduct(_) => "update_product",
            Self::DeleteProduct(_) => "delete_product",
            Self::SearchProducts(_) => "search_products",
            Self::CreateEmployee(_) => "create_employee",
            Self::UpdateEmployee(_) => "update_employee",
            Self::DeleteEmployee(_) => "delete_employee",
            Self::SearchEmployees(_) => "search_employees",
            Self::CreateOrder(_) => "create_order",
            Self::UpdateOrder(_) => "update_order",
            Self::DeleteOrder(_) => "delete_order",
            Self::SearchOrders(_) => "search_orders",
            Self::CreateInvoice(_) => "create_invoice",
            Self::UpdateInvoice(_) => "update_invoice",
            Self::DeleteInvoice(_) => "delete_invoice",
            Self::SearchInvoices(_) => "search_invoices",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_navigate_validates_target_app() {
        let command = ToolCommand::parse("navigate_to_page", r#"{"target_app": "inventory"}"#)
            .expect("valid target must parse");
        assert!(matches!(
            command,
            ToolCommand::NavigateToPage(NavigateArgs {
                target_app: TargetApp::Inventory
            })
        ));

        let err = ToolCommand::parse("navigate_to_page", r#"{"target_app": "warehouse"}"#)
            .expect_err("unknown target must fail");
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn parse_rejects_unknown_tool() {
        let err = ToolCommand::parse("reboot_warehouse", "{}").expect_err("must fail");
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "reboot_warehouse"));
    }

    #[test]
    fn parse_create_customer_requires_name_and_email() {
        let err = ToolCommand::parse("create_customer", r#"{"name": "Acme"}"#)
            .expect_err("missing email must fail");
        match err {
            ToolError::InvalidArguments { tool, reason } => {
                assert_eq!(tool, "create_customer");
                assert!(reason.contains("email"), "reason should name the field: {}", reason);
            }
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn parse_empty_arguments_as_empty_object() {
        // Some models send "" instead of "{}" for no-argument calls; the
        // search tools still require their query.
        let err = ToolCommand::parse("search_customers", "").expect_err("query is required");
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn parse_delete_accepts_entity_specific_key() {
        let command = ToolCommand::parse("delete_invoice", r#"{"invoice_id": "inv001"}"#)
            .expect("entity key must parse");
        match command {
            ToolCommand::DeleteInvoice(args) => assert_eq!(args.id, "inv001"),
            other => panic!("expected DeleteInvoice, got {:?}", other),
        }
    }

    #[test]
    fn parse_update_flattens_patch_fields() {
        let command = ToolCommand::parse(
            "update_product",
            r#"{"product_id": "prod001", "price": 199.99}"#,
        )
        .expect("must parse");
        match command {
            ToolCommand::UpdateProduct(args) => {
                assert_eq!(args.product_id, "prod001");
                assert_eq!(args.patch.price, Some(199.99));
                assert!(args.patch.name.is_none());
            }
            other => panic!("expected UpdateProduct, got {:?}", other),
        }
    }
}
