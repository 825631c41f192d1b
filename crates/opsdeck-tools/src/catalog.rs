//! The tool catalog advertised to the reasoning model.
//!
//! One [`ToolDefinition`] per [`ToolCommand`](crate::ToolCommand) variant.
//! The JSON schemas here are the model-facing mirror of the typed argument
//! structs in `command.rs`; keep the two in sync when adding a tool.

use serde::Serialize;
use serde_json::{json, Value};

/// A named, schema-described operation offered to the model.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

fn tool(name: &str, description: &str, parameters: Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    }
}

/// Builds the full tool catalog, in the order the model sees it.
pub fn tool_catalog() -> Vec<ToolDefinition> {
    let mut tools = vec![
        tool(
            "navigate_to_page",
            "Navigates the user to a module page in the ERP UI. Call this first when the \
             user starts a task, e.g. navigate to 'crm' before creating a customer.",
            json!({
                "type": "object",
                "properties": {
                    "target_app": {
                        "type": "string",
                        "enum": ["crm", "inventory", "orders", "hr", "finance", "dashboard"],
                        "description": "The ERP module page to open."
                    }
                },
                "required": ["target_app"]
            }),
        ),
        tool(
            "fill_form_field",
            "Fills one field of the form on the current ERP page, for immediate visual \
             feedback. Use it repeatedly as the user provides information.",
            json!({
                "type": "object",
                "properties": {
                    "target_app": { "type": "string", "description": "Module page the form belongs to." },
                    "field_id": { "type": "string", "description": "Id of the form field to fill." },
                    "value": { "type": "string", "description": "Value to place in the field." }
                },
                "required": ["target_app", "field_id", "value"]
            }),
        ),
    ];

    tools.extend(customer_tools());
    tools.extend(product_tools());
    tools.extend(employee_tools());
    tools.extend(order_tools());
    tools.extend(invoice_tools());
    tools
}

fn customer_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "create_customer",
            "Creates a new customer record.",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "email": { "type": "string" },
                    "company": { "type": "string" },
                    "phone": { "type": "string" },
                    "address": { "type": "string" },
                    "status": { "type": "string", "enum": ["Active", "Lead", "Inactive"] },
                    "lead_score": { "type": "integer" },
                    "notes": { "type": "string" }
                },
                "required": ["name", "email"]
            }),
        ),
        tool(
            "update_customer",
            "Updates an existing customer's details using their record id. Only the \
             provided fields change.",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": { "type": "string" },
                    "name": { "type": "string" },
                    "email": { "type": "string" },
                    "company": { "type": "string" },
                    "phone": { "type": "string" },
                    "address": { "type": "string" },
                    "status": { "type": "string", "enum": ["Active", "Lead", "Inactive"] },
                    "lead_score": { "type": "integer" },
                    "notes": { "type": "string" }
                },
                "required": ["customer_id"]
            }),
        ),
        tool(
            "delete_customer",
            "Deletes a customer using their record id.",
            json!({
                "type": "object",
                "properties": { "customer_id": { "type": "string" } },
                "required": ["customer_id"]
            }),
        ),
        tool(
            "search_customers",
            "Searches existing customers by name, email, or company. Returns the \
             matching records or a not-found message.",
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            }),
        ),
    ]
}

fn product_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "create_product",
            "Creates a new product in the inventory.",
            json!({
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "sku": { "type": "string" },
                    "price": { "type": "number" },
                    "stock_quantity": { "type": "integer" },
                    "category": { "type": "string" },
                    "cost": { "type": "number" },
                    "reorder_level": { "type": "integer" },
                    "description": { "type": "string" }
                },
                "required": ["name", "sku", "price", "stock_quantity"]
            }),
        ),
        tool(
            "update_product",
            "Updates an existing product's details using its record id. Only the \
             provided fields change.",
            json!({
                "type": "object",
                "properties": {
                    "product_id": { "type": "string" },
                    "name": { "type": "string" },
                    "sku": { "type": "string" },
                    "price": { "type": "number" },
                    "stock_quantity": { "type": "integer" },
                    "category": { "type": "string" },
                    "cost": { "type": "number" },
                    "reorder_level": { "type": "integer" },
                    "description": { "type": "string" }
                },
                "required": ["product_id"]
            }),
        ),
        tool(
            "delete_product",
            "Deletes a product from inventory using its record id.",
            json!({
                "type": "object",
                "properties": { "product_id": { "type": "string" } },
                "required": ["product_id"]
            }),
        ),
        tool(
            "search_products",
            "Searches existing products by name or SKU. Returns the matching records \
             or a not-found message.",
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            }),
        ),
    ]
}

fn employee_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "create_employee",
            "Creates a new employee record. employee_id is the human-assigned code \
             (e.g. 'E001'), not a generated id.",
            json!({
                "type": "object",
                "properties": {
                    "employee_id": { "type": "string" },
                    "first_name": { "type": "string" },
                    "last_name": { "type": "string" },
                    "email": { "type": "string" },
                    "position": { "type": "string" },
                    "department": { "type": "string" },
                    "phone": { "type": "string" },
                    "hire_date": { "type": "string", "description": "YYYY-MM-DD" },
                    "salary": { "type": "number" },
                    "status": { "type": "string", "enum": ["Active", "On Leave"] }
                },
                "required": ["employee_id", "first_name", "last_name", "email", "position"]
            }),
        ),
        tool(
            "update_employee",
            "Updates an existing employee using their employee code (e.g. 'E001'). \
             Only the provided fields change.",
            json!({
                "type": "object",
                "properties": {
                    "employee_id": { "type": "string", "description": "Employee code, e.g. 'E001'." },
                    "first_name": { "type": "string" },
                    "last_name": { "type": "string" },
                    "email": { "type": "string" },
                    "position": { "type": "string" },
                    "department": { "type": "string" },
                    "phone": { "type": "string" },
                    "hire_date": { "type": "string", "description": "YYYY-MM-DD" },
                    "salary": { "type": "number" },
                    "status": { "type": "string", "enum": ["Active", "On Leave"] }
                },
                "required": ["employee_id"]
            }),
        ),
        tool(
            "delete_employee",
            "Deletes an employee using their employee code (e.g. 'E001').",
            json!({
                "type": "object",
                "properties": { "employee_id": { "type": "string" } },
                "required": ["employee_id"]
            }),
        ),
        tool(
            "search_employees",
            "Searches existing employees by first name, last name, or email. Returns \
             the matching records or a not-found message.",
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            }),
        ),
    ]
}

fn order_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "create_order",
            "Creates a new customer order.",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": { "type": "string" },
                    "order_date": { "type": "string", "description": "YYYY-MM-DD" },
                    "total_amount": { "type": "number" },
                    "status": { "type": "string", "enum": ["Pending", "Processing", "Shipped", "Delivered"] },
                    "shipping_address": { "type": "string" },
                    "notes": { "type": "string" }
                },
                "required": ["customer_id", "order_date", "total_amount"]
            }),
        ),
        tool(
            "update_order",
            "Updates an existing order using its record id. Only the provided fields \
             change.",
            json!({
                "type": "object",
                "properties": {
                    "order_id": { "type": "string" },
                    "customer_id": { "type": "string" },
                    "order_date": { "type": "string" },
                    "total_amount": { "type": "number" },
                    "status": { "type": "string", "enum": ["Pending", "Processing", "Shipped", "Delivered"] },
                    "shipping_address": { "type": "string" },
                    "notes": { "type": "string" }
                },
                "required": ["order_id"]
            }),
        ),
        tool(
            "delete_order",
            "Deletes an order using its record id.",
            json!({
                "type": "object",
                "properties": { "order_id": { "type": "string" } },
                "required": ["order_id"]
            }),
        ),
        tool(
            "search_orders",
            "Searches existing orders by customer id or status. Returns the matching \
             records or a not-found message.",
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            }),
        ),
    ]
}

fn invoice_tools() -> Vec<ToolDefinition> {
    vec![
        tool(
            "create_invoice",
            "Creates a new invoice. The invoice number is generated automatically.",
            json!({
                "type": "object",
                "properties": {
                    "customer_id": { "type": "string" },
                    "issue_date": { "type": "string", "description": "YYYY-MM-DD" },
                    "due_date": { "type": "string", "description": "YYYY-MM-DD" },
                    "total_amount": { "type": "number" },
                    "order_id": { "type": "string" },
                    "paid_amount": { "type": "number" },
                    "status": { "type": "string", "enum": ["Pending", "Paid", "Overdue", "Cancelled"] }
                },
                "required": ["customer_id", "issue_date", "due_date", "total_amount"]
            }),
        ),
        tool(
            "update_invoice",
            "Updates an existing invoice using its record id. Only the provided \
             fields change.",
            json!({
                "type": "object",
                "properties": {
                    "invoice_id": { "type": "string" },
                    "customer_id": { "type": "string" },
                    "issue_date": { "type": "string" },
                    "due_date": { "type": "string" },
                    "total_amount": { "type": "number" },
                    "paid_amount": { "type": "number" },
                    "status": { "type": "string", "enum": ["Pending", "Paid", "Overdue", "Cancelled"] }
                },
                "required": ["invoice_id"]
            }),
        ),
        tool(
            "delete_invoice",
            "Deletes an invoice using its record id.",
            json!({
                "type": "object",
                "properties": { "invoice_id": { "type": "string" } },
                "required": ["invoice_id"]
            }),
        ),
        tool(
            "search_invoices",
            "Searches existing invoices by invoice number or customer id. Returns the \
             matching records or a not-found message.",
            json!({
                "type": "object",
                "properties": { "query": { "type": "string" } },
                "required": ["query"]
            }),
        ),
    ]
}
