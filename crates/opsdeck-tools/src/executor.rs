//! Command execution against the store and the UI broadcast channel.

use crate::command::{
    CreateCustomerArgs, CreateEmployeeArgs, CreateInvoiceArgs, CreateOrderArgs, CreateProductArgs,
    ToolCommand,
};
use opsdeck_store::{EntityStore, NewCustomer, NewEmployee, NewInvoice, NewOrder, NewProduct};
use opsdeck_types::{Customer, Employee, Invoice, Order, Product, UiInstruction};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;

/// The result of executing one tool command.
///
/// `message` is what the model sees (and ultimately speaks); `navigated`
/// reports whether this command actually emitted a `navigate` instruction.
/// The session handler uses the per-turn OR of `navigated` to decide
/// whether to send the deferred navigation signal, so the signal is
/// derived from real tool effects, not from transcript keywords.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub message: String,
    pub navigated: bool,
}

impl ToolOutput {
    fn text(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            navigated: false,
        }
    }
}

/// Executes parsed tool commands.
///
/// Every path returns a natural-language string: store failures and
/// broadcast failures become spoken apologies, never errors to the agent
/// loop.
#[derive(Clone)]
pub struct ToolExecutor {
    store: Arc<EntityStore>,
    ui_tx: broadcast::Sender<UiInstruction>,
}

impl ToolExecutor {
    pub fn new(store: Arc<EntityStore>, ui_tx: broadcast::Sender<UiInstruction>) -> Self {
        Self { store, ui_tx }
    }

    /// Runs one command to completion. Infallible by design: the caller
    /// always gets a message it can hand back to the model.
    pub fn execute(&self, command: ToolCommand) -> ToolOutput {
        tracing::info!(tool = command.name(), "executing tool command");

        match command {
            ToolCommand::NavigateToPage(args) => {
                let instruction = UiInstruction::navigate(args.target_app);
                match self.ui_tx.send(instruction) {
                    Ok(_) => ToolOutput {
                        message: format!(
                            "Okay, I have navigated to the {} page.",
                            args.target_app
                        ),
                        navigated: true,
                    },
                    Err(e) => {
                        tracing::warn!(
                            target_app = %args.target_app,
                            "navigate instruction had no subscribers: {}",
                            e
                        );
                        ToolOutput::text("Sorry, I couldn't navigate to that page right now.")
                    }
                }
            }

            ToolCommand::FillFormField(args) => {
                let field_id = args.field_id.clone();
                let instruction = UiInstruction::FillField {
                    target_app: args.target_app,
                    field_id: args.field_id,
                    value: args.value,
                };
                match self.ui_tx.send(instruction) {
                    Ok(_) => ToolOutput::text(format!("Field {} filled.", field_id)),
                    Err(e) => {
                        tracing::warn!(
                            field_id = %field_id,
                            "fill_field instruction had no subscribers: {}",
                            e
                        );
                        ToolOutput::text("There was an error filling that field.")
                    }
                }
            }

            ToolCommand::CreateCustomer(args) => self.create_customer(args),
            ToolCommand::UpdateCustomer(args) => ToolOutput::text(
                match self.store.update_customer(&args.customer_id, args.patch) {
                    Ok(_) => format!("Success: Customer ID '{}' updated.", args.customer_id),
                    Err(e) => format!("Error updating customer: {}", e),
                },
            ),
            ToolCommand::DeleteCustomer(args) => {
                ToolOutput::text(match self.store.delete_customer(&args.id) {
                    Ok(_) => format!("Success: Customer ID '{}' has been deleted.", args.id),
                    Err(e) => format!("Error deleting customer: {}", e),
                })
            }
            ToolCommand::SearchCustomers(args) => {
                let query = args.query.to_lowercase();
                let matches: Vec<Customer> = self
                    .store
                    .list_customers()
                    .into_iter()
                    .filter(|c| {
                        contains(&c.name, &query)
                            || contains(&c.email, &query)
                            || opt_contains(&c.company, &query)
                    })
                    .collect();
                ToolOutput::text(search_result(matches, "No customer found matching that query."))
            }

            ToolCommand::CreateProduct(args) => self.create_product(args),
            ToolCommand::UpdateProduct(args) => ToolOutput::text(
                match self.store.update_product(&args.product_id, args.patch) {
                    Ok(_) => format!("Success: Product ID '{}' updated.", args.product_id),
                    Err(e) => format!("Error updating product: {}", e),
                },
            ),
            ToolCommand::DeleteProduct(args) => {
                ToolOutput::text(match self.store.delete_product(&args.id) {
                    Ok(_) => format!("Success: Product ID '{}' has been deleted.", args.id),
                    Err(e) => format!("Error deleting product: {}", e),
                })
            }
            ToolCommand::SearchProducts(args) => {
                let query = args.query.to_lowercase();
                let matches: Vec<Product> = self
                    .store
                    .list_products()
                    .into_iter()
                    .filter(|p| contains(&p.name, &query) || contains(&p.sku, &query))
                    .collect();
                ToolOutput::text(search_result(matches, "No product found matching that query."))
            }

            ToolCommand::CreateEmployee(args) => self.create_employee(args),
            ToolCommand::UpdateEmployee(args) => ToolOutput::text(
                match self.store.update_employee(&args.employee_id, args.patch) {
                    Ok(_) => format!("Success: Employee ID '{}' updated.", args.employee_id),
                    Err(e) => format!("Error updating employee: {}", e),
                },
            ),
            ToolCommand::DeleteEmployee(args) => {
                ToolOutput::text(match self.store.delete_employee(&args.id) {
                    Ok(_) => format!("Success: Employee ID '{}' has been deleted.", args.id),
                    Err(e) => format!("Error deleting employee: {}", e),
                })
            }
            ToolCommand::SearchEmployees(args) => {
                let query = args.query.to_lowercase();
                let matches: Vec<Employee> = self
                    .store
                    .list_employees()
                    .into_iter()
                    .filter(|e| {
                        contains(&e.first_name, &query)
                            || opt_contains(&e.last_name, &query)
                            || contains(&e.email, &query)
                    })
                    .collect();
                ToolOutput::text(search_result(matches, "No employee found matching that query."))
            }

            ToolCommand::CreateOrder(args) => self.create_order(args),
            ToolCommand::UpdateOrder(args) => ToolOutput::text(
                match self.store.update_order(&args.order_id, args.patch) {
                    Ok(_) => format!("Success: Order ID '{}' updated.", args.order_id),
                    Err(e) => format!("Error updating order: {}", e),
                },
            ),
            ToolCommand::DeleteOrder(args) => {
                ToolOutput::text(match self.store.delete_order(&args.id) {
                    Ok(_) => format!("Success: Order ID '{}' has been deleted.", args.id),
                    Err(e) => format!("Error deleting order: {}", e),
                })
            }
            ToolCommand::SearchOrders(args) => {
                let query = args.query.to_lowercase();
                let matches: Vec<Order> = self
                    .store
                    .list_orders()
                    .into_iter()
                    .filter(|o| {
                        contains(&o.customer_id, &query) || contains(o.status.as_str(), &query)
                    })
                    .collect();
                ToolOutput::text(search_result(matches, "No order found matching that query."))
            }

            ToolCommand::CreateInvoice(args) => self.create_invoice(args),
            ToolCommand::UpdateInvoice(args) => ToolOutput::text(
                match self.store.update_invoice(&args.invoice_id, args.patch) {
                    Ok(_) => format!("Success: Invoice ID '{}' updated.", args.invoice_id),
                    Err(e) => format!("Error updating invoice: {}", e),
                },
            ),
            ToolCommand::DeleteInvoice(args) => {
                ToolOutput::text(match self.store.delete_invoice(&args.id) {
                    Ok(_) => format!("Success: Invoice ID '{}' has been deleted.", args.id),
                    Err(e) => format!("Error deleting invoice: {}", e),
                })
            }
            ToolCommand::SearchInvoices(args) => {
                let query = args.query.to_lowercase();
                let matches: Vec<Invoice> = self
                    .store
                    .list_invoices()
                    .into_iter()
                    .filter(|i| {
                        contains(&i.invoice_number, &query) || contains(&i.customer_id, &query)
                    })
                    .collect();
                ToolOutput::text(search_result(matches, "No invoice found matching that query."))
            }
        }
    }

    fn create_customer(&self, args: CreateCustomerArgs) -> ToolOutput {
        let name = args.name.clone();
        let new = NewCustomer {
            name: args.name,
            email: args.email,
            phone: args.phone,
            company: args.company,
            address: args.address,
            status: args.status,
            lead_score: args.lead_score,
            notes: args.notes,
        };
        ToolOutput::text(match self.store.add_customer(new) {
            Ok(_) => format!("Success: Customer '{}' created.", name),
            Err(e) => format!("Error creating customer: {}", e),
        })
    }

    fn create_product(&self, args: CreateProductArgs) -> ToolOutput {
        let name = args.name.clone();
        let new = NewProduct {
            name: args.name,
            sku: args.sku,
            price: Some(args.price),
            stock_quantity: Some(args.stock_quantity),
            category: args.category,
            cost: args.cost,
            reorder_level: args.reorder_level,
            supplier_id: None,
            warehouse_location: None,
            description: args.description,
        };
        ToolOutput::text(match self.store.add_product(new) {
            Ok(_) => format!("Success: Product '{}' created.", name),
            Err(e) => format!("Error creating product: {}", e),
        })
    }

    fn create_employee(&self, args: CreateEmployeeArgs) -> ToolOutput {
        let full_name = format!("{} {}", args.first_name, args.last_name);
        let new = NewEmployee {
            employee_id: args.employee_id,
            first_name: args.first_name,
            last_name: Some(args.last_name),
            email: args.email,
            phone: args.phone,
            department: args.department,
            position: Some(args.position),
            hire_date: args.hire_date,
            salary: args.salary,
            status: args.status,
            manager_id: None,
        };
        ToolOutput::text(match self.store.add_employee(new) {
            Ok(_) => format!("Success: Employee '{}' created.", full_name),
            Err(e) => format!("Error creating employee: {}", e),
        })
    }

    fn create_order(&self, args: CreateOrderArgs) -> ToolOutput {
        let customer_id = args.customer_id.clone();
        let new = NewOrder {
            customer_id: args.customer_id,
            order_date: Some(args.order_date),
            total_amount: Some(args.total_amount),
            status: args.status,
            shipping_address: args.shipping_address,
            notes: args.notes,
        };
        ToolOutput::text(match self.store.add_order(new) {
            Ok(_) => format!("Success: Order created for customer '{}'.", customer_id),
            Err(e) => format!("Error creating order: {}", e),
        })
    }

    fn create_invoice(&self, args: CreateInvoiceArgs) -> ToolOutput {
        let customer_id = args.customer_id.clone();
        let new = NewInvoice {
            customer_id: args.customer_id,
            invoice_number: None,
            order_id: args.order_id,
            issue_date: Some(args.issue_date),
            due_date: Some(args.due_date),
            total_amount: Some(args.total_amount),
            paid_amount: args.paid_amount,
            status: args.status,
        };
        ToolOutput::text(match self.store.add_invoice(new) {
            Ok(invoice) => format!(
                "Success: Invoice {} created for customer '{}'.",
                invoice.invoice_number, customer_id
            ),
            Err(e) => format!("Error creating invoice: {}", e),
        })
    }
}

/// Case-insensitive substring match; `query` is already lowercased.
fn contains(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(query)
}

fn opt_contains(haystack: &Option<String>, query: &str) -> bool {
    haystack.as_deref().is_some_and(|h| contains(h, query))
}

/// Serializes search matches, or returns the not-found sentinel — never an
/// empty list, so the model can react in plain language without branching.
fn search_result<T: Serialize>(matches: Vec<T>, not_found: &str) -> String {
    if matches.is_empty() {
        return not_found.to_string();
    }
    match serde_json::to_string(&matches) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to serialize search matches: {}", e);
            "Sorry, I couldn't read the matching records.".to_string()
        }
    }
}
