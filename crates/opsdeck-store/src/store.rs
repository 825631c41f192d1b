//! The mutex-guarded entity store.

use crate::error::StoreError;
use crate::params::{
    CustomerPatch, EmployeePatch, InvoicePatch, NewCustomer, NewEmployee, NewInvoice, NewOrder,
    NewProduct, OrderPatch, ProductPatch,
};
use opsdeck_types::{
    ChangeKind, Customer, DataEvent, Employee, EntityKind, Invoice, Order, Product,
};
use serde::Serialize;
use std::sync::Mutex;
use tokio::sync::broadcast;
use uuid::Uuid;

/// All five ERP tables plus the invoice-number counter.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub employees: Vec<Employee>,
    pub orders: Vec<Order>,
    pub invoices: Vec<Invoice>,
    /// Next sequence number for auto-generated invoice numbers.
    pub invoice_seq: u32,
}

/// Aggregate counts served by the dashboard endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardMetrics {
    pub total_customers: usize,
    pub total_products: usize,
    pub total_orders: usize,
    pub total_employees: usize,
    pub total_invoices: usize,
}

/// The in-memory ERP dataset.
///
/// All mutations pass through one mutex (single-writer serialization
/// point); the lock is never held across an `.await`. Successful mutations
/// broadcast a [`DataEvent`] carrying the full record.
pub struct EntityStore {
    inner: Mutex<Tables>,
    events: broadcast::Sender<DataEvent>,
}

/// Generates a record id: entity prefix + first 8 hex chars of a UUIDv4.
fn generate_id(kind: EntityKind) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}{}", kind.id_prefix(), &uuid[..8])
}

/// Today's date as `YYYY-MM-DD`.
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Applies a patch value to an optional field. `None` leaves the field
/// unchanged; an empty string clears it.
fn patch_opt(dst: &mut Option<String>, src: Option<String>) {
    if let Some(v) = src {
        *dst = if v.is_empty() { None } else { Some(v) };
    }
}

/// Applies a patch value to a required string field. `None` and empty
/// strings leave the field unchanged — required fields cannot be cleared.
fn patch_required(dst: &mut String, src: Option<String>) {
    if let Some(v) = src {
        if !v.is_empty() {
            *dst = v;
        }
    }
}

impl EntityStore {
    /// Creates an empty store that broadcasts changes on `events`.
    pub fn new(events: broadcast::Sender<DataEvent>) -> Self {
        Self {
            inner: Mutex::new(Tables::default()),
            events,
        }
    }

    fn broadcast(&self, kind: EntityKind, change: ChangeKind, record: &impl Serialize) {
        let event_type = kind.event_type(change);
        match serde_json::to_value(record) {
            Ok(value) => {
                // send only fails when nobody is subscribed, which is
                // normal before the first UI client connects.
                if self.events.send(DataEvent::now(&event_type, value)).is_err() {
                    tracing::debug!(event_type = %event_type, "no subscribers for data event");
                }
            }
            Err(e) => {
                tracing::error!(event_type = %event_type, "failed to serialize data event: {}", e);
            }
        }
    }

    pub(crate) fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        // A poisoned lock means a panic mid-mutation; the tables are plain
        // data, so continuing with the inner value is safe.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Aggregate counts for the dashboard page.
    pub fn dashboard_metrics(&self) -> DashboardMetrics {
        let tables = self.lock();
        DashboardMetrics {
            total_customers: tables.customers.len(),
            total_products: tables.products.len(),
            total_orders: tables.orders.len(),
            total_employees: tables.employees.len(),
            total_invoices: tables.invoices.len(),
        }
    }

    // ── Customers ────────────────────────────────────────────────────

    pub fn list_customers(&self) -> Vec<Customer> {
        self.lock().customers.clone()
    }

    pub fn add_customer(&self, new: NewCustomer) -> Result<Customer, StoreError> {
        if new.name.is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        if new.email.is_empty() {
            return Err(StoreError::MissingField("email"));
        }

        let customer = Customer {
            id: generate_id(EntityKind::Customer),
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            address: new.address,
            status: new.status.unwrap_or_default(),
            lead_score: new.lead_score,
            created_date: Some(today()),
            last_contact: None,
            notes: new.notes,
        };

        self.lock().customers.push(customer.clone());
        self.broadcast(EntityKind::Customer, ChangeKind::Added, &customer);
        Ok(customer)
    }

    pub fn update_customer(&self, id: &str, patch: CustomerPatch) -> Result<Customer, StoreError> {
        let updated = {
            let mut tables = self.lock();
            let customer = tables
                .customers
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "customer",
                    key: id.to_string(),
                })?;

            patch_required(&mut customer.name, patch.name);
            patch_required(&mut customer.email, patch.email);
            patch_opt(&mut customer.phone, patch.phone);
            patch_opt(&mut customer.company, patch.company);
            patch_opt(&mut customer.address, patch.address);
            if let Some(status) = patch.status {
                customer.status = status;
            }
            if let Some(score) = patch.lead_score {
                customer.lead_score = Some(score);
            }
            patch_opt(&mut customer.last_contact, patch.last_contact);
            patch_opt(&mut customer.notes, patch.notes);
            customer.clone()
        };

        self.broadcast(EntityKind::Customer, ChangeKind::Updated, &updated);
        Ok(updated)
    }

    pub fn delete_customer(&self, id: &str) -> Result<Customer, StoreError> {
        let removed = {
            let mut tables = self.lock();
            let pos = tables
                .customers
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "customer",
                    key: id.to_string(),
                })?;
            tables.customers.remove(pos)
        };

        self.broadcast(EntityKind::Customer, ChangeKind::Deleted, &removed);
        Ok(removed)
    }

    // ── Products ─────────────────────────────────────────────────────

    pub fn list_products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn add_product(&self, new: NewProduct) -> Result<Product, StoreError> {
        if new.name.is_empty() {
            return Err(StoreError::MissingField("name"));
        }
        if new.sku.is_empty() {
            return Err(StoreError::MissingField("sku"));
        }
        let price = new.price.ok_or(StoreError::MissingField("price"))?;

        let product = Product {
            id: generate_id(EntityKind::Product),
            name: new.name,
            sku: new.sku,
            category: new.category,
            price,
            cost: new.cost,
            stock_quantity: new.stock_quantity.unwrap_or(0),
            reorder_level: new.reorder_level,
            supplier_id: new.supplier_id,
            warehouse_location: new.warehouse_location,
            created_date: Some(today()),
            description: new.description,
        };

        self.lock().products.push(product.clone());
        self.broadcast(EntityKind::Product, ChangeKind::Added, &product);
        Ok(product)
    }

    pub fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, StoreError> {
        let updated = {
            let mut tables = self.lock();
            let product = tables
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "product",
                    key: id.to_string(),
                })?;

            patch_required(&mut product.name, patch.name);
            patch_required(&mut product.sku, patch.sku);
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(quantity) = patch.stock_quantity {
                product.stock_quantity = quantity;
            }
            patch_opt(&mut product.category, patch.category);
            if let Some(cost) = patch.cost {
                product.cost = Some(cost);
            }
            if let Some(level) = patch.reorder_level {
                product.reorder_level = Some(level);
            }
            patch_opt(&mut product.supplier_id, patch.supplier_id);
            patch_opt(&mut product.warehouse_location, patch.warehouse_location);
            patch_opt(&mut product.description, patch.description);
            product.clone()
        };

        self.broadcast(EntityKind::Product, ChangeKind::Updated, &updated);
        Ok(updated)
    }

    pub fn delete_product(&self, id: &str) -> Result<Product, StoreError> {
        let removed = {
            let mut tables = self.lock();
            let pos = tables
                .products
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "product",
                    key: id.to_string(),
                })?;
            tables.products.remove(pos)
        };

        self.broadcast(EntityKind::Product, ChangeKind::Deleted, &removed);
        Ok(removed)
    }

    // ── Employees ────────────────────────────────────────────────────
    //
    // Employees carry two keys: the internal id and the human-assigned
    // employee code. Update and delete look up by the code, which is what
    // users say out loud and what the HR page displays.

    pub fn list_employees(&self) -> Vec<Employee> {
        self.lock().employees.clone()
    }

    pub fn add_employee(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        if new.employee_id.is_empty() {
            return Err(StoreError::MissingField("employee_id"));
        }
        if new.first_name.is_empty() {
            return Err(StoreError::MissingField("first_name"));
        }
        if new.email.is_empty() {
            return Err(StoreError::MissingField("email"));
        }

        let employee = {
            let mut tables = self.lock();
            if tables.employees.iter().any(|e| e.employee_id == new.employee_id) {
                return Err(StoreError::Duplicate {
                    kind: "employee",
                    key: new.employee_id,
                });
            }

            let employee = Employee {
                id: generate_id(EntityKind::Employee),
                employee_id: new.employee_id,
                first_name: new.first_name,
                last_name: new.last_name,
                email: new.email,
                phone: new.phone,
                department: new.department,
                position: new.position,
                hire_date: new.hire_date,
                salary: new.salary,
                status: new.status.unwrap_or_default(),
                manager_id: new.manager_id,
            };
            tables.employees.push(employee.clone());
            employee
        };

        self.broadcast(EntityKind::Employee, ChangeKind::Added, &employee);
        Ok(employee)
    }

    pub fn update_employee(&self, code: &str, patch: EmployeePatch) -> Result<Employee, StoreError> {
        let updated = {
            let mut tables = self.lock();
            let employee = tables
                .employees
                .iter_mut()
                .find(|e| e.employee_id == code)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "employee",
                    key: code.to_string(),
                })?;

            patch_required(&mut employee.first_name, patch.first_name);
            patch_opt(&mut employee.last_name, patch.last_name);
            patch_required(&mut employee.email, patch.email);
            patch_opt(&mut employee.phone, patch.phone);
            patch_opt(&mut employee.department, patch.department);
            patch_opt(&mut employee.position, patch.position);
            patch_opt(&mut employee.hire_date, patch.hire_date);
            if let Some(salary) = patch.salary {
                employee.salary = Some(salary);
            }
            if let Some(status) = patch.status {
                employee.status = status;
            }
            patch_opt(&mut employee.manager_id, patch.manager_id);
            employee.clone()
        };

        self.broadcast(EntityKind::Employee, ChangeKind::Updated, &updated);
        Ok(updated)
    }

    pub fn delete_employee(&self, code: &str) -> Result<Employee, StoreError> {
        let removed = {
            let mut tables = self.lock();
            let pos = tables
                .employees
                .iter()
                .position(|e| e.employee_id == code)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "employee",
                    key: code.to_string(),
                })?;
            tables.employees.remove(pos)
        };

        self.broadcast(EntityKind::Employee, ChangeKind::Deleted, &removed);
        Ok(removed)
    }

    // ── Orders ───────────────────────────────────────────────────────

    pub fn list_orders(&self) -> Vec<Order> {
        self.lock().orders.clone()
    }

    pub fn add_order(&self, new: NewOrder) -> Result<Order, StoreError> {
        if new.customer_id.is_empty() {
            return Err(StoreError::MissingField("customer_id"));
        }
        let total_amount = new.total_amount.ok_or(StoreError::MissingField("total_amount"))?;

        let order = Order {
            id: generate_id(EntityKind::Order),
            customer_id: new.customer_id,
            order_date: new.order_date.or_else(|| Some(today())),
            status: new.status.unwrap_or_default(),
            total_amount,
            shipping_address: new.shipping_address,
            notes: new.notes,
        };

        self.lock().orders.push(order.clone());
        self.broadcast(EntityKind::Order, ChangeKind::Added, &order);
        Ok(order)
    }

    pub fn update_order(&self, id: &str, patch: OrderPatch) -> Result<Order, StoreError> {
        let updated = {
            let mut tables = self.lock();
            let order = tables
                .orders
                .iter_mut()
                .find(|o| o.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "order",
                    key: id.to_string(),
                })?;

            patch_required(&mut order.customer_id, patch.customer_id);
            patch_opt(&mut order.order_date, patch.order_date);
            if let Some(status) = patch.status {
                order.status = status;
            }
            if let Some(total) = patch.total_amount {
                order.total_amount = total;
            }
            patch_opt(&mut order.shipping_address, patch.shipping_address);
            patch_opt(&mut order.notes, patch.notes);
            order.clone()
        };

        self.broadcast(EntityKind::Order, ChangeKind::Updated, &updated);
        Ok(updated)
    }

    pub fn delete_order(&self, id: &str) -> Result<Order, StoreError> {
        let removed = {
            let mut tables = self.lock();
            let pos = tables
                .orders
                .iter()
                .position(|o| o.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "order",
                    key: id.to_string(),
                })?;
            tables.orders.remove(pos)
        };

        self.broadcast(EntityKind::Order, ChangeKind::Deleted, &removed);
        Ok(removed)
    }

    // ── Invoices ─────────────────────────────────────────────────────

    pub fn list_invoices(&self) -> Vec<Invoice> {
        self.lock().invoices.clone()
    }

    pub fn add_invoice(&self, new: NewInvoice) -> Result<Invoice, StoreError> {
        if new.customer_id.is_empty() {
            return Err(StoreError::MissingField("customer_id"));
        }
        let total_amount = new.total_amount.ok_or(StoreError::MissingField("total_amount"))?;

        let invoice = {
            let mut tables = self.lock();
            let invoice_number = match new.invoice_number.filter(|n| !n.is_empty()) {
                Some(number) => number,
                None => {
                    tables.invoice_seq += 1;
                    format!("INV{:03}", tables.invoice_seq)
                }
            };

            let invoice = Invoice {
                id: generate_id(EntityKind::Invoice),
                invoice_number,
                order_id: new.order_id,
                customer_id: new.customer_id,
                issue_date: new.issue_date.or_else(|| Some(today())),
                due_date: new.due_date,
                total_amount,
                paid_amount: new.paid_amount.unwrap_or(0.0),
                status: new.status.unwrap_or_default(),
            };
            tables.invoices.push(invoice.clone());
            invoice
        };

        self.broadcast(EntityKind::Invoice, ChangeKind::Added, &invoice);
        Ok(invoice)
    }

    pub fn update_invoice(&self, id: &str, patch: InvoicePatch) -> Result<Invoice, StoreError> {
        let updated = {
            let mut tables = self.lock();
            let invoice = tables
                .invoices
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "invoice",
                    key: id.to_string(),
                })?;

            patch_required(&mut invoice.customer_id, patch.customer_id);
            patch_required(&mut invoice.invoice_number, patch.invoice_number);
            patch_opt(&mut invoice.order_id, patch.order_id);
            patch_opt(&mut invoice.issue_date, patch.issue_date);
            patch_opt(&mut invoice.due_date, patch.due_date);
            if let Some(total) = patch.total_amount {
                invoice.total_amount = total;
            }
            if let Some(paid) = patch.paid_amount {
                invoice.paid_amount = paid;
            }
            if let Some(status) = patch.status {
                invoice.status = status;
            }
            invoice.clone()
        };

        self.broadcast(EntityKind::Invoice, ChangeKind::Updated, &updated);
        Ok(updated)
    }

    pub fn delete_invoice(&self, id: &str) -> Result<Invoice, StoreError> {
        let removed = {
            let mut tables = self.lock();
            let pos = tables
                .invoices
                .iter()
                .position(|i| i.id == id)
                .ok_or_else(|| StoreError::NotFound {
                    kind: "invoice",
                    key: id.to_string(),
                })?;
            tables.invoices.remove(pos)
        };

        self.broadcast(EntityKind::Invoice, ChangeKind::Deleted, &removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EntityStore {
        let (tx, _rx) = broadcast::channel(64);
        EntityStore::new(tx)
    }

    #[test]
    fn add_customer_generates_prefixed_id_and_defaults() {
        let store = store();
        let customer = store
            .add_customer(NewCustomer {
                name: "Acme Corporation".to_string(),
                email: "contact@acme.com".to_string(),
                ..Default::default()
            })
            .expect("create should succeed");

        assert!(customer.id.starts_with("cust"));
        assert_eq!(customer.id.len(), 4 + 8);
        assert_eq!(customer.status, opsdeck_types::CustomerStatus::Lead);
        assert!(customer.created_date.is_some());
    }

    #[test]
    fn add_customer_missing_required_field_stores_nothing() {
        let store = store();
        let err = store
            .add_customer(NewCustomer {
                name: "No Email Inc".to_string(),
                ..Default::default()
            })
            .expect_err("missing email must fail");
        assert!(matches!(err, StoreError::MissingField("email")));
        assert!(store.list_customers().is_empty());
    }

    #[test]
    fn add_product_requires_price() {
        let store = store();
        let err = store
            .add_product(NewProduct {
                name: "Widget".to_string(),
                sku: "WID-001".to_string(),
                ..Default::default()
            })
            .expect_err("missing price must fail");
        assert!(matches!(err, StoreError::MissingField("price")));
    }

    #[test]
    fn update_patches_only_provided_fields() {
        let store = store();
        let created = store
            .add_customer(NewCustomer {
                name: "TechStart LLC".to_string(),
                email: "hello@techstart.com".to_string(),
                phone: Some("+1-555-0456".to_string()),
                ..Default::default()
            })
            .expect("create");

        let updated = store
            .update_customer(
                &created.id,
                CustomerPatch {
                    company: Some("TechStart LLC".to_string()),
                    ..Default::default()
                },
            )
            .expect("update");

        assert_eq!(updated.name, "TechStart LLC");
        assert_eq!(updated.phone.as_deref(), Some("+1-555-0456"));
        assert_eq!(updated.company.as_deref(), Some("TechStart LLC"));
    }

    #[test]
    fn update_with_empty_string_clears_optional_field() {
        let store = store();
        let created = store
            .add_customer(NewCustomer {
                name: "Acme".to_string(),
                email: "a@acme.com".to_string(),
                notes: Some("call back".to_string()),
                ..Default::default()
            })
            .expect("create");

        let updated = store
            .update_customer(
                &created.id,
                CustomerPatch {
                    notes: Some(String::new()),
                    ..Default::default()
                },
            )
            .expect("update");
        assert!(updated.notes.is_none());
    }

    #[test]
    fn update_unknown_customer_is_not_found() {
        let store = store();
        let err = store
            .update_customer("cust00000000", CustomerPatch::default())
            .expect_err("unknown id must fail");
        assert!(matches!(err, StoreError::NotFound { kind: "customer", .. }));
    }

    #[test]
    fn employee_lookup_uses_human_code() {
        let store = store();
        let created = store
            .add_employee(NewEmployee {
                employee_id: "E007".to_string(),
                first_name: "James".to_string(),
                email: "james@company.com".to_string(),
                ..Default::default()
            })
            .expect("create");
        assert_ne!(created.id, created.employee_id);

        let updated = store
            .update_employee(
                "E007",
                EmployeePatch {
                    department: Some("Field Ops".to_string()),
                    ..Default::default()
                },
            )
            .expect("update by code");
        assert_eq!(updated.department.as_deref(), Some("Field Ops"));

        // Internal id is not a valid lookup key for employees.
        assert!(store.delete_employee(&created.id).is_err());
        let removed = store.delete_employee("E007").expect("delete by code");
        assert_eq!(removed.employee_id, "E007");
        assert!(store.list_employees().is_empty());
    }

    #[test]
    fn duplicate_employee_code_rejected() {
        let store = store();
        let new = NewEmployee {
            employee_id: "E001".to_string(),
            first_name: "John".to_string(),
            email: "john@company.com".to_string(),
            ..Default::default()
        };
        store.add_employee(new.clone()).expect("first create");
        let err = store.add_employee(new).expect_err("duplicate code must fail");
        assert!(matches!(err, StoreError::Duplicate { kind: "employee", .. }));
    }

    #[test]
    fn invoice_number_autogenerated_when_blank() {
        let store = store();
        let first = store
            .add_invoice(NewInvoice {
                customer_id: "cust00000001".to_string(),
                total_amount: Some(100.0),
                ..Default::default()
            })
            .expect("create");
        let second = store
            .add_invoice(NewInvoice {
                customer_id: "cust00000001".to_string(),
                total_amount: Some(250.0),
                ..Default::default()
            })
            .expect("create");

        assert_eq!(first.invoice_number, "INV001");
        assert_eq!(second.invoice_number, "INV002");
        assert_eq!(first.paid_amount, 0.0);
    }

    #[test]
    fn explicit_invoice_number_is_kept() {
        let store = store();
        let invoice = store
            .add_invoice(NewInvoice {
                customer_id: "cust00000001".to_string(),
                invoice_number: Some("INV-CUSTOM".to_string()),
                total_amount: Some(42.0),
                ..Default::default()
            })
            .expect("create");
        assert_eq!(invoice.invoice_number, "INV-CUSTOM");
    }

    #[test]
    fn dashboard_metrics_count_tables() {
        let store = store();
        store
            .add_customer(NewCustomer {
                name: "Acme".to_string(),
                email: "a@acme.com".to_string(),
                ..Default::default()
            })
            .expect("create");
        store
            .add_order(NewOrder {
                customer_id: "cust1".to_string(),
                total_amount: Some(10.0),
                ..Default::default()
            })
            .expect("create");

        let metrics = store.dashboard_metrics();
        assert_eq!(metrics.total_customers, 1);
        assert_eq!(metrics.total_orders, 1);
        assert_eq!(metrics.total_products, 0);
    }
}
