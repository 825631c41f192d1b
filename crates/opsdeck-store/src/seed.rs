//! Demo dataset loaded at startup.
//!
//! Seeding bypasses the broadcast path: these rows exist before any UI
//! client connects, so there is nothing to notify.

use crate::store::EntityStore;
use opsdeck_types::{
    Customer, CustomerStatus, Employee, EmployeeStatus, Invoice, InvoiceStatus, Order, OrderStatus,
    Product,
};

impl EntityStore {
    /// Loads the sample dataset: 2 customers, 3 products, 2 employees,
    /// 2 orders, 2 invoices.
    pub fn seed_sample_data(&self) {
        let mut tables = self.lock();

        tables.customers = vec![
            Customer {
                id: "cust001".to_string(),
                name: "Acme Corporation".to_string(),
                email: "contact@acme.com".to_string(),
                phone: Some("+1-555-0123".to_string()),
                company: Some("Acme Corp".to_string()),
                address: Some("123 Business Ave, NYC".to_string()),
                status: CustomerStatus::Active,
                lead_score: Some(85),
                created_date: Some("2024-01-15".to_string()),
                last_contact: Some("2024-05-20".to_string()),
                notes: Some("Premium customer".to_string()),
            },
            Customer {
                id: "cust002".to_string(),
                name: "TechStart LLC".to_string(),
                email: "hello@techstart.com".to_string(),
                phone: Some("+1-555-0456".to_string()),
                company: Some("TechStart LLC".to_string()),
                address: Some("456 Innovation Blvd, SF".to_string()),
                status: CustomerStatus::Active,
                lead_score: Some(72),
                created_date: Some("2024-02-10".to_string()),
                last_contact: Some("2024-05-28".to_string()),
                notes: Some("Startup client".to_string()),
            },
        ];

        tables.products = vec![
            Product {
                id: "prod001".to_string(),
                name: "Wireless Headphones Pro".to_string(),
                sku: "WH-PRO-001".to_string(),
                category: Some("Electronics".to_string()),
                price: 299.99,
                cost: Some(150.00),
                stock_quantity: 150,
                reorder_level: Some(25),
                supplier_id: Some("supp001".to_string()),
                warehouse_location: Some("A-1-15".to_string()),
                created_date: Some("2024-01-01".to_string()),
                description: Some(
                    "High-fidelity wireless headphones with noise cancellation.".to_string(),
                ),
            },
            Product {
                id: "prod002".to_string(),
                name: "Ergonomic Office Chair".to_string(),
                sku: "CHAIR-ERG-001".to_string(),
                category: Some("Furniture".to_string()),
                price: 449.99,
                cost: Some(200.00),
                stock_quantity: 45,
                reorder_level: Some(10),
                supplier_id: Some("supp002".to_string()),
                warehouse_location: Some("B-2-08".to_string()),
                created_date: Some("2024-01-05".to_string()),
                description: Some(
                    "Comfortable ergonomic chair for long working hours.".to_string(),
                ),
            },
            Product {
                id: "prod003".to_string(),
                name: "Smart Water Bottle".to_string(),
                sku: "BOTTLE-SMRT-01".to_string(),
                category: Some("Gadgets".to_string()),
                price: 79.99,
                cost: Some(30.00),
                stock_quantity: 8,
                reorder_level: Some(15),
                supplier_id: Some("supp001".to_string()),
                warehouse_location: Some("C-1-02".to_string()),
                created_date: Some("2024-02-10".to_string()),
                description: Some(
                    "Tracks water intake and glows to remind you to drink.".to_string(),
                ),
            },
        ];

        tables.employees = vec![
            Employee {
                id: "emp001".to_string(),
                employee_id: "E001".to_string(),
                first_name: "John".to_string(),
                last_name: Some("Smith".to_string()),
                email: "john.smith@company.com".to_string(),
                phone: Some("+1-555-4001".to_string()),
                department: Some("Sales".to_string()),
                position: Some("Sales Manager".to_string()),
                hire_date: Some("2023-03-15".to_string()),
                salary: Some(75000.0),
                status: EmployeeStatus::Active,
                manager_id: None,
            },
            Employee {
                id: "emp002".to_string(),
                employee_id: "E002".to_string(),
                first_name: "Emily".to_string(),
                last_name: Some("Davis".to_string()),
                email: "emily.davis@company.com".to_string(),
                phone: Some("+1-555-4002".to_string()),
                department: Some("Marketing".to_string()),
                position: Some("Marketing Specialist".to_string()),
                hire_date: Some("2023-06-01".to_string()),
                salary: Some(65000.0),
                status: EmployeeStatus::Active,
                manager_id: Some("emp001".to_string()),
            },
        ];

        tables.orders = vec![
            Order {
                id: "ord001".to_string(),
                customer_id: "cust001".to_string(),
                order_date: Some("2024-05-25".to_string()),
                status: OrderStatus::Processing,
                total_amount: 1499.95,
                shipping_address: Some("123 Business Ave, NYC".to_string()),
                notes: Some("Bulk order".to_string()),
            },
            Order {
                id: "ord002".to_string(),
                customer_id: "cust002".to_string(),
                order_date: Some("2024-05-28".to_string()),
                status: OrderStatus::Pending,
                total_amount: 899.97,
                shipping_address: Some("456 Innovation Blvd, SF".to_string()),
                notes: Some("Standard delivery".to_string()),
            },
        ];

        tables.invoices = vec![
            Invoice {
                id: "inv001".to_string(),
                invoice_number: "INV001".to_string(),
                order_id: Some("ord001".to_string()),
                customer_id: "cust001".to_string(),
                issue_date: Some("2024-05-25".to_string()),
                due_date: Some("2024-06-24".to_string()),
                total_amount: 1499.95,
                status: InvoiceStatus::Paid,
                paid_amount: 1499.95,
            },
            Invoice {
                id: "inv002".to_string(),
                invoice_number: "INV002".to_string(),
                order_id: Some("ord002".to_string()),
                customer_id: "cust002".to_string(),
                issue_date: Some("2024-05-28".to_string()),
                due_date: Some("2024-06-27".to_string()),
                total_amount: 899.97,
                status: InvoiceStatus::Pending,
                paid_amount: 0.00,
            },
        ];

        // Auto-generated invoice numbers continue after the seeded ones.
        tables.invoice_seq = 2;
    }
}
