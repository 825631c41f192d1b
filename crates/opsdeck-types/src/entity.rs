//! ERP entity records.
//!
//! Every record serializes with `null` for absent optional fields — the
//! broadcast and REST surfaces promise records-with-nulls, never NaN or
//! missing keys.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a customer relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerStatus {
    Active,
    #[default]
    Lead,
    Inactive,
}

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeStatus {
    #[default]
    Active,
    #[serde(rename = "On Leave")]
    OnLeave,
}

/// Fulfilment status of a sales order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    #[default]
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl CustomerStatus {
    /// Returns the canonical wire label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Lead => "Lead",
            Self::Inactive => "Inactive",
        }
    }
}

impl EmployeeStatus {
    /// Returns the canonical wire label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "On Leave",
        }
    }
}

impl OrderStatus {
    /// Returns the canonical wire label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

impl InvoiceStatus {
    /// Returns the canonical wire label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// A CRM customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Internal record id (generated, `cust` prefix).
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub status: CustomerStatus,
    pub lead_score: Option<i64>,
    /// ISO date (`YYYY-MM-DD`) the record was created.
    pub created_date: Option<String>,
    pub last_contact: Option<String>,
    pub notes: Option<String>,
}

/// An inventory product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Internal record id (generated, `prod` prefix).
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category: Option<String>,
    pub price: f64,
    pub cost: Option<f64>,
    pub stock_quantity: i64,
    pub reorder_level: Option<i64>,
    pub supplier_id: Option<String>,
    pub warehouse_location: Option<String>,
    pub created_date: Option<String>,
    pub description: Option<String>,
}

/// An HR employee record.
///
/// Employees carry two keys: the internal `id` (generated, `emp` prefix)
/// and the human-assigned `employee_id` code (e.g. `E001`) that users refer
/// to and that update/delete operations look up by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    /// ISO date (`YYYY-MM-DD`).
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub status: EmployeeStatus,
    pub manager_id: Option<String>,
}

/// A sales order record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Internal record id (generated, `ord` prefix).
    pub id: String,
    pub customer_id: String,
    /// ISO date (`YYYY-MM-DD`).
    pub order_date: Option<String>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub shipping_address: Option<String>,
    pub notes: Option<String>,
}

/// A finance invoice record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Internal record id (generated, `inv` prefix).
    pub id: String,
    /// Human-facing invoice number (`INV...`), auto-generated when blank.
    pub invoice_number: String,
    pub order_id: Option<String>,
    pub customer_id: String,
    /// ISO date (`YYYY-MM-DD`).
    pub issue_date: Option<String>,
    pub due_date: Option<String>,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optionals_serialize_to_null() {
        let customer = Customer {
            id: "cust1234".to_string(),
            name: "Acme Corporation".to_string(),
            email: "contact@acme.com".to_string(),
            phone: None,
            company: None,
            address: None,
            status: CustomerStatus::Lead,
            lead_score: None,
            created_date: None,
            last_contact: None,
            notes: None,
        };

        let json = serde_json::to_value(&customer).expect("serialization should not fail");
        assert!(json["phone"].is_null(), "absent phone must serialize to null");
        assert!(json["lead_score"].is_null(), "absent lead_score must serialize to null");
        assert_eq!(json["status"], "Lead");
    }

    #[test]
    fn employee_status_on_leave_wire_form() {
        let json = serde_json::to_value(EmployeeStatus::OnLeave).expect("serialize");
        assert_eq!(json, "On Leave");
        let back: EmployeeStatus = serde_json::from_value(json).expect("deserialize");
        assert_eq!(back, EmployeeStatus::OnLeave);
    }

    #[test]
    fn status_defaults() {
        assert_eq!(CustomerStatus::default(), CustomerStatus::Lead);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Pending);
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::Active);
    }
}
