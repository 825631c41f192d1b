//! Shared types and constants for the Opsdeck platform.
//!
//! This crate provides the foundational types used across all Opsdeck
//! crates: the ERP entity records, the target-app enumeration that maps
//! voice commands onto UI pages, and the broadcast payloads (UI
//! instructions and data-change events) consumed by connected front-ends.
//!
//! No crate in the workspace depends on anything *except* `opsdeck-types`
//! for cross-cutting type definitions. This keeps the dependency graph
//! clean and prevents circular dependencies.

use serde::{Deserialize, Serialize};

pub mod entity;
pub mod event;

pub use entity::{
    Customer, CustomerStatus, Employee, EmployeeStatus, Invoice, InvoiceStatus, Order, OrderStatus,
    Product,
};
pub use event::{DataEvent, UiInstruction};

/// The kinds of ERP entities managed by the store.
///
/// The string form is the wire prefix for data-change event types
/// (`customer_added`, `order_deleted`, ...) and the basis for generated
/// record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Customer,
    Product,
    Employee,
    Order,
    Invoice,
}

impl EntityKind {
    /// Returns the canonical lowercase label for this entity kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Product => "product",
            Self::Employee => "employee",
            Self::Order => "order",
            Self::Invoice => "invoice",
        }
    }

    /// Returns the short prefix used for generated record ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Customer => "cust",
            Self::Product => "prod",
            Self::Employee => "emp",
            Self::Order => "ord",
            Self::Invoice => "inv",
        }
    }

    /// Builds a data-change event type string, e.g. `customer_added`.
    pub fn event_type(self, change: ChangeKind) -> String {
        format!("{}_{}", self.as_str(), change.as_str())
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three mutation kinds a data-change event can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Updated,
    Deleted,
}

impl ChangeKind {
    /// Returns the event-type suffix for this change.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

/// The ERP module pages a voice command can navigate to.
///
/// This is the closed set accepted by the `navigate_to_page` tool; anything
/// outside it is a parse error, never a broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetApp {
    Crm,
    Inventory,
    Orders,
    Hr,
    Finance,
    Dashboard,
}

impl TargetApp {
    /// All target apps, in catalog order.
    pub const ALL: [TargetApp; 6] = [
        TargetApp::Crm,
        TargetApp::Inventory,
        TargetApp::Orders,
        TargetApp::Hr,
        TargetApp::Finance,
        TargetApp::Dashboard,
    ];

    /// Returns the canonical lowercase name of this app.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Crm => "crm",
            Self::Inventory => "inventory",
            Self::Orders => "orders",
            Self::Hr => "hr",
            Self::Finance => "finance",
            Self::Dashboard => "dashboard",
        }
    }

    /// Returns the UI page URL for this app.
    ///
    /// The dashboard is the site root; every other module lives at
    /// `/{app}_vue`.
    pub fn page_url(self) -> String {
        match self {
            Self::Dashboard => "/".to_string(),
            other => format!("/{}_vue", other.as_str()),
        }
    }
}

impl std::fmt::Display for TargetApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TargetApp {
    type Err = ParseTargetAppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "crm" => Ok(Self::Crm),
            "inventory" => Ok(Self::Inventory),
            "orders" => Ok(Self::Orders),
            "hr" => Ok(Self::Hr),
            "finance" => Ok(Self::Finance),
            "dashboard" => Ok(Self::Dashboard),
            _ => Err(ParseTargetAppError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unknown target app name.
#[derive(Debug, Clone)]
pub struct ParseTargetAppError(pub String);

impl std::fmt::Display for ParseTargetAppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown target app: {}", self.0)
    }
}

impl std::error::Error for ParseTargetAppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_app_url_mapping() {
        assert_eq!(TargetApp::Dashboard.page_url(), "/");
        assert_eq!(TargetApp::Crm.page_url(), "/crm_vue");
        assert_eq!(TargetApp::Inventory.page_url(), "/inventory_vue");
        assert_eq!(TargetApp::Orders.page_url(), "/orders_vue");
        assert_eq!(TargetApp::Hr.page_url(), "/hr_vue");
        assert_eq!(TargetApp::Finance.page_url(), "/finance_vue");
    }

    #[test]
    fn target_app_round_trip() {
        for app in TargetApp::ALL {
            let parsed: TargetApp = app.as_str().parse().expect("round trip should parse");
            assert_eq!(parsed, app);
        }
    }

    #[test]
    fn target_app_rejects_unknown() {
        assert!("warehouse".parse::<TargetApp>().is_err());
        assert!("".parse::<TargetApp>().is_err());
        assert!("CRM ".parse::<TargetApp>().is_err());
    }

    #[test]
    fn entity_kind_event_types() {
        assert_eq!(
            EntityKind::Customer.event_type(ChangeKind::Added),
            "customer_added"
        );
        assert_eq!(
            EntityKind::Invoice.event_type(ChangeKind::Deleted),
            "invoice_deleted"
        );
    }

    #[test]
    fn entity_kind_id_prefixes() {
        assert_eq!(EntityKind::Customer.id_prefix(), "cust");
        assert_eq!(EntityKind::Product.id_prefix(), "prod");
        assert_eq!(EntityKind::Employee.id_prefix(), "emp");
        assert_eq!(EntityKind::Order.id_prefix(), "ord");
        assert_eq!(EntityKind::Invoice.id_prefix(), "inv");
    }
}
