//! Broadcast payloads consumed by connected UI clients.
//!
//! Two event families flow to the front-end: data-change notifications
//! (a record was added/updated/deleted) and UI instructions (navigate,
//! fill a form field, clear a form). Both are fanned out verbatim over the
//! server's event stream; clients ignore instruction actions they do not
//! recognize.

use crate::TargetApp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A data-change notification, broadcast after every successful store
/// mutation.
///
/// Wire shape: `{"type": "<entity>_<change>", "data": {...}, "timestamp": ...}`.
/// `data` is the full record after the mutation (the removed record for
/// deletes), with `null` for absent optionals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl DataEvent {
    /// Builds a data event stamped with the current time.
    pub fn now(event_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            timestamp: Utc::now(),
        }
    }
}

/// A UI instruction, broadcast by the tool layer to steer connected
/// front-ends.
///
/// Every instruction carries the `action` discriminator on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiInstruction {
    /// Send the client to a module page.
    Navigate {
        target_app: TargetApp,
        url: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        params: Option<serde_json::Value>,
    },
    /// Populate a single form field on the current page. `field_id` is not
    /// validated server-side; clients ignore ids they do not have.
    FillField {
        target_app: String,
        field_id: String,
        value: String,
    },
    /// Reset form state, optionally scoped to one form.
    ClearFormFields {
        #[serde(skip_serializing_if = "Option::is_none")]
        form_id: Option<String>,
    },
}

impl UiInstruction {
    /// Builds a `Navigate` instruction with the canonical URL for the app.
    pub fn navigate(target_app: TargetApp) -> Self {
        Self::Navigate {
            target_app,
            url: target_app.page_url(),
            params: None,
        }
    }

    /// Returns the wire `action` tag for this instruction.
    pub fn action(&self) -> &'static str {
        match self {
            Self::Navigate { .. } => "navigate",
            Self::FillField { .. } => "fill_field",
            Self::ClearFormFields { .. } => "clear_form_fields",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigate_carries_action_tag_and_url() {
        let instruction = UiInstruction::navigate(TargetApp::Inventory);
        let json = serde_json::to_value(&instruction).expect("serialize");
        assert_eq!(json["action"], "navigate");
        assert_eq!(json["target_app"], "inventory");
        assert_eq!(json["url"], "/inventory_vue");
        assert!(json.get("params").is_none(), "absent params must be omitted");
    }

    #[test]
    fn dashboard_navigates_to_root() {
        let instruction = UiInstruction::navigate(TargetApp::Dashboard);
        let json = serde_json::to_value(&instruction).expect("serialize");
        assert_eq!(json["url"], "/");
    }

    #[test]
    fn fill_field_round_trips_unmodified() {
        let instruction = UiInstruction::FillField {
            target_app: "crm".to_string(),
            field_id: "crm-email".to_string(),
            value: "contact@acme.com".to_string(),
        };
        let json = serde_json::to_string(&instruction).expect("serialize");
        let back: UiInstruction = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, instruction);
    }

    #[test]
    fn unknown_action_is_rejected_by_typed_parse() {
        let raw = r#"{"action": "reboot_warehouse", "target_app": "crm"}"#;
        assert!(serde_json::from_str::<UiInstruction>(raw).is_err());
    }

    #[test]
    fn data_event_wire_shape() {
        let event = DataEvent::now("customer_added", serde_json::json!({"id": "cust0001"}));
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["type"], "customer_added");
        assert_eq!(json["data"]["id"], "cust0001");
        assert!(json["timestamp"].is_string());
    }
}
