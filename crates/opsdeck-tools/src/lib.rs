//! The voice co-pilot's tool layer.
//!
//! Defines the closed set of operations the conversational agent may
//! invoke: page navigation, form-field filling, and CRUD plus search for
//! each ERP entity. The mapping from the model's tool-call output to an
//! executable action is a single typed dispatch table — an unknown tool
//! name or malformed arguments is a parse error with no side effect, never
//! a partially executed command.
//!
//! Tools return human-readable strings, not structured data: the consumer
//! is a language model that folds results into spoken replies.

mod catalog;
mod command;
mod error;
mod executor;

pub use catalog::{tool_catalog, ToolDefinition};
pub use command::{
    CreateCustomerArgs, CreateEmployeeArgs, CreateInvoiceArgs, CreateOrderArgs, CreateProductArgs,
    DeleteArgs, FillFormFieldArgs, NavigateArgs, SearchArgs, ToolCommand, UpdateCustomerArgs,
    UpdateEmployeeArgs, UpdateInvoiceArgs, UpdateOrderArgs, UpdateProductArgs,
};
pub use error::ToolError;
pub use executor::{ToolExecutor, ToolOutput};
