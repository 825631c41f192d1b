//! In-memory entity store for the Opsdeck platform.
//!
//! Holds the five ERP tables (customers, products, employees, orders,
//! invoices) behind a single mutex — one serialization point for all
//! mutations, so concurrent voice sessions and REST clients can never
//! interleave partial updates to the same record. Every successful
//! mutation broadcasts a [`DataEvent`](opsdeck_types::DataEvent) to
//! connected UI clients.
//!
//! # Design decisions
//!
//! - **In-memory, no persistence**: this is a demo dataset; durability is
//!   explicitly out of scope. The store seeds a small sample dataset on
//!   construction.
//! - **Single writer**: all tables share one `std::sync::Mutex`. Lock
//!   acquisitions are brief table operations that never span `.await`
//!   points, making a synchronous lock safe and more efficient than
//!   `tokio::sync::Mutex`.
//! - **Generated ids**: `<prefix><8 hex chars>` (e.g. `cust3f9a0c12`),
//!   matching the id shapes the front-end tables render.

mod error;
mod params;
mod seed;
mod store;

pub use error::StoreError;
pub use params::{
    CustomerPatch, EmployeePatch, InvoicePatch, NewCustomer, NewEmployee, NewInvoice, NewOrder,
    NewProduct, OrderPatch, ProductPatch,
};
pub use store::{DashboardMetrics, EntityStore};
