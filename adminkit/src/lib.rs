// adminkit/src/lib.rs
//
// Shared kit for the admin-panel services: typed store slices, simulated
// live-metric panels, auth/session plumbing and theme import/export.
//

pub mod auth;
pub mod config;
pub mod errors;
pub mod metrics;
pub mod routes;
pub mod seed;
pub mod sim;
pub mod storage;
pub mod store;
pub mod table;
pub mod types;
pub mod validation;

pub use errors::AdminError;
pub use store::{Action, Store, StoreHandle};
