//! # permd
//!
//! A namespaced permission-group registry and authorization service, usable
//! both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use permd::perms::{Authorizer, ensure_server_admins};
//! use permd::store::{SqliteStore, Store};
//! use permd::types::Principal;
//!
//! let store: Arc<dyn Store> = Arc::new(SqliteStore::new("./data/permd.db").unwrap());
//! store.initialize().unwrap();
//! ensure_server_admins(store.as_ref(), "default").unwrap();
//!
//! let authorizer = Authorizer::new(store);
//! let principal = Principal::parse("<@42>").unwrap();
//! let allowed = authorizer.authorize("default", &principal, &["officers"]).unwrap();
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `permd` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod perms;
pub mod server;
pub mod store;
pub mod types;
