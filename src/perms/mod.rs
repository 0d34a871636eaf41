//! The authorization core.
//!
//! Every component holds an `Arc<dyn Store>` handed to it at construction and
//! keeps no other state, so each call observes the store as it is right now.

mod authorize;
pub mod bootstrap;
mod membership;
mod registry;

pub use authorize::Authorizer;
pub use bootstrap::{BootstrapReport, ensure_server_admins, seed_admins};
pub use membership::Membership;
pub use registry::GroupRegistry;
