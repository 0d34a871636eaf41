//! Start-up checks for the reserved `server_admins` group.
//!
//! This is the only code allowed to create `server_admins` or change its
//! membership. The generic registry and membership paths refuse both.

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Group, Principal, SERVER_ADMINS, SERVER_ADMINS_DESCRIPTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    /// True if `server_admins` was missing and has been created.
    pub created: bool,
    pub admin_count: usize,
}

/// Ensures `server_admins` exists in `namespace`, creating it if absent.
///
/// A namespace without administrators is logged as a warning, not an error.
pub fn ensure_server_admins(store: &dyn Store, namespace: &str) -> Result<BootstrapReport> {
    let created = if store.group_exists(namespace, SERVER_ADMINS)? {
        tracing::info!(namespace, "{SERVER_ADMINS} found");
        false
    } else {
        tracing::info!(namespace, "{SERVER_ADMINS} not found, creating");
        match store.create_group(&Group::new(
            namespace,
            SERVER_ADMINS,
            SERVER_ADMINS_DESCRIPTION,
        )) {
            Ok(_) => true,
            // Another instance created it first.
            Err(Error::DuplicateGroup(_)) => false,
            Err(e) => return Err(e),
        }
    };

    let admin_count = store.count_members(namespace, SERVER_ADMINS)?;
    if admin_count == 0 {
        tracing::warn!(
            namespace,
            "No admins defined for {SERVER_ADMINS}; seed one with `permd admin seed` or the `admins` config key"
        );
    }

    Ok(BootstrapReport {
        created,
        admin_count,
    })
}

/// Adds principals to `server_admins`, creating the group if needed.
pub fn seed_admins(store: &dyn Store, namespace: &str, principals: &[Principal]) -> Result<()> {
    if !store.group_exists(namespace, SERVER_ADMINS)? {
        ensure_server_admins(store, namespace)?;
    }

    for principal in principals {
        store.add_member(namespace, SERVER_ADMINS, principal)?;
        tracing::info!(namespace, %principal, "seeded {SERVER_ADMINS} member");
    }
    Ok(())
}
