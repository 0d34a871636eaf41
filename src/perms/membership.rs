use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Group, Principal, is_reserved};

/// Manages which principals belong to a group.
#[derive(Clone)]
pub struct Membership {
    store: Arc<dyn Store>,
}

impl Membership {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Adding a principal that is already present succeeds without change.
    pub fn add_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()> {
        if is_reserved(group) {
            return Err(Error::ReservedGroupName(group.to_string()));
        }
        self.require_group(namespace, group)?;

        self.store.add_member(namespace, group, principal)?;
        tracing::info!(namespace, group, %principal, "added member");
        Ok(())
    }

    pub fn remove_member(
        &self,
        namespace: &str,
        group: &str,
        principal: &Principal,
    ) -> Result<()> {
        if is_reserved(group) {
            return Err(Error::ReservedGroupName(group.to_string()));
        }
        self.require_group(namespace, group)?;

        self.store.remove_member(namespace, group, principal)?;
        tracing::info!(namespace, group, %principal, "removed member");
        Ok(())
    }

    pub fn list_members(&self, namespace: &str, group: &str) -> Result<Vec<Principal>> {
        self.require_group(namespace, group)?;
        self.store.list_members(namespace, group)
    }

    /// Groups the principal belongs to. An empty result is not an error.
    pub fn list_groups_for_principal(
        &self,
        namespace: &str,
        principal: &Principal,
    ) -> Result<Vec<Group>> {
        self.store.list_groups_for_principal(namespace, principal)
    }

    fn require_group(&self, namespace: &str, group: &str) -> Result<()> {
        if !self.store.group_exists(namespace, group)? {
            return Err(Error::GroupNotFound(group.to_string()));
        }
        Ok(())
    }
}
