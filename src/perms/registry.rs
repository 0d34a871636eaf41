use std::sync::Arc;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{Group, is_reserved};

/// Manages the existence of permission groups within a namespace.
#[derive(Clone)]
pub struct GroupRegistry {
    store: Arc<dyn Store>,
}

impl GroupRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn create(&self, namespace: &str, name: &str, description: &str) -> Result<Group> {
        if is_reserved(name) {
            return Err(Error::ReservedGroupName(name.to_string()));
        }
        if self.store.group_exists(namespace, name)? {
            return Err(Error::DuplicateGroup(name.to_string()));
        }

        let group = Group::new(namespace, name, description);
        self.store.create_group(&group)?;
        tracing::info!(namespace, group = name, "created permission group");
        Ok(group)
    }

    /// Deletes an empty group. Members are never removed implicitly.
    pub fn delete(&self, namespace: &str, name: &str) -> Result<Group> {
        if is_reserved(name) {
            return Err(Error::ReservedGroupName(name.to_string()));
        }

        let group = self.store.delete_group(namespace, name)?;
        tracing::info!(namespace, group = name, "deleted permission group");
        Ok(group)
    }

    pub fn list(&self, namespace: &str) -> Result<Vec<Group>> {
        let groups = self.store.list_groups(namespace)?;
        if groups.is_empty() {
            return Err(Error::NoPermissionsConfigured(namespace.to_string()));
        }
        Ok(groups)
    }

    pub fn get(&self, namespace: &str, name: &str) -> Result<Group> {
        self.store
            .get_group(namespace, name)?
            .ok_or_else(|| Error::GroupNotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perms::testing::{broken_store, stores};
    use crate::types::{Principal, SERVER_ADMINS};

    #[test]
    fn test_create_then_list() {
        for store in stores() {
            let registry = GroupRegistry::new(store);
            registry.create("alpha", "g", "d").unwrap();

            let groups = registry.list("alpha").unwrap();
            let matching: Vec<_> = groups.iter().filter(|g| g.name == "g").collect();
            assert_eq!(matching.len(), 1);
            assert_eq!(matching[0].description, "d");
        }
    }

    #[test]
    fn test_reserved_name_rejected() {
        for store in stores() {
            let registry = GroupRegistry::new(store);
            assert!(matches!(
                registry.create("alpha", SERVER_ADMINS, "x"),
                Err(Error::ReservedGroupName(_))
            ));
            assert!(matches!(
                registry.delete("alpha", SERVER_ADMINS),
                Err(Error::ReservedGroupName(_))
            ));
        }
    }

    #[test]
    fn test_duplicate_rejected() {
        for store in stores() {
            let registry = GroupRegistry::new(store);
            registry.create("alpha", "officers", "").unwrap();
            assert!(matches!(
                registry.create("alpha", "officers", ""),
                Err(Error::DuplicateGroup(name)) if name == "officers"
            ));
            registry.create("beta", "officers", "").unwrap();
        }
    }

    #[test]
    fn test_empty_namespace_has_no_permissions() {
        for store in stores() {
            let registry = GroupRegistry::new(store);
            assert!(matches!(
                registry.list("beta"),
                Err(Error::NoPermissionsConfigured(ns)) if ns == "beta"
            ));
        }
    }

    #[test]
    fn test_delete_refuses_non_empty_group() {
        for store in stores() {
            let registry = GroupRegistry::new(store.clone());
            registry.create("alpha", "officers", "").unwrap();
            let principal = Principal::parse("42").unwrap();
            store.add_member("alpha", "officers", &principal).unwrap();

            assert!(matches!(
                registry.delete("alpha", "officers"),
                Err(Error::GroupNotEmpty(_))
            ));

            store.remove_member("alpha", "officers", &principal).unwrap();
            let deleted = registry.delete("alpha", "officers").unwrap();
            assert_eq!(deleted.name, "officers");
            assert!(matches!(
                registry.delete("alpha", "officers"),
                Err(Error::GroupNotFound(_))
            ));
        }
    }

    #[test]
    fn test_get_missing_group() {
        for store in stores() {
            let registry = GroupRegistry::new(store);
            assert!(matches!(
                registry.get("alpha", "officers"),
                Err(Error::GroupNotFound(_))
            ));
        }
    }

    #[test]
    fn test_store_failure_is_not_no_permissions() {
        let registry = GroupRegistry::new(broken_store());
        assert!(matches!(
            registry.list("alpha"),
            Err(Error::StoreUnavailable(_))
        ));
        assert!(matches!(
            registry.create("alpha", "officers", ""),
            Err(Error::StoreUnavailable(_))
        ));
    }
}
