use std::collections::{BTreeMap, BTreeSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::Store;
use crate::error::{Error, Result};
use crate::types::*;

/// (namespace, group name)
type GroupKey = (String, String);

#[derive(Default)]
struct Keyspace {
    groups: BTreeMap<GroupKey, Group>,
    members: BTreeMap<GroupKey, BTreeSet<Principal>>,
    next_id: GroupId,
}

impl Keyspace {
    fn namespace_groups<'a>(&'a self, namespace: &'a str) -> impl Iterator<Item = &'a Group> {
        self.groups
            .range((namespace.to_string(), String::new())..)
            .take_while(move |(k, _)| k.0 == namespace)
            .map(|(_, group)| group)
    }
}

fn key(namespace: &str, name: &str) -> GroupKey {
    (namespace.to_string(), name.to_string())
}

/// Key-set backend: one record entry and one member set per group key.
///
/// Nothing is persisted; contents are lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    keyspace: RwLock<Keyspace>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Keyspace> {
        self.keyspace.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Keyspace> {
        self.keyspace.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Store for MemoryStore {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn group_exists(&self, namespace: &str, name: &str) -> Result<bool> {
        Ok(self.read().groups.contains_key(&key(namespace, name)))
    }

    fn get_group(&self, namespace: &str, name: &str) -> Result<Option<Group>> {
        Ok(self
            .read()
            .groups
            .get(&key(namespace, name))
            .cloned())
    }

    fn create_group(&self, group: &Group) -> Result<GroupId> {
        let mut keyspace = self.write();
        let k = key(&group.namespace, &group.name);
        if keyspace.groups.contains_key(&k) {
            return Err(Error::DuplicateGroup(group.name.clone()));
        }

        keyspace.next_id += 1;
        let id = keyspace.next_id;
        keyspace.groups.insert(k, group.clone());
        Ok(id)
    }

    fn delete_group(&self, namespace: &str, name: &str) -> Result<Group> {
        let mut keyspace = self.write();
        let k = key(namespace, name);
        if !keyspace.groups.contains_key(&k) {
            return Err(Error::GroupNotFound(name.to_string()));
        }
        if keyspace.members.get(&k).is_some_and(|set| !set.is_empty()) {
            return Err(Error::GroupNotEmpty(name.to_string()));
        }

        keyspace.members.remove(&k);
        keyspace
            .groups
            .remove(&k)
            .ok_or_else(|| Error::GroupNotFound(name.to_string()))
    }

    fn list_groups(&self, namespace: &str) -> Result<Vec<Group>> {
        Ok(self
            .read()
            .namespace_groups(namespace)
            .cloned()
            .collect())
    }

    fn add_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()> {
        let mut keyspace = self.write();
        let k = key(namespace, group);
        if !keyspace.groups.contains_key(&k) {
            return Err(Error::GroupNotFound(group.to_string()));
        }

        keyspace
            .members
            .entry(k)
            .or_default()
            .insert(principal.clone());
        Ok(())
    }

    fn remove_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()> {
        let mut keyspace = self.write();
        let k = key(namespace, group);
        if !keyspace.groups.contains_key(&k) {
            return Err(Error::GroupNotFound(group.to_string()));
        }

        let removed = keyspace
            .members
            .get_mut(&k)
            .is_some_and(|set| set.remove(principal));
        if !removed {
            return Err(Error::NotAMember {
                group: group.to_string(),
                principal: principal.to_string(),
            });
        }
        Ok(())
    }

    fn is_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<bool> {
        Ok(self
            .read()
            .members
            .get(&key(namespace, group))
            .is_some_and(|set| set.contains(principal)))
    }

    fn list_members(&self, namespace: &str, group: &str) -> Result<Vec<Principal>> {
        Ok(self
            .read()
            .members
            .get(&key(namespace, group))
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn count_members(&self, namespace: &str, group: &str) -> Result<usize> {
        Ok(self
            .read()
            .members
            .get(&key(namespace, group))
            .map_or(0, BTreeSet::len))
    }

    fn list_groups_for_principal(
        &self,
        namespace: &str,
        principal: &Principal,
    ) -> Result<Vec<Group>> {
        let keyspace = self.read();
        Ok(keyspace
            .namespace_groups(namespace)
            .filter(|group| {
                keyspace
                    .members
                    .get(&key(namespace, &group.name))
                    .is_some_and(|set| set.contains(principal))
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::contract;

    #[test]
    fn test_group_lifecycle() {
        contract::group_lifecycle(&MemoryStore::new());
    }

    #[test]
    fn test_membership() {
        contract::membership(&MemoryStore::new());
    }

    #[test]
    fn test_namespace_prefix_does_not_leak() {
        let store = MemoryStore::new();
        store.create_group(&Group::new("alpha", "a", "")).unwrap();
        store.create_group(&Group::new("alphabet", "b", "")).unwrap();

        let groups = store.list_groups("alpha").unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "a");
    }

    #[test]
    fn test_ids_are_unique() {
        let store = MemoryStore::new();
        let a = store.create_group(&Group::new("alpha", "a", "")).unwrap();
        let b = store.create_group(&Group::new("alpha", "b", "")).unwrap();
        assert_ne!(a, b);
    }
}
