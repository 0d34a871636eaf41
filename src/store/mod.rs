mod memory;
mod schema;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::types::*;

/// Store defines the backing store interface for permission groups and
/// their member sets.
///
/// Every call is scoped to a namespace. Implementations translate their own
/// "missing row" or "missing key" conditions into `Error::GroupNotFound` and
/// `Error::NotAMember` so callers never branch on storage details.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Group operations
    fn group_exists(&self, namespace: &str, name: &str) -> Result<bool>;
    fn get_group(&self, namespace: &str, name: &str) -> Result<Option<Group>>;
    fn create_group(&self, group: &Group) -> Result<GroupId>;
    fn delete_group(&self, namespace: &str, name: &str) -> Result<Group>;
    fn list_groups(&self, namespace: &str) -> Result<Vec<Group>>;

    // Membership operations
    fn add_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()>;
    fn remove_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<()>;
    fn is_member(&self, namespace: &str, group: &str, principal: &Principal) -> Result<bool>;
    fn list_members(&self, namespace: &str, group: &str) -> Result<Vec<Principal>>;
    fn count_members(&self, namespace: &str, group: &str) -> Result<usize>;
    fn list_groups_for_principal(&self, namespace: &str, principal: &Principal)
    -> Result<Vec<Group>>;
}
