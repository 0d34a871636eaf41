use std::sync::Arc;

use crate::error::Result;
use crate::store::Store;
use crate::types::{Principal, SERVER_ADMINS};

/// Decides whether a principal may perform an action guarded by a list of
/// candidate groups.
#[derive(Clone)]
pub struct Authorizer {
    store: Arc<dyn Store>,
}

impl Authorizer {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Members of `server_admins` are always authorized. Otherwise candidates
    /// are checked in order and the first match wins. A candidate that does
    /// not exist counts as a non-match; only store failures are errors.
    pub fn authorize<S: AsRef<str>>(
        &self,
        namespace: &str,
        principal: &Principal,
        candidates: &[S],
    ) -> Result<bool> {
        if self.store.is_member(namespace, SERVER_ADMINS, principal)? {
            tracing::debug!(namespace, %principal, "authorized as server admin");
            return Ok(true);
        }

        for group in candidates {
            let group = group.as_ref();
            if self.store.is_member(namespace, group, principal)? {
                tracing::debug!(namespace, %principal, group, "authorized by group");
                return Ok(true);
            }
        }

        Ok(false)
    }
}
