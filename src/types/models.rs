use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the bootstrap group whose members are authorized for everything.
pub const SERVER_ADMINS: &str = "server_admins";

/// Description given to `server_admins` when bootstrap creates it.
pub const SERVER_ADMINS_DESCRIPTION: &str = "Server Admins";

pub type GroupId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub namespace: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    #[must_use]
    pub fn new(namespace: &str, name: &str, description: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Returns true if `name` is the reserved bootstrap group.
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    name == SERVER_ADMINS
}
