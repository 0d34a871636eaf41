use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Group;

#[derive(Debug, Deserialize)]
pub struct AuthorizeRequest {
    pub principal: String,
    #[serde(default)]
    pub groups: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    pub can_perform: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Group> for GroupResponse {
    fn from(group: Group) -> Self {
        Self {
            name: group.name,
            description: group.description,
            created_at: group.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub principal: String,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub group: String,
    pub principal: String,
}
