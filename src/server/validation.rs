use crate::error::{Error, Result};

const MAX_GROUP_NAME_LEN: usize = 64;

fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

pub fn validate_group_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidGroupName(
            "group name cannot be empty".to_string(),
        ));
    }
    if name.len() > MAX_GROUP_NAME_LEN {
        return Err(Error::InvalidGroupName(format!(
            "group name cannot exceed {MAX_GROUP_NAME_LEN} characters"
        )));
    }
    if !name.chars().all(is_valid_name_char) {
        return Err(Error::InvalidGroupName(
            "group name can only contain alphanumeric characters, hyphens, and underscores"
                .to_string(),
        ));
    }
    Ok(())
}
