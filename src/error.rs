use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[source] BoxError),

    #[error("you cannot modify the reserved group `{0}`")]
    ReservedGroupName(String),

    #[error("permission group already exists: `{0}`")]
    DuplicateGroup(String),

    #[error("no such permission group: `{0}`")]
    GroupNotFound(String),

    #[error("permission group `{0}` still has members")]
    GroupNotEmpty(String),

    #[error("`{principal}` is not a member of `{group}`")]
    NotAMember { group: String, principal: String },

    #[error("no permissions configured in namespace `{0}`")]
    NoPermissionsConfigured(String),

    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("invalid group name: {0}")]
    InvalidGroupName(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::StoreUnavailable(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
