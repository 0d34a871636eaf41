pub mod dto;
mod perms;
pub mod response;
mod router;
pub mod validation;

pub use perms::perms_router;
pub use router::{AppState, create_router};
