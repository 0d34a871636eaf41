mod models;
mod principal;

pub use models::*;
pub use principal::Principal;
