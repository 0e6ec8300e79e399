//! Authentication and authorization

pub mod claims;
pub mod gateway;
pub mod models;

pub use claims::{issue_token, verify_token, Claims};
pub use gateway::{authenticate, authorize_role, extract_credential};
pub use models::{Identity, LoginRequest, LoginResponse, Role};
