//! Portal client: persisted session store and backend access

pub mod portal;
pub mod session;

pub use portal::PortalClient;
pub use session::{Session, SessionStore};
