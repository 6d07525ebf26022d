//! Request-scoped models for the showroom server.

pub mod session;

pub use session::CurrentAdmin;
pub use session::keys as session_keys;
