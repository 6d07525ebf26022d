//! Business logic services.
//!
//! # Services
//!
//! - `auth` - Admin password authentication and account creation
//! - `uploads` - Product image storage for the admin API

pub mod auth;
pub mod uploads;

pub use auth::{AuthError, AuthService};
pub use uploads::{ImageUpload, UploadError, save_image};
