//! Authentication data helpers.
//!
//! Only the shape of stored user data lives here: SQL text, bind arguments
//! and row conversion. Nothing in this module opens a database connection.

pub mod user;

pub use user::User;
