//! Data models for Staffdesk.
//!
//! These are the shapes persisted in the key-value store and returned by the services.

mod division;
mod employee;
mod page;
mod theme;
mod user;

pub use division::*;
pub use employee::*;
pub use page::*;
pub use theme::*;
pub use user::*;
