//! # courant-shared
//!
//! Domain types shared by every Courant crate: records and their
//! ordering keys, author identity, the injected session context, and
//! the error enums.  Everything handed to the UI layer derives
//! `Serialize` so it can cross an IPC boundary unchanged.

pub mod constants;
pub mod error;
pub mod session;
pub mod types;

pub use error::{SubscriptionError, ValidationError};
pub use session::Session;
pub use types::*;
