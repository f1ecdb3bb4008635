//! Core domain entities.
//!
//! - [`Link`] - A shortened URL owned by a user
//! - [`Click`] - A recorded redirect of a link
//! - [`Caller`] - The authenticated user behind a request
//!
//! Creation inputs use separate `New*` structs.

pub mod caller;
pub mod click;
pub mod link;

pub use caller::Caller;
pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
