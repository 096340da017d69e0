//! Domain entities - the core business objects.

mod group;
mod user;

pub use group::{Group, NewGroup};
pub use user::{NewUser, User, UserChanges};
