//! Resource views: validation, uniqueness checks and persistence for one
//! request, run inside the session the handler opened.

mod groups;
mod users;

pub use groups::GroupApiView;
pub use users::UserApiView;
