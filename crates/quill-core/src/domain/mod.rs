//! Domain entities - the core business objects.

mod caller;

mod post;

mod user;

pub use caller::{Caller, Role};
pub use post::{Post, PostStatus};
pub use user::User;
