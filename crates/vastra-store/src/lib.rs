//! VastraVaani Store — SQLite user accounts and JSON-file bookmarks.

pub mod bookmarks;
pub mod schema;
pub mod types;
pub mod users;

pub use bookmarks::BookmarkStore;
pub use types::*;
pub use users::UserStore;
