//! Page-level views. The console has a single page, mounted directly by `App`.

mod users;

pub(crate) use users::UsersPage;
