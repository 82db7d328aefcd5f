//! SQLite implementations of the database adapters

mod backend_impl;
mod category_insert_impl;
mod category_read_impl;
mod question_delete_impl;
mod question_insert_impl;
mod question_read_impl;
mod question_update_impl;
pub mod schema;

pub use backend_impl::SqliteBackend;
pub use category_insert_impl::SqliteCategoryInserter;
pub use category_read_impl::SqliteCategoryReader;
pub use question_delete_impl::SqliteQuestionDeleter;
pub use question_insert_impl::SqliteQuestionInserter;
pub use question_read_impl::SqliteQuestionReader;
pub use question_update_impl::SqliteQuestionUpdater;
