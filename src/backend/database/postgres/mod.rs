//! PostgreSQL implementations of the database adapters

mod backend_impl;
mod category_insert_impl;
mod category_read_impl;
mod question_delete_impl;
mod question_insert_impl;
mod question_read_impl;
mod question_update_impl;
pub mod schema;

pub use backend_impl::PostgresBackend;
pub use category_insert_impl::PostgresCategoryInserter;
pub use category_read_impl::PostgresCategoryReader;
pub use question_delete_impl::PostgresQuestionDeleter;
pub use question_insert_impl::PostgresQuestionInserter;
pub use question_read_impl::PostgresQuestionReader;
pub use question_update_impl::PostgresQuestionUpdater;
