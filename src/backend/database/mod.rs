//! Database abstraction layer for the trivia API
//!
//! Shared operation logic lives next to this file, one module per
//! operation. Each module defines an adapter trait that the database
//! specific code implements.
//!
//! # Architecture
//!
//! ```text
//! Common logic (question_read.rs, question_update.rs, ...)
//!     ↓
//! Database-specific implementations
//!     ├── postgres/ (PostgreSQL-specific code)
//!     └── sqlite/   (SQLite-specific code)
//! ```

pub mod category_insert;
pub mod category_read;
pub mod config;
pub mod postgres;
pub mod question_delete;
pub mod question_insert;
pub mod question_read;
pub mod question_update;
pub mod sqlite;

pub use config::DatabaseBackendConfig;

pub use category_insert::UnifiedCategoryInsertOps;
pub use category_read::UnifiedCategoryReadOps;
pub use question_delete::UnifiedQuestionDeleteOps;
pub use question_insert::UnifiedQuestionInsertOps;
pub use question_read::UnifiedQuestionReadOps;
pub use question_update::UnifiedQuestionUpdateOps;

pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;
