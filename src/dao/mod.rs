/// Database model definitions.
pub mod models;
/// Durable quiz store trait and its backends.
pub mod quiz_store;
/// Storage abstraction layer for database operations.
pub mod storage;
