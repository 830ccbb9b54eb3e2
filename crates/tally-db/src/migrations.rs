//! Database migration runner.
//!
//! Embeds the SQL schema at compile time and executes it on open. All
//! statements use `IF NOT EXISTS` so re-running is harmless.

use crate::MessageStore;
use crate::error::DatabaseError;

/// `streamed_messages` table and its category index.
const MIGRATION_001: &str = include_str!("../migrations/001_streamed_messages.sql");

impl MessageStore {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_streamed_messages: {e}")))?;
        Ok(())
    }
}
