//! Append-only writes of normalized messages.

use tally_core::NormalizedRecord;

use crate::MessageStore;
use crate::error::DatabaseError;

impl MessageStore {
    /// Append one record as a single row.
    ///
    /// One `INSERT` statement, so the row is either written whole or not at all.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert fails.
    pub async fn insert(&self, record: &NormalizedRecord) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO streamed_messages
                 (message, author, timestamp, category, sentiment, keyword_mentioned, message_length)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    record.message.as_deref(),
                    record.author.as_deref(),
                    record.timestamp.as_deref(),
                    record.category.as_deref(),
                    record.sentiment,
                    record.keyword_mentioned.as_deref(),
                    record.message_length
                ],
            )
            .await?;
        tracing::debug!(category = ?record.category, "inserted message");
        Ok(())
    }

    /// Number of persisted messages.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count(&self) -> Result<u64, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT COUNT(*) FROM streamed_messages", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(u64::try_from(row.get::<i64>(0)?).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn insert_stores_every_column() {
        let store = MessageStore::open_local(":memory:").await.unwrap();
        let record = NormalizedRecord {
            message: Some("Just shared a meme! It was amazing.".to_string()),
            author: Some("Charlie".to_string()),
            timestamp: Some("2025-01-29 14:35:20".to_string()),
            category: Some("humor".to_string()),
            sentiment: 0.87,
            keyword_mentioned: Some("meme".to_string()),
            message_length: 35,
        };
        store.insert(&record).await.unwrap();

        let mut rows = store
            .conn()
            .query(
                "SELECT id, message, author, timestamp, category, sentiment, keyword_mentioned, message_length
                 FROM streamed_messages",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
        let stored = NormalizedRecord {
            message: row.get::<Option<String>>(1).unwrap(),
            author: row.get::<Option<String>>(2).unwrap(),
            timestamp: row.get::<Option<String>>(3).unwrap(),
            category: row.get::<Option<String>>(4).unwrap(),
            sentiment: row.get::<f64>(5).unwrap(),
            keyword_mentioned: row.get::<Option<String>>(6).unwrap(),
            message_length: row.get::<i64>(7).unwrap(),
        };
        assert_eq!(stored, record);
        assert!(rows.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn optional_fields_store_as_null() {
        let store = MessageStore::open_local(":memory:").await.unwrap();
        store.insert(&NormalizedRecord::default()).await.unwrap();

        let mut rows = store
            .conn()
            .query(
                "SELECT COUNT(*) FROM streamed_messages WHERE category IS NULL AND author IS NULL",
                (),
            )
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 1);
    }

    #[tokio::test]
    async fn count_tracks_inserts() {
        let store = MessageStore::open_local(":memory:").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
        for _ in 0..3 {
            store.insert(&NormalizedRecord::default()).await.unwrap();
        }
        assert_eq!(store.count().await.unwrap(), 3);
    }
}
