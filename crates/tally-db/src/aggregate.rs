//! Per-category mean sentiment, recomputed from the full table.
//!
//! Nothing is cached: every call re-reads `streamed_messages`, so the
//! result always reflects exactly what has been persisted.

use tally_core::AggregateRow;

use crate::MessageStore;
use crate::error::DatabaseError;

impl MessageStore {
    /// Mean `sentiment` for each distinct `category`.
    ///
    /// Rows come back in whatever order the grouped read yields. An empty
    /// table returns an empty vector. Read-only.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or a row read fails.
    pub async fn compute_averages(&self) -> Result<Vec<AggregateRow>, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                "SELECT category, AVG(sentiment) AS avg_sentiment
                 FROM streamed_messages
                 GROUP BY category",
                (),
            )
            .await?;

        let mut averages = Vec::new();
        while let Some(row) = rows.next().await? {
            averages.push(AggregateRow {
                category: row.get::<Option<String>>(0)?,
                avg_sentiment: row.get::<f64>(1)?,
            });
        }
        tracing::debug!(categories = averages.len(), "computed averages");
        Ok(averages)
    }
}
