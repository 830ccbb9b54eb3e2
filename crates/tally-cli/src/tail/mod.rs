//! Tail loop: drain new lines from the live data file, persist each valid
//! record, and redraw the aggregate after every insert.
//!
//! The loop alternates between two states:
//! - `Reading`: open the file, seek to the cursor, consume every complete
//!   line, then move the cursor past the last one.
//! - `Waiting`: sleep for the configured interval.
//!
//! Per-line problems (blank, undecodable, invalid, store/chart failures)
//! are logged and skipped. Only file-level I/O errors end the loop.

mod error;

pub use error::TailError;

use std::convert::Infallible;
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tally_chart::Presenter;
use tally_db::MessageStore;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailState {
    Reading,
    Waiting,
}

/// Byte offset of the first unconsumed line. Starts at zero; never moves back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TailCursor(u64);

impl TailCursor {
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.0
    }

    fn advance_to(&mut self, offset: u64) {
        self.0 = self.0.max(offset);
    }
}

/// Running tally of what the loop has done. Blank lines count nowhere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TailStats {
    pub passes: u64,
    pub records: u64,
    pub json_failures: u64,
    pub validation_failures: u64,
    pub store_failures: u64,
    pub aggregate_failures: u64,
    pub chart_failures: u64,
}

/// What one `Reading` pass consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub bytes: u64,
    pub records: u64,
}

enum LineOutcome {
    Blank,
    Undecodable,
    Invalid,
    NotStored,
    Stored,
}

pub struct TailLoop<'a> {
    path: PathBuf,
    interval: Duration,
    state: TailState,
    cursor: TailCursor,
    stats: TailStats,
    store: &'a MessageStore,
    presenter: &'a mut dyn Presenter,
}

impl<'a> TailLoop<'a> {
    pub fn new(
        path: impl Into<PathBuf>,
        interval: Duration,
        store: &'a MessageStore,
        presenter: &'a mut dyn Presenter,
    ) -> Self {
        Self {
            path: path.into(),
            interval,
            state: TailState::Reading,
            cursor: TailCursor::default(),
            stats: TailStats::default(),
            store,
            presenter,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn state(&self) -> TailState {
        self.state
    }

    #[must_use]
    pub const fn cursor(&self) -> TailCursor {
        self.cursor
    }

    #[must_use]
    pub const fn stats(&self) -> TailStats {
        self.stats
    }

    /// Alternate between reading and waiting until a file-level error.
    ///
    /// # Errors
    ///
    /// Returns `TailError` when the live data file is missing or unreadable.
    /// There is no other way out; callers race this against interruption.
    pub async fn run(&mut self) -> Result<Infallible, TailError> {
        info!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis(),
            "starting message consumption with real-time chart updates"
        );
        loop {
            match self.state {
                TailState::Reading => {
                    self.poll_once().await?;
                    self.state = TailState::Waiting;
                }
                TailState::Waiting => {
                    tokio::time::sleep(self.interval).await;
                    self.state = TailState::Reading;
                }
            }
        }
    }

    /// One `Reading` pass over everything appended since the cursor.
    ///
    /// A trailing fragment without a newline is left for a later pass.
    ///
    /// # Errors
    ///
    /// Returns `TailError::NotFound` if the file does not exist, and
    /// `TailError::Read` for any other open, seek, or read failure.
    pub async fn poll_once(&mut self) -> Result<PassSummary, TailError> {
        self.state = TailState::Reading;
        let start = self.cursor.offset();

        let mut file = File::open(&self.path)
            .await
            .map_err(|e| TailError::opening(self.path.clone(), e))?;
        let len = file.metadata().await.map_err(|e| self.read_error(e))?.len();
        self.stats.passes += 1;

        if len < start {
            warn!(
                path = %self.path.display(),
                offset = start,
                len,
                "live data file is shorter than the cursor; waiting for it to grow"
            );
            return Ok(PassSummary::default());
        }

        file.seek(SeekFrom::Start(start))
            .await
            .map_err(|e| self.read_error(e))?;

        let mut reader = BufReader::new(file);
        let mut offset = start;
        let mut summary = PassSummary::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            let bytes_read = reader
                .read_until(b'\n', &mut line)
                .await
                .map_err(|e| self.read_error(e))?;

            if bytes_read == 0 {
                break;
            }
            if line.last() != Some(&b'\n') {
                debug!(offset, bytes_read, "partial line; waiting for the rest");
                break;
            }

            offset += bytes_read as u64;
            if matches!(self.handle_line(&line).await, LineOutcome::Stored) {
                summary.records += 1;
            }
        }

        self.cursor.advance_to(offset);
        summary.bytes = offset - start;
        if summary.bytes > 0 {
            debug!(
                offset,
                bytes = summary.bytes,
                records = summary.records,
                "caught up"
            );
        }
        Ok(summary)
    }

    async fn handle_line(&mut self, line: &[u8]) -> LineOutcome {
        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            return LineOutcome::Blank;
        }

        let raw: serde_json::Value = match serde_json::from_slice(trimmed) {
            Ok(value) => value,
            Err(error) => {
                self.stats.json_failures += 1;
                error!(%error, "JSON decode error");
                return LineOutcome::Undecodable;
            }
        };

        // `normalize` logs both outcomes itself.
        let Ok(record) = tally_core::normalize(&raw) else {
            self.stats.validation_failures += 1;
            return LineOutcome::Invalid;
        };

        if let Err(error) = self.store.insert(&record).await {
            self.stats.store_failures += 1;
            error!(%error, "failed to persist message");
            return LineOutcome::NotStored;
        }
        self.stats.records += 1;

        self.update_chart().await;
        LineOutcome::Stored
    }

    async fn update_chart(&mut self) {
        let rows = match self.store.compute_averages().await {
            Ok(rows) => rows,
            Err(error) => {
                self.stats.aggregate_failures += 1;
                error!(%error, "error computing averages");
                return;
            }
        };

        if let Err(error) = self.presenter.refresh(&rows) {
            self.stats.chart_failures += 1;
            error!(%error, "error updating chart");
        }
        // Let the display surface paint before the next line.
        tokio::task::yield_now().await;
    }

    fn read_error(&self, source: std::io::Error) -> TailError {
        TailError::Read {
            path: self.path.clone(),
            source,
        }
    }
}
