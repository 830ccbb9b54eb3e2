//! # tally-chart
//!
//! Bar chart of mean sentiment per category, redrawn after every persisted
//! message.
//!
//! Two surfaces implement [`Presenter`]:
//! - [`TerminalChart`]: an inline ratatui viewport on stdout, opened on the
//!   first refresh and left on screen after shutdown.
//! - [`SnapshotChart`]: headless; renders off-screen and prints the last
//!   frame at shutdown. Used when stdout is not a terminal.

mod error;
mod render;
mod snapshot;
mod terminal;

pub use error::ChartError;
pub use render::{CHART_TITLE, X_AXIS_TITLE, Y_AXIS_TITLE, sentiment_chart};
pub use snapshot::{SnapshotChart, buffer_to_string};
pub use terminal::{ChartPresenter, TerminalChart};

use tally_core::AggregateRow;

/// A drawing surface for the aggregate.
pub trait Presenter {
    /// Replace whatever is drawn with one bar per row. Zero rows draws an
    /// empty chart.
    ///
    /// # Errors
    ///
    /// Returns `ChartError` if the surface cannot be drawn to. Callers log
    /// and carry on.
    fn refresh(&mut self, rows: &[AggregateRow]) -> Result<(), ChartError>;

    /// Leave the last frame in place for the user after the loop stops.
    ///
    /// # Errors
    ///
    /// Returns `ChartError` if the final output cannot be written.
    fn finish(&mut self) -> Result<(), ChartError> {
        Ok(())
    }
}
