//! Headless surface: render into an off-screen buffer.

use std::io::Write;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use tally_core::AggregateRow;

use crate::Presenter;
use crate::error::ChartError;
use crate::render::sentiment_chart;

const SNAPSHOT_WIDTH: u16 = 100;

/// Keeps the most recent frame as text and prints it at shutdown.
pub struct SnapshotChart {
    area: Rect,
    last: Option<String>,
}

impl SnapshotChart {
    #[must_use]
    pub const fn new(height: u16) -> Self {
        Self {
            area: Rect::new(0, 0, SNAPSHOT_WIDTH, height),
            last: None,
        }
    }

    /// Text of the most recent frame, if any refresh has happened.
    #[must_use]
    pub fn snapshot(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Write the most recent frame to `out`.
    ///
    /// # Errors
    ///
    /// Returns `ChartError` if writing fails.
    pub fn write_to(&self, out: &mut impl Write) -> Result<(), ChartError> {
        if let Some(frame) = &self.last {
            writeln!(out, "{frame}")?;
        }
        Ok(())
    }
}

impl Presenter for SnapshotChart {
    fn refresh(&mut self, rows: &[AggregateRow]) -> Result<(), ChartError> {
        let mut buffer = Buffer::empty(self.area);
        sentiment_chart(rows).render(self.area, &mut buffer);
        self.last = Some(buffer_to_string(&buffer));
        tracing::debug!(categories = rows.len(), "rendered chart snapshot");
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ChartError> {
        self.write_to(&mut std::io::stdout().lock())
    }
}

/// Flatten a buffer into lines, trimming trailing blanks.
#[must_use]
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut lines = Vec::new();
    for y in 0..buffer.area.height {
        let mut line = String::new();
        for x in 0..buffer.area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        while line.ends_with(' ') {
            line.pop();
        }
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}
