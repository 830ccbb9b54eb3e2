//! Terminal surfaces.

use std::io::{self, Stdout};

use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Position;
use ratatui::{Terminal, TerminalOptions, Viewport};
use tally_core::AggregateRow;

use crate::Presenter;
use crate::error::ChartError;
use crate::render::sentiment_chart;

/// Draws the chart onto any ratatui backend.
pub struct ChartPresenter<B: Backend> {
    terminal: Terminal<B>,
    redraws: u64,
}

impl<B: Backend> ChartPresenter<B> {
    /// Full-screen presenter over `backend`.
    ///
    /// # Errors
    ///
    /// Returns `ChartError` if the backend cannot report its size.
    pub fn new(backend: B) -> Result<Self, ChartError> {
        Ok(Self {
            terminal: Terminal::new(backend)?,
            redraws: 0,
        })
    }

    /// Presenter confined to `viewport`.
    ///
    /// # Errors
    ///
    /// Returns `ChartError` if the backend cannot report its size or
    /// cursor position.
    pub fn with_viewport(backend: B, viewport: Viewport) -> Result<Self, ChartError> {
        Ok(Self {
            terminal: Terminal::with_options(backend, TerminalOptions { viewport })?,
            redraws: 0,
        })
    }

    #[must_use]
    pub const fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Number of completed redraws.
    #[must_use]
    pub const fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Park the cursor on the last row of the chart so later output starts below it.
    fn release(&mut self) -> Result<(), ChartError> {
        let area = self.terminal.get_frame().area();
        self.terminal
            .set_cursor_position(Position::new(0, area.bottom().saturating_sub(1)))?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl<B: Backend> Presenter for ChartPresenter<B> {
    fn refresh(&mut self, rows: &[AggregateRow]) -> Result<(), ChartError> {
        self.terminal
            .draw(|frame| frame.render_widget(sentiment_chart(rows), frame.area()))?;
        self.redraws += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), ChartError> {
        self.release()
    }
}

/// Inline chart on stdout, opened lazily.
///
/// Nothing touches the terminal until the first refresh, so a run that
/// fails before persisting anything leaves the screen alone.
pub struct TerminalChart {
    height: u16,
    inner: Option<ChartPresenter<CrosstermBackend<Stdout>>>,
}

impl TerminalChart {
    #[must_use]
    pub const fn new(height: u16) -> Self {
        Self {
            height,
            inner: None,
        }
    }

    fn presenter(&mut self) -> Result<&mut ChartPresenter<CrosstermBackend<Stdout>>, ChartError> {
        let presenter = match self.inner.take() {
            Some(presenter) => presenter,
            None => {
                let backend = CrosstermBackend::new(io::stdout());
                let presenter =
                    ChartPresenter::with_viewport(backend, Viewport::Inline(self.height))?;
                tracing::debug!(height = self.height, "opened inline chart");
                presenter
            }
        };
        Ok(self.inner.insert(presenter))
    }
}

impl Presenter for TerminalChart {
    fn refresh(&mut self, rows: &[AggregateRow]) -> Result<(), ChartError> {
        self.presenter()?.refresh(rows)
    }

    fn finish(&mut self) -> Result<(), ChartError> {
        match self.inner.as_mut() {
            Some(presenter) => {
                presenter.finish()?;
                println!();
                Ok(())
            }
            None => Ok(()),
        }
    }
}
