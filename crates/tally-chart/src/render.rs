//! Widget construction shared by every surface.

use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, BorderType};
use tally_core::AggregateRow;

pub const CHART_TITLE: &str = "Real-Time Average Sentiment by Category";
pub const X_AXIS_TITLE: &str = "Category";
pub const Y_AXIS_TITLE: &str = "Average Sentiment";

/// Bars take `u64` heights. Each is scaled against the largest magnitude in
/// the snapshot, so the chart maximum never exceeds this.
const BAR_RESOLUTION: u64 = 10_000;
const BAR_WIDTH: u16 = 8;
const BAR_GAP: u16 = 2;

const POSITIVE: Color = Color::LightBlue;
const NEGATIVE: Color = Color::LightRed;

/// Build the bar chart for one aggregate snapshot.
///
/// Bar height is the magnitude of the mean; negative means are drawn in a
/// different colour and every bar carries its signed value.
#[must_use]
pub fn sentiment_chart(rows: &[AggregateRow]) -> BarChart<'_> {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(Y_AXIS_TITLE).left_aligned())
        .title(Line::from(CHART_TITLE).centered())
        .title_bottom(Line::from(X_AXIS_TITLE).centered());

    let peak = peak_magnitude(rows);
    let bars: Vec<Bar<'_>> = rows.iter().map(|row| bar(row, peak)).collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(BAR_WIDTH)
        .bar_gap(BAR_GAP)
        .max(BAR_RESOLUTION);

    if bars.is_empty() {
        chart
    } else {
        chart.data(BarGroup::default().bars(&bars))
    }
}

fn bar(row: &AggregateRow, peak: f64) -> Bar<'_> {
    let color = if row.avg_sentiment < 0.0 {
        NEGATIVE
    } else {
        POSITIVE
    };
    Bar::default()
        .label(Line::from(row.label()))
        .value(height(row.avg_sentiment, peak))
        .text_value(format!("{:.2}", row.avg_sentiment))
        .style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color))
}

/// Largest absolute mean in the snapshot. NaN is ignored.
fn peak_magnitude(rows: &[AggregateRow]) -> f64 {
    rows.iter()
        .map(|r| r.avg_sentiment.abs())
        .filter(|m| !m.is_nan())
        .fold(0.0, f64::max)
}

/// Bar height in `0..=BAR_RESOLUTION`, proportional to `|value| / peak`.
///
/// An infinite peak gives infinite means a full bar and every finite mean
/// an empty one.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn height(value: f64, peak: f64) -> u64 {
    let magnitude = value.abs();
    if peak <= 0.0 || magnitude.is_nan() {
        return 0;
    }
    let ratio = if peak.is_infinite() {
        if magnitude.is_infinite() { 1.0 } else { 0.0 }
    } else {
        magnitude / peak
    };
    (ratio.clamp(0.0, 1.0) * BAR_RESOLUTION as f64).round() as u64
}
