//! Chart display configuration.

use serde::{Deserialize, Serialize};

/// Default height of the inline chart, in terminal rows.
const fn default_height() -> u16 {
    20
}

/// Smallest height that still leaves room for borders, labels, and bars.
pub const MIN_CHART_HEIGHT: u16 = 5;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ChartConfig {
    /// Rows reserved for the chart below the cursor.
    #[serde(default = "default_height")]
    pub height: u16,

    /// Render off-screen and print the final frame at shutdown.
    #[serde(default)]
    pub headless: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            headless: false,
        }
    }
}
