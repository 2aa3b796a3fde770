//! Session configuration.
//!
//! Built in code the way the rest of the crate builds props: a plain struct
//! with a `Default`, chained `with_*` setters, and a `validate` pass that runs
//! before a session is created.
//!
//! ```ignore
//! use partition_trace::config::TraceConfig;
//!
//! let config = TraceConfig::new("RBGRBG".chars())
//!     .with_settle_delay(std::time::Duration::from_millis(50));
//! config.validate()?;
//! ```

use std::time::Duration;

use crate::error::ConfigError;
use crate::layout::ArrayLayoutStyle;
use crate::model::Pointers;

/// Initial sequence used when nothing else is supplied.
pub const DEFAULT_DATA: [char; 15] = [
    'B', 'A', 'B', 'A', 'B', 'A', 'B', 'A', 'C', 'A', 'D', 'A', 'B', 'R', 'A',
];

/// Delay between a structural change and the follow-up remeasure.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on how long the event loop blocks waiting for input (~60fps).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    /// Symbols shown in the boxes, in order.
    pub initial_data: Vec<char>,
    /// Starting pointer triple. `None` uses `lt=0, i=min(1, n-1), gt=n-1`.
    pub initial_pointers: Option<Pointers>,
    /// Settle delay before remeasuring box geometry after a swap or reset.
    pub settle_delay: Duration,
    /// Upper bound on a single input poll.
    pub poll_interval: Duration,
    /// Box sizing and flow for the array row.
    pub layout: ArrayLayoutStyle,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            initial_data: DEFAULT_DATA.to_vec(),
            initial_pointers: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
            poll_interval: DEFAULT_POLL_INTERVAL,
            layout: ArrayLayoutStyle::default(),
        }
    }
}

impl TraceConfig {
    /// Config with the given initial symbols and defaults for everything else.
    pub fn new(data: impl IntoIterator<Item = char>) -> Self {
        Self {
            initial_data: data.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_pointers(mut self, pointers: Pointers) -> Self {
        self.initial_pointers = Some(pointers);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_layout(mut self, layout: ArrayLayoutStyle) -> Self {
        self.layout = layout;
        self
    }

    /// Number of boxes in the session.
    pub fn len(&self) -> usize {
        self.initial_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial_data.is_empty()
    }

    /// The pointer triple the session starts from (and resets to).
    pub fn resolved_pointers(&self) -> Pointers {
        self.initial_pointers
            .unwrap_or_else(|| Pointers::default_for_len(self.len()))
    }

    /// Check the config can start a session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let len = self.len();
        if len == 0 {
            return Err(ConfigError::EmptyData);
        }

        let pointers = self.resolved_pointers();
        for (name, index) in [("lt", pointers.lt), ("i", pointers.i), ("gt", pointers.gt)] {
            if index >= len {
                return Err(ConfigError::PointerOutOfBounds { name, index, len });
            }
        }

        let style = &self.layout;
        if style.box_width < 3 || style.box_height < 3 {
            return Err(ConfigError::BoxTooSmall {
                width: style.box_width,
                height: style.box_height,
            });
        }
        if style.min_box_width > style.box_width {
            return Err(ConfigError::MinWidthExceedsWidth {
                min: style.min_box_width,
                width: style.box_width,
            });
        }

        Ok(())
    }
}
