//! Presentation sinks for ranking passes
//!
//! The ranking core hands finished passes to a [`RankingSink`]; how entries
//! are laid out (dates, percentages, dashboard links) is entirely up to the
//! sink.

mod console;
mod json;

pub use self::console::ConsoleSink;
pub use self::json::{FailureReport, JsonSink};

use crate::error::SonarRankError;
use crate::ranking::RankedList;
use crate::session::Progress;
use std::io;

/// Destination of rendered rankings
pub trait RankingSink {
    /// Record a component that could not be loaded
    fn report_failure(&mut self, error: &SonarRankError);

    /// Render every ranking pass over the current collection
    ///
    /// May be called repeatedly while the collection is still growing.
    fn render(&mut self, progress: &Progress, rankings: &[RankedList<'_>]) -> io::Result<()>;

    /// Flush anything held back until the run is over
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}
