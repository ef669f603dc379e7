//! Display sinks receive finished search reports.

use crate::search::SearchReport;

/// Renders a [`SearchReport`]. The report carries everything needed for
/// headers: the original input, whether it was an expression, and each
/// compound's label, exact records and ranked candidates.
pub trait DisplaySink {
    type Error;

    fn render(&mut self, report: &SearchReport) -> Result<(), Self::Error>;
}
