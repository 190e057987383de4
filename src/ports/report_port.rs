//! Report generation port trait.

use std::io::Write;

use crate::domain::error::FolioError;
use crate::domain::normalizer::Extraction;
use crate::domain::valuation::ValuationReport;

/// Port for rendering valuation results.
pub trait ReportPort {
    fn write(&self, report: &ValuationReport, out: &mut dyn Write) -> Result<(), FolioError>;

    /// Default implementation: ignores the extraction diagnostics and writes
    /// only the valuation.
    fn write_with_diagnostics(
        &self,
        report: &ValuationReport,
        _extraction: &Extraction,
        out: &mut dyn Write,
    ) -> Result<(), FolioError> {
        self.write(report, out)
    }
}
