//! CSV export.
//!
//! One bare header line followed by one line per record. Record fields are
//! always quoted, so the file reads back losslessly in any spreadsheet.

use super::ExportSnapshot;
use crate::app::results::SortColumn;
use crate::domain::ExportError;
use ::csv::{QuoteStyle, WriterBuilder};

/// Renders the snapshot as CSV, dates in display form.
///
/// # Errors
///
/// [`ExportError::Csv`] if the writer rejects a record.
pub fn render(snapshot: &ExportSnapshot) -> Result<Vec<u8>, ExportError> {
    let mut header = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());
    header.write_record(SortColumn::ALL.iter().map(|c| c.label()))?;
    let buf = header.into_inner().map_err(|e| ExportError::Io(e.into_error()))?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(buf);
    for r in &snapshot.records {
        let date = r.display_date();
        writer.write_record([
            r.title.as_str(),
            r.authors.as_str(),
            r.journal_name.as_str(),
            date.as_str(),
            r.doi.as_str(),
            r.source.as_str(),
        ])?;
    }

    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
