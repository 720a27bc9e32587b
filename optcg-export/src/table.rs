use crate::error::ExportError;
use crate::record::Record;

/// CSV with a header row and every field quoted. No trailing newline.
pub fn to_csv<R: Record>(items: &[R]) -> Result<String, ExportError> {
    log::info!("Formatting {} data to CSV...", R::KIND);
    if items.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(R::FIELDS)?;
    for item in items {
        writer.write_record(item.cells())?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    let mut out = String::from_utf8(bytes)?;
    while out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}
