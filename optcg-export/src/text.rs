use crate::record::Record;

/// One summary line per item, joined by newlines.
pub fn to_text<R: Record>(items: &[R]) -> String {
    log::info!("Formatting {} data to text...", R::KIND);
    items
        .iter()
        .map(R::text_line)
        .collect::<Vec<_>>()
        .join("\n")
}
