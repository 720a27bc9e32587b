use crate::error::ExportError;
use crate::record::Record;

/// Pretty-printed JSON array (two-space indentation). Empty input yields an
/// empty string rather than `[]`.
pub fn to_json<R: Record>(items: &[R]) -> Result<String, ExportError> {
    log::info!("Formatting {} data to JSON...", R::KIND);
    if items.is_empty() {
        return Ok(String::new());
    }
    Ok(serde_json::to_string_pretty(items)?)
}
