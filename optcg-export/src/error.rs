use crate::OutputFormat;

/// Errors that can occur while rendering or exporting entities.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid format type specified: '{requested}'. Available formats: {}", format_list(.valid))]
    InvalidFormat {
        requested: String,
        valid: Vec<OutputFormat>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ExportError {
    pub fn invalid_format(requested: impl Into<String>, valid: &[OutputFormat]) -> Self {
        Self::InvalidFormat {
            requested: requested.into(),
            valid: valid.to_vec(),
        }
    }
}

fn format_list(valid: &[OutputFormat]) -> String {
    let names: Vec<&str> = valid.iter().map(|f| f.name()).collect();
    format!("[{}]", names.join(", "))
}
