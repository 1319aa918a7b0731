use std::path::Path;

use tracing::info;

use super::widget::{escape_html, Widget};
use crate::error::PadError;

/// Wrap a widget in a standalone HTML document.
pub fn document(title: &str, body: &Widget) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape_html(title),
        body.to_html()
    )
}

/// Write [`document`] to `path`.
pub fn write_document(path: &Path, title: &str, body: &Widget) -> Result<(), PadError> {
    std::fs::write(path, document(title, body))?;
    info!("Wrote {:?}", path);
    Ok(())
}
