use std::path::Path;

use crate::error::DocumentError;

use super::Document;

/// Reads a document file and normalizes its records. A missing file yields an empty document titled
/// after the file stem.
pub async fn read_document(path: &Path) -> Result<Document, DocumentError> {
    if !tokio::fs::try_exists(path).await? {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        tracing::info!(path = %path.display(), "Document file not found; starting empty");
        return Ok(Document::new(title));
    }
    let text = tokio::fs::read_to_string(path).await?;
    let mut document: Document = serde_json::from_str(&text)?;
    document.normalize();
    Ok(document)
}

pub async fn write_document(path: &Path, document: &Document) -> Result<(), DocumentError> {
    let text = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, text).await?;
    tracing::info!(path = %path.display(), "Document saved");
    Ok(())
}
