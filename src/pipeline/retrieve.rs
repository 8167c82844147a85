//! Source retrieval from the object store.
//!
//! A separate existence check precedes the download so a missing object
//! yields a precise not-found error carrying the reference, rather than
//! whatever generic failure the store's download path produces. No retry at
//! this stage.

use crate::clients::ObjectStore;
use crate::error::Pdf2QuizError;
use tracing::{debug, info};

/// Fetch the raw bytes of the object at `source_path`.
pub async fn fetch_source(
    store: &dyn ObjectStore,
    source_path: &str,
) -> Result<Vec<u8>, Pdf2QuizError> {
    if !store.exists(source_path).await? {
        return Err(Pdf2QuizError::SourceNotFound {
            path: source_path.to_string(),
        });
    }

    let bytes = store.download(source_path).await?;
    info!("fetched {} ({} bytes)", source_path, bytes.len());
    debug!("source head: {:?}", &bytes[..bytes.len().min(8)]);
    Ok(bytes)
}

/// The last path segment of a source reference, used for filenames and the
/// set's display name. An empty or trailing-slash path falls back to a
/// generic name, as the original upload flow never produces one.
pub fn source_filename(source_path: &str) -> &str {
    match source_path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => "document.pdf",
    }
}
