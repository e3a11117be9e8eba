//! Plain-text document loading from a directory.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use docsage_core::Result;
use docsage_store::Document;

/// File extension recognized as a source document.
const TEXT_EXTENSION: &str = "txt";

/// Load every `.txt` file in a directory (non-recursive) as a Document.
///
/// Entries are processed in filename order so document ids are stable
/// across runs. Unreadable files are skipped with a warning; a missing or
/// unreadable directory is an error.
pub fn load_documents_from_dir(dir: &Path) -> Result<Vec<Document>> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(TEXT_EXTENSION)
        })
        .collect();
    paths.sort();

    let mut documents = Vec::new();
    for path in paths {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping unreadable file {}: {}", path.display(), e);
                continue;
            }
        };

        let mut metadata = BTreeMap::new();
        metadata.insert("filename".to_string(), filename.clone());
        metadata.insert("path".to_string(), path.display().to_string());
        metadata.insert("type".to_string(), "text".to_string());

        documents.push(Document {
            id: format!("{}_{}", filename, documents.len()),
            content,
            filename,
            metadata,
            embedding: None,
        });
    }
    debug!("loaded {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}
