//! JSON reader for portfolio documents.

use std::io::Read;

use crate::domain::error::FolioError;
use crate::domain::tree::Node;

pub fn read_tree<R: Read>(reader: R, source: &str) -> Result<Node, FolioError> {
    let value: serde_json::Value =
        serde_json::from_reader(reader).map_err(|e| FolioError::SourceFormat {
            path: source.to_string(),
            reason: format!("invalid JSON: {e}"),
        })?;
    Ok(Node::from(value))
}
