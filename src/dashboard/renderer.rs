//! Renderer trait for dashboard outputs
//!
//! Defines the interface for projecting an aggregator snapshot onto an output artifact.

use crate::aggregator_core::Snapshot;
use async_trait::async_trait;
use std::path::Path;

#[derive(Debug)]
pub enum RenderError {
    Io(std::io::Error),
    Chart(String),
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Io(err)
    }
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Io(e) => write!(f, "IO error: {}", e),
            RenderError::Chart(e) => write!(f, "Chart error: {}", e),
        }
    }
}

impl std::error::Error for RenderError {}

/// Backend trait for rendering a snapshot
#[async_trait]
pub trait SnapshotRenderer: Send {
    /// Render the snapshot, overwriting the previous output in place
    async fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError>;

    /// Get backend type for logging
    fn backend_type(&self) -> &'static str;
}

/// Create the parent directory of an output path if it is missing
pub(crate) fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
