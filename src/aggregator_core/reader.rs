//! Offset-tracking JSONL tail reader with truncation and rotation detection

use std::io::{ErrorKind, SeekFrom};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

#[cfg(unix)]
use std::os::unix::fs::MetadataExt;

pub struct TailReader {
    path: PathBuf,
    offset: u64,
    /// Bytes of a trailing line whose newline has not been written yet
    pending: Vec<u8>,
    inode: Option<u64>,
}

impl TailReader {
    /// Create a reader that starts from the beginning of the file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            offset: 0,
            pending: Vec::new(),
            inode: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of the next unread byte
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read every complete line appended since the previous poll
    ///
    /// Returns an empty batch when the file does not exist yet. Lines are
    /// trimmed and blank lines dropped; an unterminated trailing line is held
    /// back until its newline arrives.
    pub async fn poll_lines(&mut self) -> std::io::Result<Vec<String>> {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Data file not found, waiting: {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        if self.detect_rotation(&metadata) {
            log::info!("🔄 File rotation detected, rereading: {}", self.path.display());
            self.offset = 0;
            self.pending.clear();
        }

        #[cfg(unix)]
        {
            self.inode = Some(metadata.ino());
        }

        if metadata.len() == self.offset {
            return Ok(Vec::new());
        }

        let mut file = File::open(&self.path).await?;
        file.seek(SeekFrom::Start(self.offset)).await?;

        let mut appended = Vec::new();
        let read = file.read_to_end(&mut appended).await?;
        self.offset += read as u64;
        self.pending.extend_from_slice(&appended);

        Ok(self.drain_complete_lines())
    }

    fn drain_complete_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.pending.iter().rposition(|b| *b == b'\n') else {
            return Vec::new();
        };

        let remainder = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, remainder);

        complete
            .split(|b| *b == b'\n')
            .map(|line| String::from_utf8_lossy(line).trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Detect if the file has been rotated (inode changed) or truncated
    fn detect_rotation(&self, metadata: &std::fs::Metadata) -> bool {
        if metadata.len() < self.offset {
            return true;
        }

        #[cfg(unix)]
        {
            self.inode.map_or(false, |old| old != metadata.ino())
        }

        #[cfg(not(unix))]
        {
            false
        }
    }
}
