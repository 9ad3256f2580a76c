//! Local destinations for synthesized audio.
//!
//! [`PartialFile`] writes to a hidden sibling of the destination and only
//! renames it into place on [`PartialFile::commit`]. Dropping it uncommitted
//! (error, or the owning future being cancelled) removes the partial file.

use crate::{Error, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::warn;

/// Copy a byte stream into `writer`, returning the number of bytes written.
///
/// Stream errors are transport failures; write errors are sink failures
/// attributed to `path` when known.
pub(crate) async fn copy_stream<S, E, W>(
    stream: S,
    writer: &mut W,
    path: Option<&Path>,
) -> Result<u64>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Into<Error>,
    W: AsyncWrite + Unpin + ?Sized,
{
    let sink_err = |e| Error::sink(path.map(Path::to_path_buf), e);
    futures::pin_mut!(stream);
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| -> Error { e.into() })?;
        writer.write_all(&chunk).await.map_err(sink_err)?;
        written += chunk.len() as u64;
    }
    writer.flush().await.map_err(sink_err)?;
    Ok(written)
}

/// An output file that only appears at its destination once complete.
pub struct PartialFile {
    file: Option<File>,
    partial: PathBuf,
    destination: PathBuf,
    committed: bool,
}

impl PartialFile {
    /// Create the partial file next to `destination`, creating the parent
    /// directory if needed.
    pub async fn create(destination: impl Into<PathBuf>) -> Result<Self> {
        let destination = destination.into();
        let sink_err = |e| Error::sink(Some(destination.clone()), e);

        let file_name = destination
            .file_name()
            .ok_or_else(|| {
                sink_err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "destination has no file name",
                ))
            })?
            .to_string_lossy()
            .into_owned();
        let parent = match destination.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        tokio::fs::create_dir_all(&parent).await.map_err(sink_err)?;

        let partial = parent.join(format!(".{}.{}.part", file_name, uuid::Uuid::new_v4()));
        let file = File::create(&partial).await.map_err(sink_err)?;
        Ok(Self {
            file: Some(file),
            partial,
            destination,
            committed: false,
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn partial_path(&self) -> &Path {
        &self.partial
    }

    pub(crate) fn file_mut(&mut self) -> Result<&mut File> {
        let destination = &self.destination;
        self.file.as_mut().ok_or_else(|| {
            Error::sink(
                Some(destination.clone()),
                std::io::Error::new(std::io::ErrorKind::Other, "partial file already closed"),
            )
        })
    }

    /// Sync, close, and move the partial file onto the destination.
    pub async fn commit(mut self) -> Result<PathBuf> {
        let sink_err = |e| Error::sink(Some(self.destination.clone()), e);
        if let Some(mut file) = self.file.take() {
            file.flush().await.map_err(sink_err)?;
            file.sync_all().await.map_err(sink_err)?;
        }
        tokio::fs::rename(&self.partial, &self.destination)
            .await
            .map_err(sink_err)?;
        self.committed = true;
        Ok(self.destination.clone())
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // Close the handle before unlinking. Drop cannot await, so this is a
        // blocking unlink on whatever thread drops the guard.
        self.file.take();
        if let Err(e) = std::fs::remove_file(&self.partial) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!(path = %self.partial.display(), error = %e, "failed to remove partial output");
            }
        }
    }
}
