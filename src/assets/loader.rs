use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::assets::decode::decode_image;
use crate::assets::handle::{ImageHandle, PreparedImage};
use crate::assets::source::is_remote;
use crate::foundation::error::{SequenceError, SequenceResult};

/// Capability for issuing asynchronous frame loads.
///
/// `load` must return immediately with a pending handle; the loader completes it later (possibly
/// out of request order). There is no cancellation: a load that becomes irrelevant still completes.
pub trait ImageLoader {
    fn load(&mut self, source: &str) -> ImageHandle;
}

/// Loads frames from the local filesystem.
///
/// Requests are queued by [`ImageLoader::load`] and completed in batches by
/// [`FsImageLoader::poll`], which reads and decodes the batch in parallel and then completes the
/// handles on the calling thread.
pub struct FsImageLoader {
    root: PathBuf,
    queue: Vec<ImageHandle>,
    issued: u64,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            queue: Vec::new(),
            issued: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Total loads requested so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Loads requested but not yet completed.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Map a frame source onto the filesystem.
    ///
    /// Sources are resolved under the loader root; a leading `/` is treated as site-root relative.
    /// Remote URLs are rejected.
    pub fn resolve_path(&self, source: &str) -> SequenceResult<PathBuf> {
        if is_remote(source) {
            return Err(SequenceError::load(format!(
                "remote source '{source}' is not supported by the filesystem loader"
            )));
        }
        let rel = source.trim_start_matches('/');
        if rel.is_empty() {
            return Err(SequenceError::load("frame source must name a file"));
        }
        Ok(self.root.join(rel))
    }

    /// Complete every queued load. Returns how many handles were completed.
    #[tracing::instrument(skip(self), fields(queued = self.queue.len()))]
    pub fn poll(&mut self) -> usize {
        let batch = std::mem::take(&mut self.queue);
        if batch.is_empty() {
            return 0;
        }

        let paths: Vec<SequenceResult<PathBuf>> = batch
            .iter()
            .map(|h| self.resolve_path(h.source()))
            .collect();
        let decoded: Vec<SequenceResult<PreparedImage>> =
            paths.into_par_iter().map(read_and_decode).collect();

        for (handle, result) in batch.iter().zip(decoded) {
            if let Err(e) = &result {
                tracing::debug!(source = handle.source(), error = %e, "frame load failed");
            }
            handle.complete(result);
        }
        batch.len()
    }
}

impl ImageLoader for FsImageLoader {
    fn load(&mut self, source: &str) -> ImageHandle {
        self.issued += 1;
        let handle = ImageHandle::pending(source);
        self.queue.push(handle.clone());
        handle
    }
}

fn read_and_decode(path: SequenceResult<PathBuf>) -> SequenceResult<PreparedImage> {
    let path = path?;
    let bytes =
        std::fs::read(&path).with_context(|| format!("read frame '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
