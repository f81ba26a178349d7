use crate::foundation::core::Canvas;
use crate::foundation::error::{SequenceError, SequenceResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Asset root used when a configuration does not name one.
pub const DEFAULT_PATH_TO_DIRECTORY: &str =
    "https://www.stingray-software.eu/projects/stingray/webpage/data/scroll-sequences/test1-roots";

/// Widest zero-padded frame name accepted by [`SequenceConfig::validate`].
pub const MAX_IMAGE_NAME_LENGTH: usize = 32;

/// Frame file extension used when a configuration does not name one.
pub const DEFAULT_FILE_EXTENSION: &str = "jpg";

fn default_file_extension() -> String {
    DEFAULT_FILE_EXTENSION.to_owned()
}

fn default_path_to_directory() -> String {
    DEFAULT_PATH_TO_DIRECTORY.to_owned()
}

/// Per-instance configuration of one scroll-linked sequence animation.
///
/// This is the JSON-facing representation; keys are camelCase to match what host pages already
/// emit. Call [`SequenceConfig::validate`] (or mount an animation, which does) before relying on
/// any invariant below.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SequenceConfig {
    /// Key of the shared state/cache entry. Instances with the same id share loaded frames.
    pub id: String,
    /// Anchor element the container offset is measured against.
    pub parent_element_id: String,
    /// Number of frames; indices are `0..frame_count`.
    pub frame_count: u32,
    /// Zero-padding width of frame file names.
    pub image_name_length: usize,
    #[serde(default = "default_file_extension")]
    pub file_extension: String,
    /// URL or path prefix that frame file names are appended to.
    #[serde(default = "default_path_to_directory")]
    pub path_to_directory: String,
    /// Fraction of the scroll range over which the full sequence plays.
    pub scroll_area_percent: f64,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Treat the very top of the page as inside the trigger zone and paint immediately on mount.
    #[serde(default)]
    pub pinned_to_top: bool,
    /// Re-measure the container offset on every visible scroll event.
    #[serde(default)]
    pub refresh_layout_on_scroll: bool,
}

impl SequenceConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SequenceResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SequenceError::serde(format!("parse sequence config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SequenceResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SequenceError::validation(format!("open sequence config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> SequenceResult<()> {
        if self.id.trim().is_empty() {
            return Err(SequenceError::validation("id must be non-empty"));
        }
        if self.parent_element_id.trim().is_empty() {
            return Err(SequenceError::validation(
                "parentElementId must be non-empty",
            ));
        }
        if self.frame_count < 2 {
            return Err(SequenceError::validation("frameCount must be >= 2"));
        }
        if !self.scroll_area_percent.is_finite()
            || self.scroll_area_percent <= 0.0
            || self.scroll_area_percent > 1.0
        {
            return Err(SequenceError::validation(
                "scrollAreaPercent must be in (0, 1]",
            ));
        }
        if self.image_name_length > MAX_IMAGE_NAME_LENGTH {
            return Err(SequenceError::validation(format!(
                "imageNameLength must be <= {MAX_IMAGE_NAME_LENGTH}"
            )));
        }
        if self.file_extension.is_empty() {
            return Err(SequenceError::validation(
                "fileExtension must be non-empty",
            ));
        }
        Canvas::new(self.canvas_width, self.canvas_height)?;
        Ok(())
    }

    /// Intrinsic canvas size.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.canvas_width,
            height: self.canvas_height,
        }
    }

    /// DOM id of the element whose offset and scroll height drive the mapping.
    pub fn container_id(&self) -> String {
        format!("sequenceAnimationContainer_{}", self.id)
    }

    /// DOM id of the canvas the frames are painted onto.
    pub fn canvas_id(&self) -> String {
        format!("sequenceAnimationCanvas_{}", self.id)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
