use crate::config::SequenceConfig;
use crate::foundation::core::FrameIndex;

/// Source location of one frame: `{dir}/{index zero-padded to name_len}.{ext}`.
///
/// Indices wider than `name_len` are written in full, never truncated.
pub fn frame_source(dir: &str, name_len: usize, ext: &str, index: FrameIndex) -> String {
    format!("{dir}/{:0name_len$}.{ext}", index.0)
}

/// [`frame_source`] with the naming fields taken from a configuration.
pub fn frame_source_for(cfg: &SequenceConfig, index: FrameIndex) -> String {
    frame_source(
        &cfg.path_to_directory,
        cfg.image_name_length,
        &cfg.file_extension,
        index,
    )
}

/// Whether a source points at a remote URL rather than a path.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
