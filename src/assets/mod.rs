/// Byte decoding into premultiplied RGBA8.
pub mod decode;
/// Single-completion image handles.
pub mod handle;
/// Asynchronous frame loading.
pub mod loader;
/// Tiered frame lookup and eager preload.
pub mod resolve;
/// Frame source naming.
pub mod source;
/// Per-identifier animation state and its registry.
pub mod store;
