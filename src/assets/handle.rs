use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use crate::foundation::error::SequenceResult;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded raster frame in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Completion state of an [`ImageHandle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Ready(PreparedImage),
    /// Load or decode failed; the message is kept for diagnostics only.
    Failed(String),
}

type ReadyCallback = Box<dyn FnOnce(&ImageHandle)>;

struct HandleInner {
    source: String,
    status: RefCell<LoadStatus>,
    waiters: RefCell<Vec<ReadyCallback>>,
}

/// Opaque, cheaply cloneable reference to a loaded (or loading) frame image.
///
/// A handle completes exactly once. Clones share the completion, so a handle stored in a cache
/// before its load finishes becomes drawable everywhere at the same moment.
#[derive(Clone)]
pub struct ImageHandle {
    inner: Rc<HandleInner>,
}

impl ImageHandle {
    /// A handle whose load has been issued but not completed.
    pub fn pending(source: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(HandleInner {
                source: source.into(),
                status: RefCell::new(LoadStatus::Pending),
                waiters: RefCell::new(Vec::new()),
            }),
        }
    }

    /// A handle that is already complete.
    pub fn ready(source: impl Into<String>, image: PreparedImage) -> Self {
        let h = Self::pending(source);
        h.complete(Ok(image));
        h
    }

    pub fn source(&self) -> &str {
        &self.inner.source
    }

    pub fn status(&self) -> LoadStatus {
        self.inner.status.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        matches!(*self.inner.status.borrow(), LoadStatus::Pending)
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.inner.status.borrow(), LoadStatus::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(*self.inner.status.borrow(), LoadStatus::Failed(_))
    }

    /// The decoded image, once ready.
    pub fn image(&self) -> Option<PreparedImage> {
        match &*self.inner.status.borrow() {
            LoadStatus::Ready(img) => Some(img.clone()),
            _ => None,
        }
    }

    /// Deliver the load result. Only the first call has an effect; returns whether it did.
    ///
    /// Registered [`ImageHandle::on_ready`] callbacks run after the status is updated.
    pub fn complete(&self, result: SequenceResult<PreparedImage>) -> bool {
        {
            let mut status = self.inner.status.borrow_mut();
            if !matches!(*status, LoadStatus::Pending) {
                return false;
            }
            *status = match result {
                Ok(img) => LoadStatus::Ready(img),
                Err(e) => LoadStatus::Failed(e.to_string()),
            };
        }

        let waiters = std::mem::take(&mut *self.inner.waiters.borrow_mut());
        for cb in waiters {
            cb(self);
        }
        true
    }

    /// Run `cb` when the handle completes (successfully or not), or right away if it already has.
    pub fn on_ready(&self, cb: impl FnOnce(&ImageHandle) + 'static) {
        if self.is_pending() {
            self.inner.waiters.borrow_mut().push(Box::new(cb));
        } else {
            cb(self);
        }
    }

    /// Whether both values refer to the same underlying load.
    pub fn same_handle(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match &*self.inner.status.borrow() {
            LoadStatus::Pending => "pending",
            LoadStatus::Ready(_) => "ready",
            LoadStatus::Failed(_) => "failed",
        };
        f.debug_struct("ImageHandle")
            .field("source", &self.inner.source)
            .field("status", &status)
            .field("waiters", &self.inner.waiters.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/handle.rs"]
mod tests;
