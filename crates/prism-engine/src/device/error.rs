use thiserror::Error;

/// Failure reported by a graphics backend call.
///
/// Backends carry the failing operation and the driver/API message; the
/// surface layer decides how fatal it is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct DeviceError {
    pub operation: &'static str,
    pub message: String,
}

impl DeviceError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// Surface lifecycle and frame errors.
///
/// None of these are retried. A window that hits `CreationFailed`,
/// `ResizeFailed` or `FrameFailed` stops rendering; the embedding application
/// decides whether to close it or build a fresh one.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Factory lookup, swap chain creation or the first view creation failed.
    #[error("failed to create presentation surface")]
    CreationFailed(#[source] DeviceError),

    /// Resize-buffers or view re-creation failed mid-session.
    #[error("failed to resize presentation surface to {width}x{height}")]
    ResizeFailed {
        width: u32,
        height: u32,
        #[source]
        source: DeviceError,
    },

    /// Render target requested before any successful `ensure_surface`.
    #[error("presentation surface is not ready")]
    NotReady,

    /// A previous create/resize failed; the surface holds no resources.
    #[error("presentation surface is faulted after an earlier failure")]
    Faulted,

    /// Zero-area sizes cannot back a swap chain.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// Bind, clear, draw submission, extension drawing or present failed.
    #[error("frame rendering failed")]
    FrameFailed(#[source] DeviceError),
}

impl SurfaceError {
    /// Returns `true` for errors after which the window can no longer render.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, SurfaceError::InvalidSize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_error_display_names_operation() {
        let e = DeviceError::new("resize_buffers", "device removed");
        assert_eq!(e.to_string(), "resize_buffers failed: device removed");
    }

    #[test]
    fn resize_failure_keeps_source() {
        let e = SurfaceError::ResizeFailed {
            width: 10,
            height: 20,
            source: DeviceError::new("resize_buffers", "lost"),
        };
        let source = std::error::Error::source(&e).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("resize_buffers failed: lost"));
        assert!(e.is_fatal());
        assert!(!SurfaceError::InvalidSize { width: 0, height: 1 }.is_fatal());
    }
}
