//! Exclusive owner of one granted stream.

use crate::device::VideoStream;

/// Owning handle over a [`VideoStream`].
///
/// [`release`](Self::release) stops the tracks at most once. Dropping a
/// handle that still holds a stream releases it as well, so a session
/// torn down mid-flight never leaks the device.
pub struct StreamHandle {
    stream: Option<Box<dyn VideoStream>>,
}

impl StreamHandle {
    pub fn new(stream: Box<dyn VideoStream>) -> Self {
        Self {
            stream: Some(stream),
        }
    }

    /// The held stream, or `None` once released.
    pub fn stream(&self) -> Option<&dyn VideoStream> {
        self.stream.as_deref()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    /// Stop all tracks and drop the stream.
    ///
    /// Returns `true` if a stream was actually released.
    pub fn release(&mut self) -> bool {
        match self.stream.take() {
            Some(mut stream) => {
                stream.stop_tracks();
                true
            }
            None => false,
        }
    }
}

impl Drop for StreamHandle {
    fn drop(&mut self) {
        if self.release() {
            tracing::debug!("Camera stream released on drop");
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle")
            .field("live", &self.is_live())
            .finish()
    }
}
