//! Capture session lifecycle.
//!
//! ```text
//! Initializing --start() granted--> Ready --stop()--> Initializing
//!      |                              |
//!      +--start() refused--> Failed <-+ (retry() = stop() + start())
//! ```
//!
//! The session holds at most one [`StreamHandle`]. Every exit path
//! (explicit [`stop`](CaptureSession::stop), a new `start()`, or dropping
//! the session) releases it.

use crate::device::{CameraDevice, StreamConstraints, VideoStream};
use crate::error::CameraError;
use crate::handle::StreamHandle;
use crate::snapshot::{CapturedImage, JPEG_QUALITY};

/// Readiness of a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    /// No stream is held yet, or it has been released.
    Initializing,
    /// A stream is held and snapshots can be taken.
    Ready,
    /// The last `start()` was refused; see [`CaptureSession::last_error`].
    Failed,
}

/// Exclusive owner of one device's camera stream.
pub struct CaptureSession<D> {
    device: D,
    constraints: StreamConstraints,
    stream: Option<StreamHandle>,
    ready_state: ReadyState,
    last_error: Option<CameraError>,
    jpeg_quality: u8,
}

impl<D: CameraDevice> CaptureSession<D> {
    /// Create an idle session using the default front-camera constraints.
    pub fn new(device: D) -> Self {
        Self::with_constraints(device, StreamConstraints::default())
    }

    pub fn with_constraints(device: D, constraints: StreamConstraints) -> Self {
        Self {
            device,
            constraints,
            stream: None,
            ready_state: ReadyState::Initializing,
            last_error: None,
            jpeg_quality: JPEG_QUALITY,
        }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn is_ready(&self) -> bool {
        self.ready_state == ReadyState::Ready
    }

    pub fn last_error(&self) -> Option<&CameraError> {
        self.last_error.as_ref()
    }

    /// The live stream for preview rendering, while `Ready`.
    pub fn preview(&self) -> Option<&dyn VideoStream> {
        if !self.is_ready() {
            return None;
        }
        self.stream.as_ref().and_then(StreamHandle::stream)
    }

    /// Request a stream from the device.
    ///
    /// On grant the session becomes `Ready`. On refusal it becomes
    /// `Failed`, records the error and returns it. There is no automatic
    /// retry. A stream still held from an earlier `start()` is released
    /// before the new request is made.
    pub async fn start(&mut self) -> Result<(), CameraError> {
        if self.stream.is_some() {
            tracing::debug!("Releasing previous camera stream before restart");
            self.stop();
        }

        self.ready_state = ReadyState::Initializing;
        self.last_error = None;

        tracing::info!(
            ideal_width = self.constraints.ideal_width,
            ideal_height = self.constraints.ideal_height,
            facing_mode = ?self.constraints.facing_mode,
            "Requesting camera stream",
        );

        match self.device.open(&self.constraints).await {
            Ok(stream) => {
                let (width, height) = stream.frame_size();
                self.stream = Some(StreamHandle::new(stream));
                self.ready_state = ReadyState::Ready;
                tracing::info!(width, height, "Camera stream granted");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Unable to access camera");
                self.ready_state = ReadyState::Failed;
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Release the held stream. A no-op when nothing is held.
    pub fn stop(&mut self) {
        let Some(mut handle) = self.stream.take() else {
            return;
        };

        if handle.release() {
            tracing::info!("Camera stream stopped");
        }
        if self.ready_state == ReadyState::Ready {
            self.ready_state = ReadyState::Initializing;
        }
    }

    /// Stop, then start again. Used to recover from `Failed`.
    pub async fn retry(&mut self) -> Result<(), CameraError> {
        self.stop();
        self.start().await
    }

    /// Take a snapshot of the current frame.
    ///
    /// Returns `None` without raising anything when the session is not
    /// `Ready`; callers gate the capture control on readiness. Frame or
    /// encoding failures are logged and also yield `None`.
    pub fn capture(&self) -> Option<CapturedImage> {
        let Some(stream) = self.preview() else {
            tracing::debug!(state = ?self.ready_state, "Capture ignored, camera not ready");
            return None;
        };

        let frame = match stream.grab_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to grab camera frame");
                return None;
            }
        };

        match CapturedImage::from_frame(&frame, self.jpeg_quality) {
            Ok(image) => {
                tracing::info!(
                    width = image.width(),
                    height = image.height(),
                    "Captured photo",
                );
                Some(image)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode snapshot");
                None
            }
        }
    }
}

impl<D> std::fmt::Debug for CaptureSession<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureSession")
            .field("ready_state", &self.ready_state)
            .field("stream", &self.stream)
            .field("last_error", &self.last_error)
            .finish()
    }
}
