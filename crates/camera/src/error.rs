//! Error types for camera access and snapshot encoding.

/// Message shown to the user whenever the camera cannot be opened.
pub const CAMERA_ACCESS_MESSAGE: &str = "Unable to access camera. Please check permissions.";

/// Errors raised while acquiring a stream or producing a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CameraError {
    /// The user (or platform policy) refused access to the camera.
    #[error("Camera permission denied")]
    PermissionDenied,

    /// No usable camera, or the device failed while opening.
    #[error("Camera unavailable: {0}")]
    DeviceUnavailable(String),

    /// The stream could not deliver a frame.
    #[error("Frame unavailable: {0}")]
    FrameUnavailable(String),

    /// The frame could not be encoded as JPEG.
    #[error("Snapshot encoding failed: {0}")]
    Encode(String),
}

impl CameraError {
    /// Human-readable text for the UI.
    ///
    /// Acquisition failures collapse into one message with a retry hint;
    /// snapshot failures keep their detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied | Self::DeviceUnavailable(_) => {
                CAMERA_ACCESS_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}
