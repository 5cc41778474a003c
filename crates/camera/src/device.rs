//! Device abstraction.
//!
//! A [`CameraDevice`] grants [`VideoStream`]s. The session layer never
//! talks to hardware directly, so platform backends (and test fakes)
//! only need to implement these two traits.

use std::future::Future;

use image::RgbaImage;

use crate::error::CameraError;

/// Which physical camera to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    /// Front camera, facing the user (selfie).
    User,
    /// Rear camera.
    Environment,
}

/// Requested stream parameters.
///
/// Width and height are *ideal* values: a device may grant a different
/// resolution, so consumers must read the actual size from the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing_mode: FacingMode,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 640,
            ideal_height: 480,
            facing_mode: FacingMode::User,
        }
    }
}

/// A live video stream granted by a device.
pub trait VideoStream: Send {
    /// Native dimensions of the frame currently being delivered.
    fn frame_size(&self) -> (u32, u32);

    /// Sample the current frame.
    fn grab_frame(&self) -> Result<RgbaImage, CameraError>;

    /// Stop every track of the stream. Called exactly once by the owner.
    fn stop_tracks(&mut self);
}

/// A source of camera streams.
pub trait CameraDevice: Send + Sync {
    /// Ask the device for a stream matching `constraints`.
    ///
    /// This is the only suspend point of a capture session: it resolves
    /// once the platform grants or refuses access.
    fn open(
        &self,
        constraints: &StreamConstraints,
    ) -> impl Future<Output = Result<Box<dyn VideoStream>, CameraError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constraints_ask_for_front_vga() {
        let c = StreamConstraints::default();
        assert_eq!((c.ideal_width, c.ideal_height), (640, 480));
        assert_eq!(c.facing_mode, FacingMode::User);
    }
}
