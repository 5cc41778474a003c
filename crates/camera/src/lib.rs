//! Camera capture for the try-on flow.
//!
//! A [`CaptureSession`] owns exclusive access to one camera stream,
//! exposes it for preview, and turns the current frame into a
//! [`CapturedImage`] on demand. Devices plug in through the
//! [`CameraDevice`] trait; [`StillImageDevice`] is a file-backed
//! implementation used by the command line tool and in tests.

pub mod device;
pub mod error;
pub mod handle;
pub mod session;
pub mod snapshot;
pub mod still;

pub use device::{CameraDevice, FacingMode, StreamConstraints, VideoStream};
pub use error::CameraError;
pub use handle::StreamHandle;
pub use session::{CaptureSession, ReadyState};
pub use snapshot::{CapturedImage, JPEG_QUALITY};
pub use still::StillImageDevice;
