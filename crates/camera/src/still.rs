//! File-backed camera device.
//!
//! Serves a single decoded image as if it were a live stream. Used by the
//! command line tool, where no real camera is available, and by tests.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageError, RgbaImage};

use crate::device::{CameraDevice, StreamConstraints, VideoStream};
use crate::error::CameraError;

/// A [`CameraDevice`] that "films" one image file.
#[derive(Debug, Clone)]
pub struct StillImageDevice {
    path: PathBuf,
}

impl StillImageDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CameraDevice for StillImageDevice {
    async fn open(
        &self,
        constraints: &StreamConstraints,
    ) -> Result<Box<dyn VideoStream>, CameraError> {
        let path = self.path.clone();
        let (max_width, max_height) = (constraints.ideal_width, constraints.ideal_height);

        let frame = tokio::task::spawn_blocking(move || load_frame(&path, max_width, max_height))
            .await
            .map_err(|e| CameraError::DeviceUnavailable(format!("Image load task error: {e}")))??;

        tracing::debug!(
            path = %self.path.display(),
            width = frame.width(),
            height = frame.height(),
            "Still image device opened",
        );

        Ok(Box::new(StillImageStream {
            frame: Some(frame),
        }))
    }
}

/// Decode the file and shrink it to fit the ideal resolution.
///
/// Images already within bounds keep their native size, mirroring a
/// device that grants the closest mode it supports.
fn load_frame(path: &Path, max_width: u32, max_height: u32) -> Result<RgbaImage, CameraError> {
    let image = image::open(path).map_err(|e| match e {
        ImageError::IoError(io) if io.kind() == ErrorKind::PermissionDenied => {
            CameraError::PermissionDenied
        }
        other => CameraError::DeviceUnavailable(format!("{}: {other}", path.display())),
    })?;

    let image = if image.width() > max_width || image.height() > max_height {
        image.resize(max_width, max_height, FilterType::Triangle)
    } else {
        image
    };

    Ok(DynamicImage::into_rgba8(image))
}

struct StillImageStream {
    /// `None` once the tracks are stopped.
    frame: Option<RgbaImage>,
}

impl VideoStream for StillImageStream {
    fn frame_size(&self) -> (u32, u32) {
        self.frame.as_ref().map_or((0, 0), RgbaImage::dimensions)
    }

    fn grab_frame(&self) -> Result<RgbaImage, CameraError> {
        self.frame
            .clone()
            .ok_or_else(|| CameraError::FrameUnavailable("stream stopped".into()))
    }

    fn stop_tracks(&mut self) {
        self.frame = None;
    }
}
