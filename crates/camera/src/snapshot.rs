//! Still-image snapshots taken from a live stream.

use std::io::Cursor;

use atelier_core::types::Timestamp;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};

use crate::error::CameraError;

/// JPEG quality used for every snapshot (0-100).
pub const JPEG_QUALITY: u8 = 80;

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// A single encoded frame.
///
/// `encoded_data` is a `data:image/jpeg;base64,...` URI, ready to be sent
/// as the model image of a try-on job. Dimensions are those of the frame
/// at the moment it was sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    encoded_data: String,
    width: u32,
    height: u32,
    captured_at: Timestamp,
}

impl CapturedImage {
    /// Encode `frame` as JPEG at the given quality.
    pub fn from_frame(frame: &RgbaImage, quality: u8) -> Result<Self, CameraError> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Err(CameraError::Encode(format!(
                "frame has no pixels ({width}x{height})"
            )));
        }

        let rgb: RgbImage = frame.convert();
        let jpeg = encode_jpeg(&rgb, quality)?;

        Ok(Self {
            encoded_data: format!("{DATA_URI_PREFIX}{}", BASE64.encode(&jpeg)),
            width,
            height,
            captured_at: chrono::Utc::now(),
        })
    }

    /// The `data:` URI holding the base64 JPEG.
    pub fn encoded_data(&self) -> &str {
        &self.encoded_data
    }

    pub fn into_encoded_data(self) -> String {
        self.encoded_data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn captured_at(&self) -> Timestamp {
        self.captured_at
    }

    /// Decode the raw JPEG bytes back out of the data URI.
    pub fn jpeg_bytes(&self) -> Result<Vec<u8>, CameraError> {
        let payload = self
            .encoded_data
            .strip_prefix(DATA_URI_PREFIX)
            .ok_or_else(|| CameraError::Encode("missing data URI prefix".into()))?;
        BASE64
            .decode(payload)
            .map_err(|e| CameraError::Encode(format!("invalid base64 payload: {e}")))
    }
}

fn encode_jpeg(frame: &RgbImage, quality: u8) -> Result<Vec<u8>, CameraError> {
    let mut buffer = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buffer), quality);

    encoder
        .encode(
            frame.as_raw(),
            frame.width(),
            frame.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| CameraError::Encode(format!("JPEG encoding failed: {e}")))?;

    Ok(buffer)
}
