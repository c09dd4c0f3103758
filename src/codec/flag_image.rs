//! # Flag Embedding and Pixel Fingerprinting
//!
//! Hides a flag in plain sight by drawing it onto a fixed canvas image in a
//! near-invisible color, then fingerprints the result with SHA-256 over the
//! decoded pixel data.
//!
//! ## Why hash pixels instead of file bytes?
//!
//! The gallery service is free to re-encode, rename, or re-serve the file
//! however it likes. Two byte streams can differ wildly while still decoding
//! to the same image. Hashing the flattened pixel grid (row-major, RGB order)
//! makes the fingerprint independent of the container format: any lossless
//! re-encode keeps the digest stable, while a single flipped pixel changes it.
//!
//! ## Determinism
//!
//! Canvas and font are compiled into the binary, the draw position, scale and
//! fill color are constants, and text rasterization has no random input. The
//! same flag therefore produces bit-identical pixels (and the same digest) on
//! every run and every machine, which is what allows a fingerprint recorded at
//! place time to be re-checked ticks later, possibly by another process.

use ab_glyph::{FontRef, PxScale};
use anyhow::{anyhow, Result};
use image::RgbImage;
use imageproc::drawing::draw_text_mut;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use thiserror::Error;

/// Base canvas every flag image is drawn on, compiled into the binary.
const CANVAS_BYTES: &[u8] = include_bytes!("../../assets/canvas.png");

/// Font used to render the flag text, compiled into the binary.
const FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Pixel offset of the flag text on the canvas.
const FLAG_POSITION: (i32, i32) = (70, 80);

/// Font size for the flag text. Small enough that typical flags fit the
/// canvas width; longer flags run off the edge and are simply clipped.
const FLAG_SCALE: f32 = 11.0;

/// Fill color for the flag text. RGB(1, 1, 1) is visually indistinguishable
/// from black backgrounds but still changes the pixel bytes.
const FLAG_FILL: image::Rgb<u8> = image::Rgb([1, 1, 1]);

/// Error returned when received bytes do not decode as a raster image.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was not parseable by any supported image decoder.
    #[error("payload is not a decodable image: {0}")]
    InvalidImage(#[from] image::ImageError),
}

/// A flag image together with the fingerprint of its pixel content.
///
/// Produced by [`embed_flag`]; the image is what gets uploaded to the
/// service, the fingerprint is what gets stored locally for later
/// verification.
#[derive(Debug, Clone)]
pub struct FlagArtifact {
    /// Canvas with the flag text drawn in.
    pub image: RgbImage,
    /// Lowercase hex SHA-256 over the image's flattened RGB bytes.
    pub fingerprint: String,
}

/// Draw `flag` onto the fixed canvas and fingerprint the result.
///
/// # Arguments
/// - `flag`: The secret to hide. Expected to be printable text; flags wider
///   than the canvas drawing area are clipped, not rejected.
///
/// # Returns
/// - `Ok(FlagArtifact)`: The flag image and its pixel fingerprint
/// - `Err`: Only if the compiled-in canvas or font fail to parse, which
///   indicates a broken build rather than a runtime condition
///
/// # Example
/// ```ignore
/// let artifact = embed_flag("FLAG{abc123}")?;
/// let png = png_bytes(&artifact.image)?;
/// upload(png).await?;
/// store(artifact.fingerprint);
/// ```
pub fn embed_flag(flag: &str) -> Result<FlagArtifact> {
    let mut image = image::load_from_memory(CANVAS_BYTES)?.to_rgb8();
    let font = FontRef::try_from_slice(FONT_BYTES)
        .map_err(|e| anyhow!("embedded font failed to parse: {}", e))?;

    draw_text_mut(
        &mut image,
        FLAG_FILL,
        FLAG_POSITION.0,
        FLAG_POSITION.1,
        PxScale::from(FLAG_SCALE),
        &font,
        flag,
    );

    let fingerprint = fingerprint_pixels(&image);
    Ok(FlagArtifact { image, fingerprint })
}

/// Decode raw image bytes and fingerprint their pixel content.
///
/// Accepts any container format the `image` crate can decode (the service
/// stores PNGs, but the checker does not rely on that). The digest is taken
/// over the canonical flattened RGB pixel sequence, so losslessly re-encoded
/// copies of the same image fingerprint identically.
///
/// # Errors
/// Returns [`DecodeError`] when the bytes are not a supported raster image,
/// e.g. when the service answers with an HTML error page instead of a file.
pub fn fingerprint_bytes(bytes: &[u8]) -> Result<String, DecodeError> {
    let image = image::load_from_memory(bytes)?;
    Ok(fingerprint_pixels(&image.to_rgb8()))
}

/// Serialize an image to PNG bytes for upload.
pub fn png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

/// SHA-256 over the flattened row-major RGB byte sequence, as lowercase hex.
fn fingerprint_pixels(image: &RgbImage) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.as_raw());
    hex::encode(hasher.finalize())
}
