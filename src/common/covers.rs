//! # Procedural Cover Images
//!
//! Synthesizes the cover images uploaded alongside a flag. Each image is
//! derived deterministically from its file name, so repeated placements
//! upload consistent content without the checker shipping photo files.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};

/// Cover image dimensions. Small keeps upload traffic light.
const COVER_WIDTH: u32 = 320;
const COVER_HEIGHT: u32 = 240;

/// Synthesize the cover image for `name`.
///
/// A vertical two-color gradient with per-pixel noise, seeded from the name,
/// so the same cover name always produces the same pixels.
pub fn cover_image(name: &str) -> RgbImage {
    let mut rng = rng_for(name);

    let top = [rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>()];
    let bottom = [rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>()];

    let mut img = RgbImage::new(COVER_WIDTH, COVER_HEIGHT);
    for y in 0..COVER_HEIGHT {
        let blend = y as f32 / COVER_HEIGHT as f32;
        for x in 0..COVER_WIDTH {
            let mut pixel = [0u8; 3];
            for channel in 0..3 {
                let base = top[channel] as f32 * (1.0 - blend) + bottom[channel] as f32 * blend;
                let noise = rng.gen_range(-8i16..=8i16);
                pixel[channel] = (base as i16 + noise).clamp(0, 255) as u8;
            }
            img.put_pixel(x, y, Rgb(pixel));
        }
    }

    img
}

fn rng_for(name: &str) -> StdRng {
    let digest = Sha256::digest(name.as_bytes());
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&digest);
    StdRng::from_seed(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_image() {
        let a = cover_image("2018-04-18_16-59-33_beach.jpg");
        let b = cover_image("2018-04-18_16-59-33_beach.jpg");
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn different_names_different_images() {
        let a = cover_image("2018-04-18_16-59-33_beach.jpg");
        let b = cover_image("2021-07-11_12-56-14_beach.jpg");
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn cover_has_expected_dimensions() {
        let img = cover_image("anything.jpg");
        assert_eq!(img.dimensions(), (COVER_WIDTH, COVER_HEIGHT));
    }
}
