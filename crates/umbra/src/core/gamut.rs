use crate::core::{convert, ColorSpace};
use crate::Float;

/// Determine whether the coordinates are in gamut for their color space.
pub(crate) fn in_gamut(space: ColorSpace, coordinates: &[Float; 3]) -> bool {
    if space.is_rgb() {
        coordinates.iter().all(|c| 0.0 <= *c && *c <= 1.0)
    } else {
        true
    }
}

/// Clip the coordinates to the gamut of their color space.
pub(crate) fn clip(space: ColorSpace, coordinates: &[Float; 3]) -> [Float; 3] {
    if space.is_rgb() {
        let [r, g, b] = coordinates;
        [r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0)]
    } else {
        *coordinates
    }
}

/// The upper bound of the chroma search interval. 0.4 comfortably exceeds the
/// largest chroma of any in-gamut sRGB color, which is about 0.32.
const CHROMA_BOUND: Float = 0.4;

/// The termination threshold of the chroma search.
const CHROMA_EPSILON: Float = 0.001;

/// Find the maximum chroma that keeps an Oklch color in the sRGB gamut.
///
/// Not every combination of lightness and hue admits the full theoretical
/// chroma range; most admit far less. This function performs a binary search
/// over chroma `0..=0.4`, converting each midpoint to sRGB and testing gamut
/// membership, until the search interval has shrunk to 0.001. It returns the
/// lower end of the interval, i.e., the conservative, safely in-gamut
/// estimate.
///
/// The search terminates after ⌈log2(0.4/0.001)⌉ = 9 iterations for any
/// input. Extreme lightness needs no special treatment: near 0 or 1 the
/// gamut test fails for all but negligible chroma and the search collapses
/// towards zero on its own.
pub(crate) fn max_chroma(lightness: Float, hue: Float) -> Float {
    let mut min: Float = 0.0;
    let mut max = CHROMA_BOUND;

    while CHROMA_EPSILON < max - min {
        let chroma = (min + max) / 2.0;
        let srgb = convert(ColorSpace::Oklch, ColorSpace::Srgb, &[lightness, chroma, hue]);

        if in_gamut(ColorSpace::Srgb, &srgb) {
            min = chroma;
        } else {
            max = chroma;
        }
    }

    min
}

// ====================================================================================================================
