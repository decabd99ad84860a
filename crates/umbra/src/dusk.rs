//! The darkening pipeline.
//!
//! This module turns an arbitrary input color into a perceptually consistent,
//! darkened variant that stays inside the displayable sRGB gamut. It works in
//! Oklch throughout:
//!
//!  1. Parse the input into a [`Color`] and convert it to Oklch.
//!  2. Express the color's chroma as a fraction of the maximum chroma
//!     available at its own lightness and hue ([`relative_chroma`]), so the
//!     *proportion* of saturation survives the lightness change.
//!  3. Apply the hue-dependent saturation floor
//!     ([`floor_relative_chroma`]): colors in the yellow-through-cyan band
//!     should never look washed out, and achromatic colors must never regain
//!     saturation.
//!  4. Remap lightness with [`darken_lightness`].
//!  5. Re-derive a boundary-respecting chroma at the new lightness—scaled by
//!     the preserved proportion in [`ChromaMode::Relative`], merely clipped in
//!     [`ChromaMode::Absolute`]—and cap it at an artistic ceiling of 0.2.
//!  6. Serialize the result in the requested [`OutputFormat`].
//!
//! The pipeline is a total function: any failure degrades to the sentinel
//! string [`INVALID_COLOR`] instead of escaping to the caller. It also is
//! pure and reentrant: all inputs are explicit parameters, every invocation
//! computes fresh values, and repeated invocations with identical arguments
//! yield identical output. Callers may therefore recompute, memoize, or
//! debounce as they see fit. Diagnostics go through [`tracing`] and never
//! affect control flow or return values.

use std::str::FromStr;

use tracing::{debug, trace};

use crate::core::{
    format_hex, format_oklch_fixed, format_rgb_function, is_achromatic_chroma_hue, max_chroma,
    normalize, ColorSpace,
};
use crate::error::{ColorFormatError, UnsupportedFormatError};
use crate::{Color, Float};

/// The sentinel returned for any input the pipeline cannot process.
pub const INVALID_COLOR: &str = "Invalid color";

/// The chroma threshold below which a color counts as achromatic.
const ACHROMATIC_THRESHOLD: Float = 0.001;

/// The hard ceiling on output chroma. This is an artistic choice independent
/// of the gamut: darkened variants should read as muted, never neon.
const CHROMA_CEILING: Float = 0.2;

/// The hue band subject to the saturation floor, exclusive at the start and
/// inclusive at the end, covering roughly yellow through cyan.
const FLOOR_BAND_START: Float = 30.0;
const FLOOR_BAND_END: Float = 210.0;

/// The minimum relative chroma enforced inside the floor band.
const RELATIVE_CHROMA_FLOOR: Float = 0.8;

// --------------------------------------------------------------------------------------------------------------------

/// The enumeration of output formats for the darkened color.
///
/// The variants dispatch exhaustively, so adding a format is a compile-time
/// checked extension point rather than a runtime string comparison.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Hashed hexadecimal notation, e.g. `#1a2b3c`.
    Hex,
    /// Function notation with 0–255 channels, e.g. `rgb(26, 43, 60)`.
    Rgb,
    /// Oklch function notation with fixed precision, e.g.
    /// `oklch(0.50 0.123 167.00)`.
    Oklch,
}

impl FromStr for OutputFormat {
    type Err = UnsupportedFormatError;

    /// Parse an output format from its selector name, i.e., `hex`, `rgb`, or
    /// `oklch`, ignoring case and surrounding white space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "rgb" => Ok(Self::Rgb),
            "oklch" => Ok(Self::Oklch),
            _ => Err(UnsupportedFormatError::new(s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Hex => "hex",
            Self::Rgb => "rgb",
            Self::Oklch => "oklch",
        })
    }
}

/// The enumeration of chroma recomputation strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChromaMode {
    /// Preserve the saturation proportion across the lightness change by
    /// scaling towards the gamut boundary at the new lightness.
    Relative,
    /// Merely clip the original chroma to the gamut boundary at the new
    /// lightness.
    Absolute,
}

impl From<bool> for ChromaMode {
    /// Convert the "use relative chroma" flag into a chroma mode.
    fn from(use_relative_chroma: bool) -> Self {
        if use_relative_chroma {
            Self::Relative
        } else {
            Self::Absolute
        }
    }
}

// --------------------------------------------------------------------------------------------------------------------

/// Express the given chroma as a fraction of the maximum chroma available at
/// the given lightness and hue.
///
/// The result saturates at 1.0: a chroma at or beyond the computed gamut
/// boundary—whether due to search tolerance or a genuinely out-of-gamut
/// input—counts as fully saturated. If the boundary search finds no
/// admissible chroma at all, the result also is 1.0, so this function never
/// divides by zero.
pub fn relative_chroma(lightness: Float, chroma: Float, hue: Float) -> Float {
    let max = max_chroma(lightness, hue);
    if max <= 0.0 || max < chroma {
        1.0
    } else {
        chroma / max
    }
}

/// Apply the hue-dependent saturation floor to a relative chroma.
///
/// An achromatic color must never regain saturation, so it floors to zero no
/// matter its hue. Otherwise the hue is normalized into `0..360` and, if it
/// falls into the yellow-through-cyan band `30 < hº <= 210`, the relative
/// chroma is raised to at least 0.8. All other hues pass through unchanged.
pub fn floor_relative_chroma(relative: Float, hue: Float, is_achromatic: bool) -> Float {
    if is_achromatic {
        return 0.0;
    }

    let hue = hue.rem_euclid(360.0);
    if FLOOR_BAND_START < hue && hue <= FLOOR_BAND_END {
        relative.max(RELATIVE_CHROMA_FLOOR)
    } else {
        relative
    }
}

/// Remap the given lightness to its darkened counterpart.
///
/// The mapping `min(2L - 1.3, 0.5)` pushes bright inputs down sharply while
/// capping the darkest achievable output lightness at 0.5, so the transform
/// always yields a clearly darker, but not near-black, variant. For L < 0.65
/// the raw value is negative; this function deliberately does not clamp it,
/// leaving that to coordinate normalization at the serialization boundary.
pub fn darken_lightness(lightness: Float) -> Float {
    lightness.mul_add(2.0, -1.3).min(0.5)
}

// --------------------------------------------------------------------------------------------------------------------

/// Compute the darkened variant of the given color.
///
/// This function is total: if the input does not parse as a color, it returns
/// the sentinel [`INVALID_COLOR`] instead of an error.
///
/// ```
/// # use umbra::{transform, ChromaMode, OutputFormat};
/// let dark = transform("#ffffff", OutputFormat::Hex, ChromaMode::Relative);
/// assert_eq!(dark, "#636363");
/// assert_eq!(
///     transform("not-a-color", OutputFormat::Hex, ChromaMode::Relative),
///     "Invalid color"
/// );
/// ```
pub fn transform(input: &str, format: OutputFormat, mode: ChromaMode) -> String {
    match darken(input, format, mode) {
        Ok(output) => output,
        Err(error) => {
            debug!(input, %error, "degrading unparseable color to sentinel");
            INVALID_COLOR.to_string()
        }
    }
}

/// Compute the darkened variant of the given color, with the output format
/// given by its selector name.
///
/// This function behaves like [`transform`] but also folds an unrecognized
/// format name into the sentinel [`INVALID_COLOR`], so callers forwarding
/// untrusted selector strings need no error handling of their own.
pub fn transform_str(input: &str, format: &str, mode: ChromaMode) -> String {
    match OutputFormat::from_str(format) {
        Ok(format) => transform(input, format, mode),
        Err(error) => {
            debug!(format, %error, "degrading unsupported output format to sentinel");
            INVALID_COLOR.to_string()
        }
    }
}

/// The fallible body of the pipeline.
fn darken(input: &str, format: OutputFormat, mode: ChromaMode) -> Result<String, ColorFormatError> {
    let color = Color::from_str(input)?.to(ColorSpace::Oklch);
    let [lightness, chroma, hue] = *color.as_ref();

    let is_achromatic = is_achromatic_chroma_hue(chroma, hue, ACHROMATIC_THRESHOLD);

    let base = relative_chroma(lightness, chroma, hue);
    let relative = floor_relative_chroma(base, hue, is_achromatic);
    trace!(
        base_relative_chroma = base,
        relative_chroma = relative,
        is_achromatic,
        "computed relative chroma"
    );

    let new_lightness = darken_lightness(lightness);

    let new_chroma = if is_achromatic {
        0.0
    } else {
        match mode {
            // Scale towards the boundary at the new lightness, but never drop
            // below the original chroma. When the original chroma already
            // exceeds the new boundary, it carries forward unchanged; the
            // ceiling below and gamut clipping at serialization bound it.
            ChromaMode::Relative => (max_chroma(new_lightness, hue) * relative).max(chroma),
            ChromaMode::Absolute => chroma.min(max_chroma(new_lightness, hue)),
        }
    };
    let new_chroma = new_chroma.min(CHROMA_CEILING);

    let darkened = Color::oklch(new_lightness, new_chroma, hue);
    trace!(%darkened, "darkened color");

    Ok(match format {
        OutputFormat::Hex => format_hex(&darkened.to_24bit()),
        OutputFormat::Rgb => format_rgb_function(&darkened.to_24bit()),
        OutputFormat::Oklch => {
            format_oklch_fixed(&normalize(ColorSpace::Oklch, darkened.as_ref()))
        }
    })
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{
        darken_lightness, floor_relative_chroma, relative_chroma, transform, transform_str,
        ChromaMode, OutputFormat, INVALID_COLOR,
    };
    use crate::core::max_chroma;
    use crate::{assert_close_enough, Color, ColorSpace};
    use std::str::FromStr;

    #[test]
    fn test_relative_chroma() {
        // A chroma beyond the boundary saturates at 1.0.
        assert_close_enough!(relative_chroma(0.5, 0.39, 240.0), 1.0);
        // Zero chroma has zero relative chroma.
        assert_close_enough!(relative_chroma(0.5, 0.0, 240.0), 0.0);
        // No admissible chroma at pure black, yet no division fault either.
        assert_close_enough!(relative_chroma(0.0, 0.1, 240.0), 1.0);

        // Otherwise the fraction of the boundary chroma, within unit range.
        let r = relative_chroma(0.6, 0.05, 120.0);
        assert!((0.0..=1.0).contains(&r), "relative chroma {r} out of range");
    }

    #[test]
    fn test_floor_relative_chroma() {
        // Achromatic colors floor to zero, whatever the hue.
        assert_close_enough!(floor_relative_chroma(0.9, 120.0, true), 0.0);
        assert_close_enough!(floor_relative_chroma(0.9, 300.0, true), 0.0);

        // Inside the band, low relative chroma rises to 0.8.
        assert_close_enough!(floor_relative_chroma(0.2, 120.0, false), 0.8);
        assert_close_enough!(floor_relative_chroma(0.9, 120.0, false), 0.9);

        // The band excludes 30 but includes 210.
        assert_close_enough!(floor_relative_chroma(0.2, 30.0, false), 0.2);
        assert_close_enough!(floor_relative_chroma(0.2, 30.01, false), 0.8);
        assert_close_enough!(floor_relative_chroma(0.2, 210.0, false), 0.8);
        assert_close_enough!(floor_relative_chroma(0.2, 210.01, false), 0.2);

        // Hues normalize into 0..360 first.
        assert_close_enough!(floor_relative_chroma(0.2, 480.0, false), 0.8);
        assert_close_enough!(floor_relative_chroma(0.2, -240.0, false), 0.8);
    }

    #[test]
    fn test_darken_lightness() {
        // The cap kicks in for bright inputs.
        assert_close_enough!(darken_lightness(1.0), 0.5);
        assert_close_enough!(darken_lightness(0.9), 0.5);
        // Below the cap, the mapping is steeply linear.
        assert_close_enough!(darken_lightness(0.8), 0.3);
        assert_close_enough!(darken_lightness(0.65), 0.0);
        // The raw mapping goes negative and is not clamped here.
        assert_close_enough!(darken_lightness(0.5), -0.3);
    }

    #[test]
    fn test_determinism() {
        for mode in [ChromaMode::Relative, ChromaMode::Absolute] {
            let once = transform("#ffe4df", OutputFormat::Oklch, mode);
            let twice = transform("#ffe4df", OutputFormat::Oklch, mode);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_failure_sentinel() {
        assert_eq!(
            transform("not-a-color", OutputFormat::Hex, ChromaMode::Relative),
            INVALID_COLOR
        );
        assert_eq!(
            transform("", OutputFormat::Rgb, ChromaMode::Absolute),
            INVALID_COLOR
        );
        assert_eq!(
            transform_str("#ffffff", "cmyk", ChromaMode::Relative),
            INVALID_COLOR
        );
        assert_eq!(
            transform_str("#ffffff", "hex", ChromaMode::Relative),
            transform("#ffffff", OutputFormat::Hex, ChromaMode::Relative)
        );
    }

    #[test]
    fn test_format_dispatch() {
        // Mid gray darkens to black: its lightness of about 0.6 maps below
        // zero, which clamps at the serialization boundary.
        assert_eq!(
            transform("#808080", OutputFormat::Hex, ChromaMode::Relative),
            "#000000"
        );
        assert_eq!(
            transform("#808080", OutputFormat::Rgb, ChromaMode::Absolute),
            "rgb(0, 0, 0)"
        );
        assert_eq!(
            transform("#808080", OutputFormat::Oklch, ChromaMode::Relative),
            "oklch(0.00 0.000 0.00)"
        );
    }

    #[test]
    fn test_achromatic_invariance() {
        // Achromatic inputs keep zero chroma in every mode.
        for input in ["#ffffff", "#aaaaaa", "rgb(200, 200, 200)"] {
            for mode in [ChromaMode::Relative, ChromaMode::Absolute] {
                let output = transform(input, OutputFormat::Oklch, mode);
                assert!(
                    output.contains(" 0.000 "),
                    "achromatic input {input} produced chromatic output {output}"
                );
            }
        }

        // White in particular lands on the 0.5-lightness gray.
        assert_eq!(
            transform("#ffffff", OutputFormat::Hex, ChromaMode::Relative),
            "#636363"
        );
        assert_eq!(
            transform("#aaaaaa", OutputFormat::Oklch, ChromaMode::Absolute),
            "oklch(0.18 0.000 0.00)"
        );
    }

    #[test]
    fn test_lightness_cap_and_chroma_ceiling() {
        // L' = 2*0.9 - 1.3 caps the lightness at exactly 0.5. The input
        // chroma of 0.3 exceeds the boundary at the new lightness, carries
        // forward unchanged, and then hits the 0.2 ceiling.
        assert_eq!(
            transform("oklch(0.9 0.3 30)", OutputFormat::Oklch, ChromaMode::Relative),
            "oklch(0.50 0.200 30.00)"
        );

        // The cap and ceiling hold across inputs and modes.
        for input in ["#ffe4df", "#3178ea", "#ffca00", "oklch(0.97 0.35 150)"] {
            for mode in [ChromaMode::Relative, ChromaMode::Absolute] {
                let output = transform(input, OutputFormat::Oklch, mode);
                let color = Color::from_str(&output).expect("output reparses");
                let [l, c, _] = *color.as_ref();
                assert!(l <= 0.5, "output lightness {l} above cap for {input}");
                assert!(c <= 0.2, "output chroma {c} above ceiling for {input}");
            }
        }
    }

    #[test]
    fn test_chroma_modes() {
        // Saturated blue: the original chroma exceeds the boundary at the
        // darkened (and clamped) lightness, so relative mode carries it
        // forward unchanged rather than losing saturation.
        assert_eq!(
            transform("#3178ea", OutputFormat::Oklch, ChromaMode::Relative),
            "oklch(0.00 0.187 259.67)"
        );

        // Absolute mode only ever clips; it never boosts chroma.
        let input = "oklch(0.9 0.1 210)";
        let absolute = transform(input, OutputFormat::Oklch, ChromaMode::Absolute);
        let color = Color::from_str(&absolute).expect("output reparses");
        let [_, c_abs, _] = *color.as_ref();
        assert!(c_abs <= 0.1, "absolute mode boosted chroma to {c_abs}");

        // Relative mode preserves the saturation proportion, which here means
        // at least as much chroma as absolute mode.
        let relative = transform(input, OutputFormat::Oklch, ChromaMode::Relative);
        let color = Color::from_str(&relative).expect("output reparses");
        let [_, c_rel, _] = *color.as_ref();
        assert!(
            c_abs <= c_rel,
            "relative chroma {c_rel} below absolute {c_abs}"
        );
    }

    #[test]
    fn test_hue_floor_feeds_pipeline() {
        // A barely saturated green: its relative chroma floors to 0.8, so the
        // darkened variant is far more chromatic than the input.
        let output = transform("oklch(0.9 0.02 120)", OutputFormat::Oklch, ChromaMode::Relative);
        let color = Color::from_str(&output).expect("output reparses");
        let [l, c, h] = *color.as_ref();
        assert_close_enough!(l, 0.5);
        assert_close_enough!(h, 120.0);
        assert!(
            (0.04..=0.2).contains(&c),
            "floored chroma {c} out of expected range"
        );
    }

    #[test]
    fn test_oklch_round_trip() {
        // Reparsing the fixed-precision output reproduces its coordinates
        // exactly, so a second serialization is bit-stable.
        for input in ["#ffe4df", "#3178ea", "rgb(255, 202, 0)", "oklch(0.8 0.12 45)"] {
            let output = transform(input, OutputFormat::Oklch, ChromaMode::Relative);
            let color = Color::from_str(&output).expect("output reparses");
            let again = crate::core::format_oklch_fixed(&crate::core::normalize(
                ColorSpace::Oklch,
                color.as_ref(),
            ));
            assert_eq!(again, output);
        }
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(ChromaMode::from(true), ChromaMode::Relative);
        assert_eq!(ChromaMode::from(false), ChromaMode::Absolute);
    }

    #[test]
    fn test_format_selector() {
        assert_eq!(OutputFormat::from_str("hex"), Ok(OutputFormat::Hex));
        assert_eq!(OutputFormat::from_str(" RGB "), Ok(OutputFormat::Rgb));
        assert_eq!(OutputFormat::from_str("oklch"), Ok(OutputFormat::Oklch));
        assert!(OutputFormat::from_str("cmyk").is_err());
        assert_eq!(OutputFormat::Oklch.to_string(), "oklch");
    }

    #[test]
    fn test_no_floor_outside_band() {
        // A barely saturated violet outside the floor band keeps its low
        // relative chroma: the output's fraction of the boundary chroma
        // matches the input's, up to the fixed output precision.
        let output = transform("oklch(0.9 0.02 300)", OutputFormat::Oklch, ChromaMode::Relative);
        let color = Color::from_str(&output).expect("output reparses");
        let [_, c, _] = *color.as_ref();

        let before = relative_chroma(0.9, 0.02, 300.0);
        let after = c / max_chroma(0.5, 300.0);
        assert!(
            (after - before).abs() < 0.01,
            "relative chroma drifted from {before} to {after}"
        );
    }
}
