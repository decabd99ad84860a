use std::str::FromStr;

use crate::core::{
    clip, convert, format, from_24bit, in_gamut, is_achromatic, normalize, parse, to_24bit,
    to_eq_coordinates, ColorSpace,
};
use crate::Float;

/// A high-resolution color object.
///
/// Every color object has a [color space](ColorSpace) and three coordinates.
/// Color objects are immutable: every operation returns a fresh object and
/// leaves the original untouched.
///
/// # Color Coordinates
///
/// For RGB color spaces, the coordinates of in-gamut colors have unit range.
/// For the other color spaces, there are no gamut bounds. The coordinates of
/// colors in Oklab/Oklch still need to meet the following constraints to be
/// well-formed: lightness must be `0.0..=1.0` and chroma must be `0.0..`.
///
/// A coordinate may be not-a-number, notably the hue in Oklch when chroma is
/// zero, i.e., a [powerless
/// component](https://www.w3.org/TR/css-color-4/#powerless). Since
/// not-a-numbers can easily render any computation on colors useless,
/// operations on color objects normalize coordinates first: not-a-numbers
/// become zero, lightness is clamped to `0..=1`, and chroma to `0..`.
///
/// # Equality Testing and Hashing
///
/// Equality testing and hashing compare bit strings derived from normalized,
/// precision-reduced coordinates, so that equal colors also have equal hashes
/// despite floating point noise.
#[derive(Clone)]
pub struct Color {
    space: ColorSpace,
    coordinates: [Float; 3],
}

impl Color {
    /// Instantiate a new color with the given color space and coordinates.
    ///
    /// ```
    /// # use umbra::{Color, ColorSpace};
    /// let pink = Color::new(ColorSpace::Oklch, [0.7, 0.22, 3.0]);
    /// assert_eq!(pink.as_ref(), &[0.7_f64, 0.22_f64, 3.0_f64]);
    /// ```
    #[inline]
    pub const fn new(space: ColorSpace, coordinates: [Float; 3]) -> Self {
        Self { space, coordinates }
    }

    /// Instantiate a new sRGB color with the given red, green, and blue
    /// coordinates.
    ///
    /// ```
    /// # use umbra::{Color, ColorSpace};
    /// let fire_brick = Color::srgb(177.0 / 255.0, 31.0 / 255.0, 36.0 / 255.0);
    /// assert_eq!(fire_brick.space(), ColorSpace::Srgb);
    /// ```
    #[inline]
    pub const fn srgb(r: Float, g: Float, b: Float) -> Self {
        Self::new(ColorSpace::Srgb, [r, g, b])
    }

    /// Instantiate a new Oklch color with the given lightness L, chroma C,
    /// and hue hº coordinates.
    ///
    /// ```
    /// # use umbra::{Color, ColorSpace};
    /// let teal = Color::oklch(0.65, 0.12, 195.0);
    /// assert_eq!(teal.space(), ColorSpace::Oklch);
    /// ```
    #[inline]
    pub const fn oklch(l: Float, c: Float, h: Float) -> Self {
        Self::new(ColorSpace::Oklch, [l, c, h])
    }

    /// Instantiate a new sRGB color from its 24-bit representation.
    ///
    /// ```
    /// # use umbra::{Color, ColorSpace};
    /// let tangerine = Color::from_24bit(0xff, 0x93, 0x00);
    /// assert_eq!(tangerine.to_string(), "color(srgb 1 0.57647 0)");
    /// ```
    pub fn from_24bit(r: u8, g: u8, b: u8) -> Self {
        Self::new(ColorSpace::Srgb, from_24bit(r, g, b))
    }

    /// Access this color's color space.
    #[inline]
    pub const fn space(&self) -> ColorSpace {
        self.space
    }

    /// Convert this color to the given color space.
    ///
    /// The conversion normalizes coordinates, so the result is well-formed
    /// even if this color is not.
    ///
    /// ```
    /// # use umbra::{Color, ColorSpace};
    /// let oklch = Color::from_24bit(0x31, 0x78, 0xea).to(ColorSpace::Oklch);
    /// assert_eq!(oklch.space(), ColorSpace::Oklch);
    /// ```
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn to(&self, space: ColorSpace) -> Self {
        Self::new(space, convert(self.space, space, &self.coordinates))
    }

    /// Determine whether this color is achromatic, i.e., a gray tone.
    ///
    /// This method converts this color to Oklch, if necessary, and then
    /// compares its chroma against the given threshold.
    ///
    /// ```
    /// # use umbra::Color;
    /// assert!(Color::from_24bit(0x80, 0x80, 0x80).is_achromatic(0.001));
    /// assert!(!Color::from_24bit(0xff, 0xca, 0x00).is_achromatic(0.001));
    /// ```
    pub fn is_achromatic(&self, threshold: Float) -> bool {
        is_achromatic(self.space, &self.coordinates, threshold)
    }

    /// Determine whether this color is in gamut for its color space.
    ///
    /// Only RGB color spaces are bounded; for all others this method returns
    /// `true`.
    pub fn in_gamut(&self) -> bool {
        in_gamut(self.space, &normalize(self.space, &self.coordinates))
    }

    /// Clip this color to the gamut of its color space.
    #[must_use = "method returns a new color and does not mutate original value"]
    pub fn clip(&self) -> Self {
        Self::new(
            self.space,
            clip(self.space, &normalize(self.space, &self.coordinates)),
        )
    }

    /// Convert this color to its 24-bit sRGB representation.
    ///
    /// This method converts this color to sRGB, if necessary, and clips the
    /// result to the sRGB gamut before rounding, so every color has a 24-bit
    /// representation, however distorted it may be.
    ///
    /// ```
    /// # use umbra::Color;
    /// assert_eq!(Color::srgb(1.0, 0.5, 0.0).to_24bit(), [255, 128, 0]);
    /// ```
    pub fn to_24bit(&self) -> [u8; 3] {
        let srgb = self.to(ColorSpace::Srgb);
        to_24bit(srgb.space, &srgb.coordinates)
    }
}

// --------------------------------------------------------------------------------------------------------------------

impl AsRef<[Float; 3]> for Color {
    fn as_ref(&self) -> &[Float; 3] {
        &self.coordinates
    }
}

impl FromStr for Color {
    type Err = crate::error::ColorFormatError;

    /// Parse a color from its string representation.
    ///
    /// ```
    /// # use umbra::{Color, ColorSpace};
    /// # use std::str::FromStr;
    /// let color = Color::from_str("#ffca00")?;
    /// assert_eq!(color.space(), ColorSpace::Srgb);
    /// # Ok::<(), umbra::error::ColorFormatError>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s).map(|(space, coordinates)| Self::new(space, coordinates))
    }
}

impl std::fmt::Display for Color {
    /// Format this color in CSS-ish notation, respecting the formatter's
    /// precision.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format(self.space, &self.coordinates, f)
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Color({:?}, {:?})",
            self.space, self.coordinates
        ))
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.space == other.space
            && to_eq_coordinates(self.space, &self.coordinates)
                == to_eq_coordinates(other.space, &other.coordinates)
    }
}

impl Eq for Color {}

impl std::hash::Hash for Color {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.space.hash(state);
        to_eq_coordinates(self.space, &self.coordinates).hash(state);
    }
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{Color, ColorSpace};
    use crate::assert_close_enough;
    use std::str::FromStr;

    #[test]
    fn test_parse_display_round_trip() {
        for text in ["#ffca00", "#3178ea", "rgb(128, 128, 128)", "oklch(0.5 0.1 167)"] {
            let color = Color::from_str(text).expect("sample colors are well-formed");
            let again = Color::from_str(&color.to_string()).expect("display output reparses");
            // Formatting drops precision, so compare the stable second pass.
            assert_eq!(again.to_string(), color.to_string());
        }
    }

    #[test]
    fn test_equality() {
        let yellow = Color::from_24bit(0xff, 0xca, 0x00);
        assert_eq!(yellow, Color::srgb(1.0, 202.0 / 255.0, 0.0));
        assert_ne!(yellow, Color::srgb(1.0, 202.0 / 255.0, 0.1));
        // Equality requires matching color spaces, not just coordinates.
        assert_ne!(
            Color::new(ColorSpace::Srgb, [0.5, 0.5, 0.5]),
            Color::new(ColorSpace::LinearSrgb, [0.5, 0.5, 0.5])
        );
    }

    #[test]
    fn test_conversion_round_trip() {
        let blue = Color::from_24bit(0x31, 0x78, 0xea);
        let oklch = blue.to(ColorSpace::Oklch);
        let [l, c, h] = *oklch.as_ref();
        assert_close_enough!(l, 0.5909012953108558);
        assert_close_enough!(c, 0.18665606306724153);
        assert_close_enough!(h, 259.66681920272595);
        assert_eq!(oklch.to(ColorSpace::Srgb), blue);
        assert_eq!(oklch.to_24bit(), [0x31, 0x78, 0xea]);
    }

    #[test]
    fn test_gamut() {
        let too_green = Color::new(ColorSpace::Srgb, [-0.51, 1.02, -0.31]);
        assert!(!too_green.in_gamut());
        assert!(too_green.clip().in_gamut());
        assert_eq!(too_green.clip().as_ref(), &[0.0, 1.0, 0.0]);

        // Unbounded color spaces are always in gamut.
        assert!(Color::oklch(0.5, 0.4, 120.0).in_gamut());
    }
}
