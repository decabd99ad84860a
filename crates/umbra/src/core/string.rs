use crate::error::ColorFormatError;
use crate::{ColorSpace, Float};

/// Parse a 24-bit color in hashed hexadecimal format. If successful, this
/// function returns the three coordinates as unsigned bytes. It transparently
/// handles single-digit coordinates.
fn parse_hashed(s: &str) -> Result<[u8; 3], ColorFormatError> {
    if !s.starts_with('#') {
        return Err(ColorFormatError::UnknownFormat);
    } else if s.len() != 4 && s.len() != 7 {
        return Err(ColorFormatError::UnexpectedCharacters);
    }

    fn parse_coordinate(s: &str, index: usize) -> Result<u8, ColorFormatError> {
        let factor = s.len() / 3;
        let t = s
            .get(1 + factor * index..1 + factor * (index + 1))
            .ok_or(ColorFormatError::UnexpectedCharacters)?;
        let n = u8::from_str_radix(t, 16).map_err(|_| ColorFormatError::MalformedHex)?;

        Ok(if factor == 1 { 16 * n + n } else { n })
    }

    let c1 = parse_coordinate(s, 0)?;
    let c2 = parse_coordinate(s, 1)?;
    let c3 = parse_coordinate(s, 2)?;
    Ok([c1, c2, c3])
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse a color in `rgb()` function notation with 0–255 channels. Channels
/// may be separated by commas or white space, i.e., both the legacy and the
/// modern CSS syntax are accepted.
fn parse_rgb_function(s: &str) -> Result<[Float; 3], ColorFormatError> {
    let rest = s
        .strip_prefix("rgb")
        .ok_or(ColorFormatError::UnknownFormat)?;
    let body = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })?;

    fn parse_channel(s: Option<&str>) -> Result<Float, ColorFormatError> {
        let t = s.ok_or(ColorFormatError::MissingCoordinate)?;
        let n: Float = t.parse().map_err(|_| ColorFormatError::MalformedFloat)?;
        Ok(n / 255.0)
    }

    let mut iter = body
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty());
    let c1 = parse_channel(iter.next())?;
    let c2 = parse_channel(iter.next())?;
    let c3 = parse_channel(iter.next())?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok([c1, c2, c3])
}

// --------------------------------------------------------------------------------------------------------------------

const COLOR_SPACES: [(&str, ColorSpace); 4] = [
    ("srgb", ColorSpace::Srgb),
    ("linear-srgb", ColorSpace::LinearSrgb),
    ("xyz-d65", ColorSpace::Xyz),
    ("xyz", ColorSpace::Xyz),
];

/// Parse a subset of valid CSS color formats. This function recognizes only
/// the `oklab()`, `oklch()`, and `color()` functions. The color space for the
/// latter must be `srgb`, `linear-srgb`, `xyz`, or `xyz-d65`. Coordinates must
/// not have units including `%`.
fn parse_css(s: &str) -> Result<(ColorSpace, [Float; 3]), ColorFormatError> {
    use ColorSpace::*;

    // Munge CSS function name
    let (space, rest) = s
        .strip_prefix("oklab")
        .map(|r| (Some(Oklab), r))
        .or_else(|| s.strip_prefix("oklch").map(|r| (Some(Oklch), r)))
        .or_else(|| s.strip_prefix("color").map(|r| (None, r)))
        .ok_or(ColorFormatError::UnknownFormat)?;

    // Munge parentheses after trimming leading whitespace
    let rest = rest
        .trim_start()
        .strip_prefix('(')
        .ok_or(ColorFormatError::NoOpeningParenthesis)
        .and_then(|rest| {
            rest.strip_suffix(')')
                .ok_or(ColorFormatError::NoClosingParenthesis)
        })?;

    let (space, body) = if let Some(s) = space {
        (s, rest) // Pass through
    } else {
        // Munge color space
        let rest = rest.trim_start();
        COLOR_SPACES
            .iter()
            .filter_map(|(p, s)| rest.strip_prefix(p).map(|r| (*s, r)))
            .next() // Take first (and only) result
            .ok_or(ColorFormatError::UnknownColorSpace)?
    };

    #[inline]
    fn parse_coordinate(s: Option<&str>) -> Result<Float, ColorFormatError> {
        s.ok_or(ColorFormatError::MissingCoordinate)
            .and_then(|t| t.parse().map_err(|_| ColorFormatError::MalformedFloat))
    }

    // Munge coordinates. Iterator eats all leading or trailing white space.
    let mut iter = body.split_whitespace();
    let c1 = parse_coordinate(iter.next())?;
    let c2 = parse_coordinate(iter.next())?;
    let c3 = parse_coordinate(iter.next())?;
    if iter.next().is_some() {
        return Err(ColorFormatError::TooManyCoordinates);
    }

    Ok((space, [c1, c2, c3]))
}

// --------------------------------------------------------------------------------------------------------------------

/// Parse the string into a color.
///
/// This function recognizes hashed hexadecimal, `rgb()` function, and CSS
/// formats for colors. In particular, it recognizes the three and six digit
/// hashed hexadecimal format, the `rgb()` function with 0–255 channels, and
/// the modern syntax for the `color()`, `oklab()`, and `oklch()` CSS functions
/// with space-separated arguments. Before trying to parse either of these
/// formats, this function trims leading and trailing white space and converts
/// ASCII letters to lowercase. However, a valid color string may still contain
/// Unicode white space characters and hence needn't be all ASCII.
pub(crate) fn parse(s: &str) -> Result<(ColorSpace, [Float; 3]), ColorFormatError> {
    let lowercase = s.trim().to_ascii_lowercase(); // Keep around for fn scope
    let s = lowercase.as_str();

    if s.starts_with('#') {
        let [c1, c2, c3] = parse_hashed(s)?;
        Ok((
            ColorSpace::Srgb,
            [
                c1 as Float / 255.0,
                c2 as Float / 255.0,
                c3 as Float / 255.0,
            ],
        ))
    } else if s.starts_with("rgb") {
        Ok((ColorSpace::Srgb, parse_rgb_function(s)?))
    } else {
        parse_css(s)
    }
}

// --------------------------------------------------------------------------------------------------------------------

fn css_prefix(space: ColorSpace) -> &'static str {
    use ColorSpace::*;
    match space {
        Srgb => "color(srgb ",
        LinearSrgb => "color(linear-srgb ",
        Oklab => "oklab(",
        Oklch => "oklch(",
        Xyz => "color(xyz ",
    }
}

/// Format the color as a string.
///
/// This function formats the given coordinates for the given color space as a
/// CSS color with the `color()`, `oklab()`, or `oklch()` function and
/// space-separated arguments. It respects the formatter's precision,
/// defaulting to 5 digits past the decimal. Since degrees for Oklch are up to
/// two orders of magnitude larger than other coordinates, this function uses a
/// precision smaller by 2 for degrees.
pub(crate) fn format(
    space: ColorSpace,
    coordinates: &[Float; 3],
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    f.write_fmt(format_args!("{}", css_prefix(space)))?;

    let mut factor = (10.0 as Float).powi(f.precision().unwrap_or(5) as i32);
    for (index, coordinate) in coordinates.iter().enumerate() {
        if space.is_polar() && index == 2 {
            factor /= 100.0;
        }

        if coordinate.is_nan() {
            f.write_str("none")?;
        } else {
            // CSS mandates NO trailing zeros whatsoever. But formatting
            // floats with a precision produces trailing zeros. Rounding
            // avoids them, for the most part. If fractional part is zero,
            // we do need an explicit precision---of zero!
            let c = (coordinate * factor).round() / factor;
            if c == c.trunc() {
                f.write_fmt(format_args!("{:.0}", c))?;
            } else {
                f.write_fmt(format_args!("{}", c))?;
            }
        }

        if index < 2 {
            f.write_str(" ")?;
        }
    }

    f.write_str(")")
}

// --------------------------------------------------------------------------------------------------------------------

/// Format 24-bit RGB coordinates in hashed hexadecimal notation.
pub(crate) fn format_hex(rgb: &[u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Format 24-bit RGB coordinates in `rgb()` function notation.
pub(crate) fn format_rgb_function(rgb: &[u8; 3]) -> String {
    format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
}

/// Format Oklch coordinates in `oklch()` function notation with fixed
/// precision: lightness with 2, chroma with 3, and hue with 2 digits past the
/// decimal. Unlike [`format`], this function keeps trailing zeros, so output
/// width is stable across colors.
pub(crate) fn format_oklch_fixed(coordinates: &[Float; 3]) -> String {
    let [l, c, h] = coordinates;
    format!("oklch({:.2} {:.3} {:.2})", l, c, h)
}

// ====================================================================================================================

#[cfg(test)]
mod test {
    use super::{
        format_hex, format_oklch_fixed, format_rgb_function, parse, parse_css, parse_hashed,
        parse_rgb_function, ColorFormatError,
    };
    use crate::core::assert_same_coordinates;
    use crate::ColorSpace::*;

    #[test]
    fn test_parse_hashed() -> Result<(), ColorFormatError> {
        assert_eq!(parse_hashed("#123")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("#112233")?, [0x11_u8, 0x22, 0x33]);
        assert_eq!(parse_hashed("fff"), Err(ColorFormatError::UnknownFormat));
        assert_eq!(
            parse_hashed("#ff"),
            Err(ColorFormatError::UnexpectedCharacters)
        );
        assert_eq!(
            parse_hashed("#💩00"),
            Err(ColorFormatError::UnexpectedCharacters)
        );

        let result = parse_hashed("#0g0");
        assert!(matches!(result, Err(ColorFormatError::MalformedHex)));

        Ok(())
    }

    #[test]
    fn test_parse_rgb_function() -> Result<(), ColorFormatError> {
        let coordinates = parse_rgb_function("rgb(255, 202, 0)")?;
        assert_same_coordinates!(Srgb, &coordinates, &[1.0, 202.0 / 255.0, 0.0]);

        let coordinates = parse_rgb_function("rgb(255 202 0)")?;
        assert_same_coordinates!(Srgb, &coordinates, &[1.0, 202.0 / 255.0, 0.0]);

        assert_eq!(
            parse_rgb_function("rgb 1, 2, 3)"),
            Err(ColorFormatError::NoOpeningParenthesis)
        );
        assert_eq!(
            parse_rgb_function("rgb(1, 2, 3"),
            Err(ColorFormatError::NoClosingParenthesis)
        );
        assert_eq!(
            parse_rgb_function("rgb(1, 2)"),
            Err(ColorFormatError::MissingCoordinate)
        );
        assert_eq!(
            parse_rgb_function("rgb(1, 2, 3, 4)"),
            Err(ColorFormatError::TooManyCoordinates)
        );
        assert!(matches!(
            parse_rgb_function("rgb(1, two, 3)"),
            Err(ColorFormatError::MalformedFloat)
        ));

        Ok(())
    }

    #[test]
    fn test_parse_css() {
        assert_eq!(parse_css("oklab(0 0 0)"), Ok((Oklab, [0.0, 0.0, 0.0])));
        assert_eq!(
            parse_css("oklch(0.5 0.1 167)"),
            Ok((Oklch, [0.5, 0.1, 167.0]))
        );
        assert_eq!(
            parse_css("color(xyz   1  1  1)"),
            Ok((Xyz, [1.0, 1.0, 1.0]))
        );
        assert_eq!(
            parse_css("color(xyz-d65 1 1 1)"),
            Ok((Xyz, [1.0, 1.0, 1.0]))
        );
        assert_eq!(
            parse_css("color  (  linear-srgb   1  1.123  0.3333   )"),
            Ok((LinearSrgb, [1.0, 1.123, 0.3333]))
        );
        assert_eq!(
            parse_css("whatever(1 1 1)"),
            Err(ColorFormatError::UnknownFormat)
        );
        assert_eq!(
            parse_css("color(nemo 1 1 1)"),
            Err(ColorFormatError::UnknownColorSpace)
        );
        assert_eq!(
            parse_css("oklch(0.5 0.1)"),
            Err(ColorFormatError::MissingCoordinate)
        );
        assert_eq!(
            parse_css("oklch(0.5 0.1 167 0.9)"),
            Err(ColorFormatError::TooManyCoordinates)
        );

        assert_eq!(
            parse("   OKLCH(0.5   0.1 167)    "),
            Ok((Oklch, [0.5, 0.1, 167.0]))
        );
    }

    #[test]
    fn test_format() {
        // Color as Display directly invokes format().
        use crate::Color;

        let color = Color::srgb(0.3, 0.336, 0.123456);
        assert_eq!(color.to_string(), "color(srgb 0.3 0.336 0.12346)");
        assert_eq!(format!("{:.2}", color), "color(srgb 0.3 0.34 0.12)");
        assert_eq!(
            Color::oklch(0.5, 0.1, 167.0).to_string(),
            "oklch(0.5 0.1 167)"
        );
    }

    #[test]
    fn test_fixed_formats() {
        assert_eq!(format_hex(&[255, 202, 0]), "#ffca00");
        assert_eq!(format_rgb_function(&[49, 120, 234]), "rgb(49, 120, 234)");
        assert_eq!(
            format_oklch_fixed(&[0.5, 0.2, 30.0]),
            "oklch(0.50 0.200 30.00)"
        );
        assert_eq!(
            format_oklch_fixed(&[0.123456, 0.04567, 259.666]),
            "oklch(0.12 0.046 259.67)"
        );
    }
}
