/// The enumeration of supported color spaces.
///
/// # sRGB
///
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) is the displayable gamut this
/// crate targets; it is available in gamma-corrected and linear form. In-gamut
/// coordinates range from 0 to 1, inclusive.
///
/// # Oklab and Oklch
///
/// [Oklab/Oklch](https://bottosson.github.io/posts/oklab/) are two coordinate
/// systems for the same perceptually uniform color space, which uses one
/// coordinate for lightness and two coordinates for "colorness." Oklab uses
/// Cartesian coordinates a, b—with the a axis varying red/green and the b axis
/// varying blue/yellow. Oklch uses polar coordinates C/hº—with C expressing
/// chroma and hº expressing hue—which makes it well-suited to synthesizing and
/// modifying colors, darkening included.
///
/// Valid coordinates observe the following invariants:
///
///   * The lightness is limited to `0..=1`.
///   * The a/b coordinates of Oklab have no set limits, but in practice can be
///     bounded `-0.4..=0.4`.
///   * The chroma of Oklch must be non-negative and in practice can be bounded
///     `0..=0.4`.
///   * The hue of Oklch may be not-a-number, which indicates a powerless
///     component, i.e., gray tone. In that case, the chroma must necessarily
///     be zero.
///
/// # XYZ
///
/// [XYZ](https://en.wikipedia.org/wiki/CIE_1931_color_space) with the D65
/// standard illuminant serves as foundational color space: all conversions
/// between unrelated color spaces go through it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    Srgb,
    LinearSrgb,
    Oklab,
    Oklch,
    Xyz,
}

impl ColorSpace {
    /// Determine whether this color space is polar.
    ///
    /// Oklch currently is the only polar color space.
    pub const fn is_polar(&self) -> bool {
        matches!(*self, Self::Oklch)
    }

    /// Determine whether this color space is RGB.
    ///
    /// RGB color spaces are additive and have red, green, and blue
    /// coordinates. In-gamut colors have coordinates in unit range `0..=1`.
    pub const fn is_rgb(&self) -> bool {
        matches!(*self, Self::Srgb | Self::LinearSrgb)
    }

    /// Determine whether this color space is one of the Oklab variations.
    pub const fn is_ok(&self) -> bool {
        matches!(*self, Self::Oklab | Self::Oklch)
    }

    /// Determine whether this color space is bounded.
    ///
    /// XYZ and the Oklab variations are *unbounded* and hence can model any
    /// color. By contrast, RGB color spaces are *bounded*, with coordinates of
    /// in-gamut colors ranging `0..=1`.
    pub const fn is_bounded(&self) -> bool {
        self.is_rgb()
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ColorSpace::*;

        let s = match self {
            Srgb => "sRGB",
            LinearSrgb => "linear sRGB",
            Oklab => "Oklab",
            Oklch => "Oklch",
            Xyz => "XYZ D65",
        };

        f.write_str(s)
    }
}
