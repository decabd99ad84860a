mod conversion;
mod equality;
mod gamut;
mod space;
mod string;

// conversion
pub(crate) use conversion::{convert, from_24bit, to_24bit};

// equality
#[cfg(test)]
pub(crate) use equality::assert_same_coordinates;
pub use equality::to_eq_bits;
pub(crate) use equality::{is_achromatic, is_achromatic_chroma_hue, normalize, to_eq_coordinates};

// gamut
pub(crate) use gamut::{clip, in_gamut, max_chroma};

// space
pub use space::ColorSpace;

// string
pub(crate) use string::{format, format_hex, format_oklch_fixed, format_rgb_function, parse};
