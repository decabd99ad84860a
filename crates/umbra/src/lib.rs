//! # Umbra
//!
//! Umbra computes perceptually consistent, darkened variants of colors.
//!
//!
//! ## 1. Overview
//!
//! Umbra's main abstractions are:
//!
//!   * [`Color`] implements **high-resolution colors** by combining a
//!     [`ColorSpace`] with three [`Float`] coordinates. Its methods expose
//!     conversion between color spaces as well as gamut testing and clipping.
//!   * The [`dusk`] module implements the **darkening pipeline**: it remaps
//!     lightness in the perceptually uniform Oklch color space, recomputes
//!     chroma against the sRGB gamut boundary, and serializes the result as
//!     hexadecimal, `rgb()`, or `oklch()` text. [`transform`] is the main
//!     entry point; [`relative_chroma`], [`floor_relative_chroma`], and
//!     [`darken_lightness`] expose its individual stages.
//!
//! Darkening a color naively, by scaling its RGB channels, shifts both hue
//! and perceived saturation. Umbra instead measures how saturated a color is
//! *relative to what its lightness and hue admit*, darkens the lightness,
//! and then re-derives an absolute chroma from that preserved proportion.
//! The [`dusk`] module documentation describes the pipeline in detail.
//!
//!
//! ## 2. One-Two-Three: Dark Colors!
//!
//! Using umbra takes all of one function call:
//!
//! ```
//! # use umbra::{transform, ChromaMode, OutputFormat};
//! let dark = transform("#ffca00", OutputFormat::Hex, ChromaMode::Relative);
//! assert!(dark.starts_with('#'));
//! ```
//!
//! The pipeline never panics and never returns an error: inputs it cannot
//! make sense of map to the sentinel string [`INVALID_COLOR`].
//!
//!
//! ## 3. Features
//!
//! Umbra has one feature:
//!
//!   - **`f64`** selects the eponymous type as floating point type [`Float`]
//!     and `u64` as [`Bits`] instead of `f32` as [`Float`] and `u32` as
//!     [`Bits`]. This feature is enabled by default.
//!
//!
//! ## 4. Acknowledgements
//!
//! Umbra directly reuses [Color.js](https://colorjs.io)' formulae for
//! conversion between color spaces and implements several [CSS Color
//! 4](https://www.w3.org/TR/css-color-4/) algorithms. Thank you! 🌘

/// The floating point type in use.
#[cfg(feature = "f64")]
pub type Float = f64;
/// The floating point type in use.
#[cfg(not(feature = "f64"))]
pub type Float = f32;

/// [`Float`]'s bits.
#[cfg(feature = "f64")]
pub type Bits = u64;
/// [`Float`]'s bits.
#[cfg(not(feature = "f64"))]
pub type Bits = u32;

mod core;
pub mod dusk;
pub mod error;
mod object;

#[doc(hidden)]
pub use core::to_eq_bits;

pub use core::ColorSpace;
pub use dusk::{
    darken_lightness, floor_relative_chroma, relative_chroma, transform, transform_str,
    ChromaMode, OutputFormat, INVALID_COLOR,
};
pub use object::Color;
