//! Foundational primitives for the edgegauge measurement pipeline.
//!
//! ## Images and Views
//! [`Image`] owns a row-major buffer; [`ImageView`] borrows one with an element
//! stride (not byte stride) so a [`Roi`] of a larger frame can be processed in
//! place. [`LumaBuffer`] is the 8-bit single-channel image the pipeline
//! consumes.
//!
//! ## Coordinates
//! Integer coordinates refer to pixel centers and `y` grows downward. Angles
//! are measured from `+x` toward `+y`, so in image terms a positive angle turns
//! clockwise on screen.

mod error;
mod geom;
mod image;
mod sample;

pub use error::Error;
pub use geom::{Point2f, Vec2f};
pub use image::{Image, ImageView, LumaBuffer, Roi};
pub use sample::sample_bilinear_f32;
