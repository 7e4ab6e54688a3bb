#![forbid(unsafe_code)]

//! Software raster backend for `decal-core`.
//!
//! # Role in Decal
//! `decal-render` implements the engine's export boundary in pure software:
//! it maps content handles to RGBA pixels, flattens a `CompositionFrame`
//! bottom-up with source-over blending, and hands back a PNG-encodable
//! [`Pixmap`].
//!
//! # Primary responsibilities
//! - **Pixmap**: owned RGBA8 raster with PNG encode/save.
//! - **ContentSource / MemorySource**: resolve opaque content handles to
//!   pixels.
//! - **PixmapExporter**: the `SnapshotExporter` implementation applications
//!   plug into `Scene::export`.
//!
//! # How it fits in the system
//! The engine stays free of pixels and I/O; everything codec-shaped lives
//! here, on top of the `image` crate's PNG support.

pub mod error;
pub mod exporter;
pub mod pixmap;
pub mod source;

pub use error::RenderError;
pub use exporter::PixmapExporter;
pub use pixmap::Pixmap;
pub use source::{ContentSource, MemorySource};
