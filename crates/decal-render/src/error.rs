#![forbid(unsafe_code)]

//! Raster backend failures.

use core::fmt;

use decal_core::ContentRef;

/// Errors raised while resolving content or producing a raster.
#[derive(Debug)]
pub enum RenderError {
    /// A frame referenced a content handle the source cannot resolve.
    MissingContent(ContentRef),
    /// PNG encode or decode failure from the `image` codecs.
    Image(image::ImageError),
    /// Filesystem failure while persisting a raster.
    Io(std::io::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContent(content) => {
                write!(f, "no pixels registered for content handle '{content}'")
            }
            Self::Image(err) => write!(f, "image codec error: {err}"),
            Self::Io(err) => write!(f, "i/o error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
