#![forbid(unsafe_code)]

//! Software rasterization of composition frames.
//!
//! [`PixmapExporter`] is the reference [`SnapshotExporter`]: it resolves
//! every content handle through a [`ContentSource`], scales each layer to
//! its on-canvas bounds, and alpha-blends the stack into a [`Pixmap`].
//!
//! # Invariants
//!
//! 1. Layers land in frame order: background fill, then the base image,
//!    then overlays bottom-most first, so the raster matches the frame's
//!    paint order exactly.
//! 2. The output raster is exactly `CaptureOptions` sized (zero bumped to
//!    one pixel); logical coordinates scale per axis to fit.
//! 3. Overlay pixels are scaled nearest-neighbour, so sticker art stays
//!    crisp at the cost of jagged edges.
//!
//! # Failure Modes
//!
//! 1. An unregistered content handle aborts the whole export with
//!    [`RenderError::MissingContent`]; nothing partial is returned.
//! 2. PNG codec failures surface as [`RenderError::Image`].

use decal_core::{CaptureOptions, CompositionFrame, SnapshotExporter};
use image::imageops::{self, FilterType};

use crate::error::RenderError;
use crate::pixmap::Pixmap;
use crate::source::ContentSource;

/// Flattens composition frames into RGBA rasters.
#[derive(Debug, Clone, Default)]
pub struct PixmapExporter<S> {
    source: S,
}

impl<S: ContentSource> PixmapExporter<S> {
    /// Wrap a content source.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Borrow the content source.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutably borrow the content source, e.g. to register more handles.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Unwrap into the content source.
    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    /// Rasterize one frame.
    pub fn render(
        &mut self,
        frame: &CompositionFrame,
        options: &CaptureOptions,
    ) -> Result<Pixmap, RenderError> {
        let width = options.width.max(1);
        let height = options.height.max(1);
        let sx = if frame.canvas.width > 0.0 {
            width as f32 / frame.canvas.width
        } else {
            1.0
        };
        let sy = if frame.canvas.height > 0.0 {
            height as f32 / frame.canvas.height
        } else {
            1.0
        };

        tracing::debug!(
            target: "decal.render",
            width,
            height,
            overlays = frame.overlays.len(),
            "rasterizing frame"
        );

        let mut canvas = Pixmap::new(width, height, options.background);

        if let Some(base) = &frame.base {
            let pixels = self.source.resolve(base)?;
            let scaled = imageops::resize(pixels.image(), width, height, FilterType::Triangle);
            imageops::overlay(canvas.image_mut(), &scaled, 0, 0);
        }

        for overlay in &frame.overlays {
            let pixels = self.source.resolve(&overlay.content)?;
            let target_w = (overlay.bounds.width * sx).round().max(1.0) as u32;
            let target_h = (overlay.bounds.height * sy).round().max(1.0) as u32;
            let x = (overlay.bounds.x * sx).round() as i64;
            let y = (overlay.bounds.y * sy).round() as i64;
            tracing::trace!(
                target: "decal.render",
                id = %overlay.id,
                x,
                y,
                w = target_w,
                h = target_h,
                "overlay blitted"
            );
            let scaled = imageops::resize(pixels.image(), target_w, target_h, FilterType::Nearest);
            imageops::overlay(canvas.image_mut(), &scaled, x, y);
        }

        Ok(canvas)
    }
}

impl<S: ContentSource> SnapshotExporter for PixmapExporter<S> {
    type Raster = Pixmap;
    type Error = RenderError;

    fn export(
        &mut self,
        frame: &CompositionFrame,
        options: &CaptureOptions,
    ) -> Result<Pixmap, RenderError> {
        self.render(frame, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use decal_core::{Corner, EngineConfig, GestureEvent, Scene, Size, Vec2};

    use crate::source::MemorySource;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    /// 8x8 canvas, 4-unit overlays pinned to the top-left corner with no
    /// cascade, starting at scale 1.0; keeps pixel coordinates exact.
    fn pixel_config() -> EngineConfig {
        let mut config = EngineConfig::default()
            .with_canvas(Size::new(8.0, 8.0))
            .with_overlay_size(Size::square(4.0))
            .with_anchor_corner(Corner::TopLeft)
            .with_size_presets([1.0, 1.5, 2.0]);
        config.corner_margin = 0.0;
        config.cascade_step = 0.0;
        config
    }

    fn options_8x8() -> CaptureOptions {
        CaptureOptions::new(8, 8)
    }

    #[test]
    fn base_is_stretched_over_the_canvas() {
        let mut scene = Scene::new(pixel_config());
        scene.set_base("photo:sky".into());

        let mut source = MemorySource::new();
        source.insert_solid("photo:sky", 2, 2, BLUE);
        let mut exporter = PixmapExporter::new(source);

        let raster = exporter.render(&scene.compose(), &options_8x8()).unwrap();
        assert_eq!(raster.pixel(0, 0), BLUE);
        assert_eq!(raster.pixel(7, 7), BLUE);
    }

    #[test]
    fn overlay_lands_inside_its_bounds() {
        let mut scene = Scene::new(pixel_config());
        scene.add_overlay("sticker:dot".into());

        let mut source = MemorySource::new();
        source.insert_solid("sticker:dot", 4, 4, RED);
        let mut exporter = PixmapExporter::new(source);

        let raster = exporter.render(&scene.compose(), &options_8x8()).unwrap();
        assert_eq!(raster.pixel(1, 1), RED);
        assert_eq!(raster.pixel(3, 3), RED);
        assert_eq!(raster.pixel(6, 6), WHITE, "outside the overlay box");
    }

    #[test]
    fn committed_pan_moves_the_blit() {
        let mut scene = Scene::new(pixel_config());
        let id = scene.add_overlay("sticker:dot".into());
        scene.apply(id, GestureEvent::PanBegin).unwrap();
        scene
            .apply(
                id,
                GestureEvent::PanUpdate {
                    delta: Vec2::new(4.0, 4.0),
                },
            )
            .unwrap();
        scene.apply(id, GestureEvent::PanEnd).unwrap();

        let mut source = MemorySource::new();
        source.insert_solid("sticker:dot", 4, 4, RED);
        let mut exporter = PixmapExporter::new(source);

        let raster = exporter.render(&scene.compose(), &options_8x8()).unwrap();
        assert_eq!(raster.pixel(1, 1), WHITE, "vacated origin");
        assert_eq!(raster.pixel(5, 5), RED);
    }

    #[test]
    fn later_overlay_paints_over_earlier() {
        let mut scene = Scene::new(pixel_config());
        scene.add_overlay("sticker:under".into());
        scene.add_overlay("sticker:over".into());

        let mut source = MemorySource::new();
        source.insert_solid("sticker:under", 4, 4, RED);
        source.insert_solid("sticker:over", 4, 4, GREEN);
        let mut exporter = PixmapExporter::new(source);

        let raster = exporter.render(&scene.compose(), &options_8x8()).unwrap();
        assert_eq!(raster.pixel(1, 1), GREEN);
    }

    #[test]
    fn semi_transparent_overlay_blends_source_over() {
        let mut scene = Scene::new(pixel_config());
        scene.add_overlay("sticker:smoke".into());

        let mut source = MemorySource::new();
        source.insert_solid("sticker:smoke", 4, 4, [0, 0, 0, 128]);
        let mut exporter = PixmapExporter::new(source);

        let raster = exporter.render(&scene.compose(), &options_8x8()).unwrap();
        let [r, g, b, a] = raster.pixel(1, 1);
        // `Rgba::blend` truncates its f32 alpha math, so an opaque result
        // can come back as 254.
        assert!(a >= 254, "opaque background must stay opaque, got {a}");
        for channel in [r, g, b] {
            assert!(
                (110..=140).contains(&channel),
                "half-black over white should land mid-gray, got {channel}"
            );
        }
    }

    #[test]
    fn capture_size_rescales_the_frame() {
        let mut scene = Scene::new(pixel_config());
        scene.add_overlay("sticker:dot".into());

        let mut source = MemorySource::new();
        source.insert_solid("sticker:dot", 4, 4, RED);
        let mut exporter = PixmapExporter::new(source);

        // Double resolution: the 4-unit box covers 8 pixels.
        let raster = exporter
            .render(&scene.compose(), &CaptureOptions::new(16, 16))
            .unwrap();
        assert_eq!((raster.width(), raster.height()), (16, 16));
        assert_eq!(raster.pixel(7, 7), RED);
        assert_eq!(raster.pixel(9, 9), WHITE);
    }

    #[test]
    fn off_canvas_overlay_clips_cleanly() {
        let mut scene = Scene::new(pixel_config());
        let id = scene.add_overlay("sticker:dot".into());
        scene.apply(id, GestureEvent::PanBegin).unwrap();
        scene
            .apply(
                id,
                GestureEvent::PanUpdate {
                    delta: Vec2::new(-2.0, -2.0),
                },
            )
            .unwrap();
        scene.apply(id, GestureEvent::PanEnd).unwrap();

        let mut source = MemorySource::new();
        source.insert_solid("sticker:dot", 4, 4, RED);
        let mut exporter = PixmapExporter::new(source);

        let raster = exporter.render(&scene.compose(), &options_8x8()).unwrap();
        assert_eq!(raster.pixel(0, 0), RED, "visible sliver survives");
        assert_eq!(raster.pixel(3, 3), WHITE, "clipped part is gone");
    }

    #[test]
    fn unknown_handle_aborts_export() {
        let mut scene = Scene::new(pixel_config());
        scene.add_overlay("sticker:ghost".into());

        let mut exporter = PixmapExporter::new(MemorySource::new());
        let err = exporter.render(&scene.compose(), &options_8x8()).unwrap_err();
        assert!(matches!(err, RenderError::MissingContent(_)));
    }
}
