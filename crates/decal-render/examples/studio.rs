//! Sticker Studio - Scripted Scene Walkthrough
//!
//! Builds a scene the way an app session would: pick a base photo, drop in
//! catalog stickers, drag and resize them, wait for the size-cycle spring
//! to settle, and export the flattened result as a PNG.
//!
//! Run: `cargo run -p decal-render --example studio`

use std::time::Duration;

use decal_core::{CaptureOptions, Catalog, EngineConfig, GestureEvent, Scene, Vec2};
use decal_render::{MemorySource, PixmapExporter};

const MS_16: Duration = Duration::from_millis(16);

/// Solid-color stand-ins for real asset pixels.
fn demo_source(catalog: &Catalog) -> MemorySource {
    let mut source = MemorySource::new();
    source.insert_solid("photo:beach", 320, 440, [96, 168, 224, 255]);

    let tints: [[u8; 4]; 3] = [
        [230, 40, 90, 255],
        [250, 210, 60, 255],
        [180, 110, 240, 255],
    ];
    for (entry, tint) in catalog.entries().iter().zip(tints) {
        source.insert_solid(entry.content.clone(), 100, 100, tint);
    }
    source
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::default();
    let mut scene = Scene::new(EngineConfig::default());
    scene.set_base("photo:beach".into());

    // Drop every catalog sticker onto the canvas; they cascade in from the
    // bottom-right corner.
    let ids: Vec<_> = catalog
        .entries()
        .iter()
        .map(|entry| scene.add_overlay(entry.content.clone()))
        .collect();

    // Drag the first sticker up toward the middle of the photo.
    scene.apply(ids[0], GestureEvent::PanBegin)?;
    scene.apply(
        ids[0],
        GestureEvent::PanUpdate {
            delta: Vec2::new(-120.0, -220.0),
        },
    )?;
    scene.apply(ids[0], GestureEvent::PanEnd)?;

    // Pinch the second one bigger; the commit keeps the session factor.
    scene.apply(ids[1], GestureEvent::PinchBegin)?;
    scene.apply(ids[1], GestureEvent::PinchUpdate { scale: 2.0 })?;
    scene.apply(ids[1], GestureEvent::PinchEnd)?;

    // Double-tap the third and let the spring carry it to the next preset.
    scene.apply(ids[2], GestureEvent::DoubleTap)?;
    let mut frames = 0u32;
    while !scene.is_at_rest() {
        scene.tick(MS_16);
        frames += 1;
    }
    println!("spring settled after {frames} frames");

    for overlay in scene.overlays() {
        println!(
            "{} {} offset=({:.0}, {:.0}) scale={:.2}",
            overlay.id(),
            overlay.content(),
            overlay.committed_offset().x,
            overlay.committed_offset().y,
            overlay.committed_scale(),
        );
    }

    let mut exporter = PixmapExporter::new(demo_source(&catalog));
    let raster = scene.export(&mut exporter, &CaptureOptions::default())?;

    let path = std::env::temp_dir().join("decal-studio.png");
    raster.save_png(&path)?;
    println!("exported {}x{} png to {}", raster.width(), raster.height(), path.display());
    Ok(())
}
