#![forbid(unsafe_code)]

//! Core engine: overlay snapshots, gesture transitions, composition, export.
//!
//! # Role in Decal
//! `decal-core` owns the state and the rules of a sticker composition. It
//! knows nothing about pixels or files; rendering backends implement
//! [`SnapshotExporter`] against the [`CompositionFrame`] it produces.
//!
//! # Primary responsibilities
//! - **Overlay**: immutable per-sticker snapshot (committed transform plus
//!   live gesture sessions).
//! - **transition**: the one pure function that maps `(Overlay, GestureEvent)`
//!   to the next snapshot.
//! - **OverlayRegistry / Scene**: ordered ownership of snapshots and the
//!   application-facing facade around them.
//! - **compose**: deterministic placement of every overlay into a frame,
//!   bottom-most first.
//!
//! # How it fits in the system
//! An application feeds [`GestureEvent`]s and wall-clock ticks into a
//! [`Scene`], reads frames back out with [`Scene::compose`], and hands the
//! frame to a backend such as `decal-render` for rasterization.

pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod geometry;
pub mod gesture;
pub mod overlay;
pub mod registry;
pub mod scene;
pub mod spring;

// --- Geometry re-exports ---------------------------------------------------

pub use geometry::{Corner, Rect, Size, Vec2};

// --- Configuration re-exports ----------------------------------------------

pub use config::EngineConfig;

// --- Overlay re-exports ----------------------------------------------------

pub use overlay::{ContentRef, GestureAxes, Overlay, OverlayId, PanState, PinchState};
pub use registry::OverlayRegistry;

// --- Gesture re-exports ----------------------------------------------------

pub use event::GestureEvent;
pub use gesture::{route, transition};
pub use spring::Spring;

// --- Composition and export re-exports -------------------------------------

pub use compose::{CompositionFrame, RenderOverlay, compose};
pub use export::{CaptureOptions, SnapshotExporter};

// --- Scene re-exports ------------------------------------------------------

pub use catalog::{Catalog, CatalogEntry};
pub use scene::Scene;

// --- Error re-exports ------------------------------------------------------

pub use error::{ExportError, GestureError};
