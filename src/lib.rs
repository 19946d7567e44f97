//! GeoDraw: GPS-anchored AR finger drawing.
//!
//! ARCHITECTURE
//! ============
//! Two independent cores plus the plumbing around them:
//!
//! - [`stroke`] turns touch samples into Catmull-Rom tube meshes and hands
//!   them to a [`render::SceneRenderer`].
//! - [`services::proximity`] persists finished strokes to a [`store::DrawingStore`]
//!   and loads strokes saved near the user.
//!
//! [`services::session`] wires both to device capabilities for an AR session.
//! [`routes`] exposes the `drawings` collection over HTTP so the store can live
//! behind a network boundary.

pub mod config;
pub mod db;
pub mod device;
pub mod geo;
pub mod render;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod stroke;
