//! Domain services used by the AR client and the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! `proximity` owns save/nearby-load semantics on top of a `DrawingStore`.
//! `session` drives touch input through a stroke builder and persists
//! finished strokes through `proximity`.

pub mod proximity;
pub mod session;
