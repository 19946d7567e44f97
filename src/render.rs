//! Scene renderer capability and stroke materials.
//!
//! SYSTEM CONTEXT
//! ==============
//! The 3D framework is an external collaborator. The drawing core only ever
//! adds meshes, so the whole seam is one method: [`SceneRenderer::add_mesh`].

use crate::stroke::tube::TubeGeometry;

/// Fraction of the base color re-emitted so strokes read in low light.
pub const EMISSIVE_INTENSITY: f32 = 0.2;
pub const STROKE_METALNESS: f32 = 0.5;
pub const STROKE_ROUGHNESS: f32 = 0.5;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid stroke color {color:?}: {reason}")]
    InvalidColor { color: String, reason: String },
}

/// Solid, slightly self-illuminated material. Colors are sRGB components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeMaterial {
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
    pub metalness: f32,
    pub roughness: f32,
}

impl StrokeMaterial {
    /// Material for a CSS color string such as `#FF1493`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidColor` if the string is not a parseable color.
    pub fn from_hex(hex: &str) -> Result<Self, RenderError> {
        let parsed = csscolorparser::parse(hex)
            .map_err(|e| RenderError::InvalidColor { color: hex.to_string(), reason: e.to_string() })?;
        let [r, g, b, _] = parsed.to_rgba8();
        Ok(Self::from_rgb8([r, g, b]))
    }

    #[must_use]
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        let color = [f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0];
        Self {
            color,
            emissive: color,
            emissive_intensity: EMISSIVE_INTENSITY,
            metalness: STROKE_METALNESS,
            roughness: STROKE_ROUGHNESS,
        }
    }

    /// Radiance added on top of lighting: `emissive * emissive_intensity`.
    #[must_use]
    pub fn emitted(&self) -> [f32; 3] {
        self.emissive.map(|c| c * self.emissive_intensity)
    }
}

/// One renderable stroke: geometry plus material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshEntity {
    pub geometry: TubeGeometry,
    pub material: StrokeMaterial,
}

/// Accepts meshes for display. No removal API is used by the drawing core.
pub trait SceneRenderer {
    fn add_mesh(&mut self, entity: MeshEntity);
}

impl<R: SceneRenderer + ?Sized> SceneRenderer for &mut R {
    fn add_mesh(&mut self, entity: MeshEntity) {
        (**self).add_mesh(entity);
    }
}

impl<R: SceneRenderer + ?Sized> SceneRenderer for Box<R> {
    fn add_mesh(&mut self, entity: MeshEntity) {
        (**self).add_mesh(entity);
    }
}

/// Collects meshes in order; headless scenes and tests use this.
impl SceneRenderer for Vec<MeshEntity> {
    fn add_mesh(&mut self, entity: MeshEntity) {
        self.push(entity);
    }
}
