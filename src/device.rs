//! Device capabilities consumed by an AR session: permissions and GPS.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browsers and mobile SDKs expose these through callbacks. Here they are
//! async traits returning a typed failure so the session can `?` through
//! them.

use std::fmt;

use tracing::{info, warn};

use crate::geo::GeoCoordinate;

// =============================================================================
// PERMISSIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    Location,
    Orientation,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Camera => "camera",
            Self::Location => "location",
            Self::Orientation => "device orientation",
        })
    }
}

/// Access to a device capability was refused. Aborts AR entry.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PermissionError {
    #[error("{0} permission denied")]
    Denied(Permission),
    #[error("{permission} permission request failed: {reason}")]
    Failed { permission: Permission, reason: String },
}

#[async_trait::async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Prompt for (or confirm) one permission.
    ///
    /// # Errors
    ///
    /// Returns a [`PermissionError`] if the user or platform refuses.
    async fn request(&self, permission: Permission) -> Result<(), PermissionError>;

    /// Whether orientation access needs an explicit prompt on this device.
    fn requires_orientation_permission(&self) -> bool {
        false
    }
}

/// Request everything an AR drawing session needs, in prompt order.
///
/// # Errors
///
/// Returns the first [`PermissionError`]; later prompts are not shown.
pub async fn request_ar_permissions<P>(provider: &P) -> Result<(), PermissionError>
where
    P: PermissionProvider + ?Sized,
{
    let mut needed = vec![Permission::Camera, Permission::Location];
    if provider.requires_orientation_permission() {
        needed.push(Permission::Orientation);
    }

    for permission in needed {
        if let Err(e) = provider.request(permission).await {
            warn!(error = %e, %permission, "permission refused");
            return Err(e);
        }
    }

    info!("AR permissions granted");
    Ok(())
}

// =============================================================================
// GPS
// =============================================================================

/// No usable position fix. Drawing persistence and nearby queries stay inert
/// until a fix is available.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GpsError {
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("position request timed out")]
    Timeout,
    #[error("location access denied")]
    Denied,
}

#[async_trait::async_trait]
pub trait GpsProvider: Send + Sync {
    /// Current device coordinate.
    ///
    /// # Errors
    ///
    /// Returns a [`GpsError`] if no fix is available.
    async fn current_coordinate(&self) -> Result<GeoCoordinate, GpsError>;
}

/// A provider pinned to one coordinate. Useful for kiosks and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedGps(pub GeoCoordinate);

#[async_trait::async_trait]
impl GpsProvider for FixedGps {
    async fn current_coordinate(&self) -> Result<GeoCoordinate, GpsError> {
        Ok(self.0)
    }
}
