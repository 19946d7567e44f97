//! AR drawing session: the input-handling context.
//!
//! DESIGN
//! ======
//! An `ArSession` owns the stroke builder and the single in-progress stroke.
//! Touch events arrive in delivery order on one task:
//!
//! - `Start` begins a new stroke (an unfinished one is dropped)
//! - `Move` extends the current stroke, ignored when not drawing
//! - `End` finishes the stroke; kept strokes are anchored at the current GPS
//!   fix and saved
//!
//! Entering a session requests permissions and loads nearby drawings once.
//! Saves and queries are awaited inline; there is no cancellation.

use tracing::{debug, error, info, warn};

use crate::device::{GpsError, GpsProvider, PermissionError, PermissionProvider, request_ar_permissions};
use crate::geo::GeoCoordinate;
use crate::render::SceneRenderer;
use crate::services::proximity::ProximityStore;
use crate::store::{DrawingId, PersistenceError};
use crate::stroke::{CameraPose, Stroke, StrokeBuilder, TouchSample};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Start(TouchSample),
    Move(TouchSample),
    End,
}

/// Every failure an AR session can surface. None is retried.
#[derive(Debug, thiserror::Error)]
pub enum ArError {
    #[error(transparent)]
    Permission(#[from] PermissionError),
    #[error(transparent)]
    Gps(#[from] GpsError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub struct ArSession<R, G> {
    builder: StrokeBuilder<R>,
    proximity: ProximityStore,
    gps: G,
    current: Option<Stroke>,
}

impl<R: SceneRenderer, G: GpsProvider> ArSession<R, G> {
    /// Request permissions, then load drawings saved near the user.
    ///
    /// A failed nearby load is logged and does not abort entry.
    ///
    /// # Errors
    ///
    /// Returns `Permission` if any required permission is refused.
    pub async fn enter<P>(
        permissions: &P,
        gps: G,
        proximity: ProximityStore,
        builder: StrokeBuilder<R>,
    ) -> Result<Self, ArError>
    where
        P: PermissionProvider + ?Sized,
    {
        request_ar_permissions(permissions).await?;

        let mut session = Self { builder, proximity, gps, current: None };
        match session.load_nearby().await {
            Ok(count) => info!(count, "AR session started"),
            Err(e) => warn!(error = %e, "AR session started without nearby drawings"),
        }
        Ok(session)
    }

    /// Query and render drawings near the current GPS fix.
    ///
    /// # Errors
    ///
    /// Returns `Gps` if there is no fix, or `Persistence` if the query fails.
    pub async fn load_nearby(&mut self) -> Result<usize, ArError> {
        let center = self.current_fix().await?;
        Ok(self
            .proximity
            .load_nearby(center, &mut self.builder)
            .await?)
    }

    /// Feed one touch event. Returns the new drawing id when a stroke was
    /// saved.
    ///
    /// # Errors
    ///
    /// On `End`: `Gps` if no fix is available to anchor the stroke, or
    /// `Persistence` if saving fails. The stroke stays rendered either way.
    pub async fn handle_touch(&mut self, event: TouchEvent, pose: CameraPose) -> Result<Option<DrawingId>, ArError> {
        match event {
            TouchEvent::Start(sample) => {
                if self.current.is_some() {
                    debug!("new touch replaced unfinished stroke");
                }
                self.current = Some(self.builder.start(sample, pose));
                Ok(None)
            }
            TouchEvent::Move(sample) => {
                if let Some(stroke) = self.current.as_mut() {
                    self.builder.extend(stroke, sample, pose);
                }
                Ok(None)
            }
            TouchEvent::End => {
                let Some(stroke) = self.current.take() else {
                    return Ok(None);
                };
                let Some(stroke) = self.builder.finish(stroke) else {
                    return Ok(None);
                };
                let location = self.current_fix().await?;
                let id = self.proximity.save(&stroke, location).await?;
                Ok(Some(id))
            }
        }
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn builder(&self) -> &StrokeBuilder<R> {
        &self.builder
    }

    pub fn builder_mut(&mut self) -> &mut StrokeBuilder<R> {
        &mut self.builder
    }

    async fn current_fix(&self) -> Result<GeoCoordinate, GpsError> {
        self.gps
            .current_coordinate()
            .await
            .inspect_err(|e| error!(error = %e, "GPS position error"))
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
