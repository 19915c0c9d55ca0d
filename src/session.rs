//! Viewport session: one container, one content element, resolved once.
//!
//! Every offset or scale change made by an adapter or by the reposition
//! engine goes through [`Session::apply_delta`] or [`Session::apply_absolute`]
//! (or [`Session::apply_with`] for read-modify-write), which update the typed
//! placement and project exactly the changed fields onto the content element.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementRegistry, StyleProjection};
use crate::error::{Role, ViewportError};
use crate::position::{Placement, Position, PositionUpdate};

/// Stable identifiers of the elements a session binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementIds {
    pub container: String,
    pub content: String,
    /// Descendant of the content used as the centering reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ElementIds {
    #[must_use]
    pub fn new(container: &str, content: &str) -> Self {
        Self { container: container.to_owned(), content: content.to_owned(), target: None }
    }

    #[must_use]
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = Some(target.to_owned());
        self
    }
}

/// What centering measures against.
#[derive(Debug, Clone)]
enum Anchor<E> {
    Content,
    Target { id: String, element: E },
    Unresolved { id: String },
}

#[derive(Debug)]
pub struct Session<E: Element> {
    container: E,
    content: E,
    anchor: Anchor<E>,
    placement: Placement,
    live: bool,
}

impl<E: Element> Session<E> {
    /// Bind to already-resolved handles, centering on the content itself.
    #[must_use]
    pub fn new(container: E, content: E) -> Self {
        Self { container, content, anchor: Anchor::Content, placement: Placement::default(), live: true }
    }

    /// Look up the elements named by `ids`.
    ///
    /// A missing centering target is not fatal: the session is created and
    /// centering calls report [`ViewportError::InvalidTarget`].
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::MissingElement`] when the container or the
    /// content cannot be found.
    pub fn resolve<R>(registry: &R, ids: &ElementIds) -> Result<Self, ViewportError>
    where
        R: ElementRegistry<Element = E>,
    {
        let container = registry
            .element(&ids.container)
            .ok_or_else(|| ViewportError::MissingElement { role: Role::Container, id: ids.container.clone() })?;
        let content = registry
            .element(&ids.content)
            .ok_or_else(|| ViewportError::MissingElement { role: Role::Content, id: ids.content.clone() })?;

        let mut session = Self::new(container, content);
        if let Some(id) = &ids.target {
            session.anchor = match registry.element(id) {
                Some(element) => Anchor::Target { id: id.clone(), element },
                None => {
                    tracing::warn!(target_id = %id, "centering target not found");
                    Anchor::Unresolved { id: id.clone() }
                }
            };
        }
        Ok(session)
    }

    /// Center against `target` instead of the content element.
    #[must_use]
    pub fn with_target(mut self, id: &str, target: E) -> Self {
        self.anchor = Anchor::Target { id: id.to_owned(), element: target };
        self
    }

    /// Start from an existing placement instead of the origin.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn container(&self) -> &E {
        &self.container
    }

    #[must_use]
    pub fn content(&self) -> &E {
        &self.content
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Centering reference, if it differs from the content element.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError::InvalidTarget`] when the configured target
    /// was never found or is not inside the content.
    pub fn target(&self) -> Result<Option<&E>, ViewportError> {
        match &self.anchor {
            Anchor::Content => Ok(None),
            Anchor::Target { id, element } => {
                if self.content.contains(element) {
                    Ok(Some(element))
                } else {
                    Err(ViewportError::InvalidTarget { id: id.clone() })
                }
            }
            Anchor::Unresolved { id } => Err(ViewportError::InvalidTarget { id: id.clone() }),
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live && self.container.is_connected() && self.content.is_connected()
    }

    /// # Errors
    ///
    /// [`ViewportError::TornDown`] after [`Self::invalidate`], otherwise
    /// [`ViewportError::Detached`] when either element left the document.
    pub fn ensure_live(&self) -> Result<(), ViewportError> {
        if !self.live {
            return Err(ViewportError::TornDown);
        }
        if !self.container.is_connected() {
            return Err(ViewportError::Detached { role: Role::Container });
        }
        if !self.content.is_connected() {
            return Err(ViewportError::Detached { role: Role::Content });
        }
        Ok(())
    }

    /// Current content position, recomputed from layout.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::measure(&self.placement, &self.content)
    }

    #[must_use]
    pub fn container_position(&self) -> Position {
        Position::of_element(&self.container)
    }

    /// Shift the content by a pixel delta.
    ///
    /// # Errors
    ///
    /// Fails when the session is torn down or detached.
    pub fn apply_delta(&mut self, dx: f64, dy: f64) -> Result<Position, ViewportError> {
        if dx.abs() < f64::EPSILON && dy.abs() < f64::EPSILON {
            self.ensure_live()?;
            return Ok(self.position());
        }
        let top = self.placement.top + dy;
        let left = self.placement.left + dx;
        tracing::trace!(dx, dy, top, left, "apply delta");
        self.apply_absolute(PositionUpdate::offset(top, left))
    }

    /// Overwrite the fields present in `update`.
    ///
    /// # Errors
    ///
    /// Fails when the session is torn down or detached.
    pub fn apply_absolute(&mut self, update: PositionUpdate) -> Result<Position, ViewportError> {
        self.ensure_live()?;
        if !update.is_empty() {
            update.apply_to(&mut self.placement);
            self.content.project(&update.projection());
        }
        Ok(self.position())
    }

    /// Compute an update from the current position and apply it.
    ///
    /// # Errors
    ///
    /// Fails when the session is torn down or detached.
    pub fn apply_with<F>(&mut self, f: F) -> Result<Position, ViewportError>
    where
        F: FnOnce(&Position) -> PositionUpdate,
    {
        self.ensure_live()?;
        let update = f(&self.position());
        self.apply_absolute(update)
    }

    /// Write the content's CSS transition.
    ///
    /// # Errors
    ///
    /// Fails when the session is torn down or detached.
    pub fn project_transition(&self, transition: &str) -> Result<(), ViewportError> {
        self.ensure_live()?;
        self.content.project(&StyleProjection::transition(transition));
        Ok(())
    }

    /// Drop the binding. Every later mutation fails with
    /// [`ViewportError::TornDown`].
    pub fn invalidate(&mut self) {
        self.live = false;
    }
}
