//! Deferred image loading driven by viewport proximity.
//!
//! The observer is a registry of `handle -> target URL` pairs. The rendering
//! layer reports element geometry through [`LazyLoadObserver::dispatch`]; every
//! watched element that has come within the bottom margin of the viewport is
//! returned once as an [`ImageLoad`] and forgotten.

use std::collections::HashMap;
use std::hash::Hash;

/// Vertical extent of the scrolling viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub top: f64,
    pub bottom: f64,
}

/// Vertical extent of one watched element, in the viewport's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub bottom: f64,
}

/// An image whose source should now be set to `url`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLoad<H> {
    pub handle: H,
    pub url: String,
}

#[derive(Debug)]
pub struct LazyLoadObserver<H> {
    /// Extra distance below the viewport that still counts as visible
    margin: f64,
    watched: HashMap<H, String>,
}

impl<H> LazyLoadObserver<H>
where
    H: Eq + Hash + Clone,
{
    #[must_use]
    pub fn new(margin: f64) -> Self {
        Self {
            margin,
            watched: HashMap::new(),
        }
    }

    /// Register an image for deferred loading. Re-watching a handle replaces its target.
    pub fn watch(&mut self, handle: H, target_url: impl Into<String>) {
        self.watched.insert(handle, target_url.into());
    }

    /// Stop watching `handle`, returning its target if it was still pending
    pub fn unwatch(&mut self, handle: &H) -> Option<String> {
        self.watched.remove(handle)
    }

    #[must_use]
    pub fn is_watching(&self, handle: &H) -> bool {
        self.watched.contains_key(handle)
    }

    /// Handles still waiting to load
    pub fn pending(&self) -> impl Iterator<Item = &H> {
        self.watched.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.watched.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.watched.is_empty()
    }

    /// Forget every registration
    pub fn clear(&mut self) {
        self.watched.clear();
    }

    #[must_use]
    pub const fn margin(&self) -> f64 {
        self.margin
    }

    /// Whether an element at `bounds` crosses the margin-extended viewport
    #[must_use]
    pub fn intersects(&self, viewport: Viewport, bounds: ElementBounds) -> bool {
        bounds.top < viewport.bottom + self.margin && bounds.bottom > viewport.top
    }

    /// Process a batch of geometry reports.
    ///
    /// Entries for handles that are not watched are ignored. Each intersecting
    /// handle is unwatched and yields exactly one load, in entry order.
    pub fn dispatch<I>(&mut self, viewport: Viewport, entries: I) -> Vec<ImageLoad<H>>
    where
        I: IntoIterator<Item = (H, ElementBounds)>,
    {
        let mut loads = Vec::new();
        for (handle, bounds) in entries {
            if !self.is_watching(&handle) || !self.intersects(viewport, bounds) {
                continue;
            }
            if let Some(url) = self.watched.remove(&handle) {
                loads.push(ImageLoad { handle, url });
            }
        }
        loads
    }
}
