//! Route entries and component references.

use std::fmt;
use std::sync::{Arc, OnceLock};

type Factory<C> = Box<dyn Fn() -> C + Send + Sync>;

enum Source<C> {
    Eager(Arc<C>),
    Deferred {
        factory: Factory<C>,
        loaded: OnceLock<Arc<C>>,
    },
}

/// A component that is either held already or built on first use.
///
/// Both kinds hand out the same `Arc<C>`, so callers cannot tell them apart.
/// A deferred factory runs at most once; later loads reuse its result.
pub struct ComponentRef<C> {
    source: Source<C>,
}

impl<C> ComponentRef<C> {
    pub fn eager(component: C) -> Self {
        Self {
            source: Source::Eager(Arc::new(component)),
        }
    }

    pub fn deferred<F>(factory: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self {
            source: Source::Deferred {
                factory: Box::new(factory),
                loaded: OnceLock::new(),
            },
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self.source, Source::Deferred { .. })
    }

    /// Whether a component is available without running a factory.
    pub fn is_loaded(&self) -> bool {
        match &self.source {
            Source::Eager(_) => true,
            Source::Deferred { loaded, .. } => loaded.get().is_some(),
        }
    }

    pub fn load(&self) -> Arc<C> {
        match &self.source {
            Source::Eager(component) => component.clone(),
            Source::Deferred { factory, loaded } => loaded.get_or_init(|| Arc::new(factory())).clone(),
        }
    }
}

impl<C> fmt::Debug for ComponentRef<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            Source::Eager(_) => "eager",
            Source::Deferred { .. } => "deferred",
        };
        f.debug_struct("ComponentRef")
            .field("kind", &kind)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// One row of the route table as supplied at startup.
#[derive(Debug)]
pub struct RouteEntry<C> {
    pub path: String,
    pub name: String,
    pub component: ComponentRef<C>,
}

impl<C> RouteEntry<C> {
    pub fn new(path: impl Into<String>, name: impl Into<String>, component: ComponentRef<C>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            component,
        }
    }

    pub fn eager(path: impl Into<String>, name: impl Into<String>, component: C) -> Self {
        Self::new(path, name, ComponentRef::eager(component))
    }

    pub fn lazy<F>(path: impl Into<String>, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self::new(path, name, ComponentRef::deferred(factory))
    }
}
