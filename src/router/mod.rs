//! Route table resolver.
//!
//! Maps navigation paths to component references. Literal routes are tried
//! before parametric ones; within each group the first registered match
//! wins. Deferred components are built on the first navigation to their
//! route and reused afterwards.

pub mod history;
pub mod pattern;
pub mod route;

pub use history::{hash_href, hash_path, History};
pub use pattern::PathPattern;
pub use route::{ComponentRef, RouteEntry};

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0}")]
    NotFound(String),
    #[error("no route named {0}")]
    UnknownName(String),
    #[error("duplicate route {field}: {value}")]
    DuplicateRoute { field: &'static str, value: String },
    #[error("invalid route pattern {path}: {reason}")]
    InvalidPattern { path: String, reason: String },
}

struct Route<C> {
    pattern: PathPattern,
    name: String,
    component: ComponentRef<C>,
}

/// Result of matching a path against the table.
#[derive(Debug)]
pub struct RouteMatch<C> {
    pub name: String,
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub component: Arc<C>,
}

pub struct Router<C> {
    routes: Vec<Route<C>>,
    history: History,
}

impl<C> Router<C> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            history: History::new(),
        }
    }

    /// Build a router from a startup route list.
    pub fn with_routes(entries: impl IntoIterator<Item = RouteEntry<C>>) -> Result<Self, RouteError> {
        let mut router = Self::new();
        router.register(entries)?;
        Ok(router)
    }

    /// Add entries to the table. Either every entry is added or, on error,
    /// none is.
    pub fn register(&mut self, entries: impl IntoIterator<Item = RouteEntry<C>>) -> Result<(), RouteError> {
        let mut paths: HashSet<String> = self.routes.iter().map(|r| r.pattern.canonical()).collect();
        let mut names: HashSet<String> = self.routes.iter().map(|r| r.name.clone()).collect();

        let mut staged = Vec::new();
        for entry in entries {
            let pattern = PathPattern::parse(&entry.path)?;
            if !paths.insert(pattern.canonical()) {
                return Err(RouteError::DuplicateRoute {
                    field: "path",
                    value: entry.path,
                });
            }
            if !names.insert(entry.name.clone()) {
                return Err(RouteError::DuplicateRoute {
                    field: "name",
                    value: entry.name,
                });
            }
            staged.push(Route {
                pattern,
                name: entry.name,
                component: entry.component,
            });
        }

        for route in &staged {
            tracing::debug!(
                path = %route.pattern.canonical(),
                name = %route.name,
                deferred = route.component.is_deferred(),
                "route registered"
            );
        }
        self.routes.extend(staged);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered route names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.name.as_str())
    }

    /// Whether the named route's component is available without a load.
    pub fn is_loaded(&self, name: &str) -> Option<bool> {
        self.find_name(name).map(|r| r.component.is_loaded())
    }

    pub fn match_path(&self, path: &str) -> Result<RouteMatch<C>, RouteError> {
        let literal = self.routes.iter().filter(|r| r.pattern.is_static());
        let parametric = self.routes.iter().filter(|r| !r.pattern.is_static());

        literal
            .chain(parametric)
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
            .map(|(route, params)| {
                tracing::trace!(%path, name = %route.name, "route matched");
                RouteMatch {
                    name: route.name.clone(),
                    path: path.to_string(),
                    params,
                    component: self.load(route),
                }
            })
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    /// Component for a request path.
    pub fn resolve(&self, path: &str) -> Result<Arc<C>, RouteError> {
        self.match_path(path).map(|m| m.component)
    }

    pub fn resolve_name(&self, name: &str) -> Result<Arc<C>, RouteError> {
        self.find_name(name)
            .map(|route| self.load(route))
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))
    }

    /// Navigate to a hash href and record it in history. A failed
    /// navigation leaves history untouched.
    pub fn navigate(&mut self, href: &str) -> Result<RouteMatch<C>, RouteError> {
        let path = hash_path(href);
        let matched = self.match_path(&path)?;
        self.history.push(path);
        Ok(matched)
    }

    /// Return to the previous history entry.
    pub fn back(&mut self) -> Option<Result<RouteMatch<C>, RouteError>> {
        let path = self.history.back()?.to_string();
        Some(self.match_path(&path))
    }

    pub fn current(&self) -> Option<RouteMatch<C>> {
        let path = self.history.current()?;
        self.match_path(path).ok()
    }

    fn find_name(&self, name: &str) -> Option<&Route<C>> {
        self.routes.iter().find(|r| r.name == name)
    }

    fn load(&self, route: &Route<C>) -> Arc<C> {
        if !route.component.is_loaded() {
            tracing::info!(name = %route.name, "loading deferred component");
        }
        route.component.load()
    }
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}
