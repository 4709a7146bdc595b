//! Fragment-based (hash) addressing and the navigation stack.
//!
//! Locations look like `index.html#/about?tab=team`. Only the part after
//! `#` names the route, so nothing depends on server-side routing.

/// Extract the route path from an href or a bare fragment.
///
/// `#/about?x=1` → `/about`, `page.html#/users/3` → `/users/3`,
/// `#` or an empty string → `/`. Input without `#` is taken as a path.
pub fn hash_path(href: &str) -> String {
    let fragment = match href.split_once('#') {
        Some((_, fragment)) => fragment,
        None => href,
    };
    let path = fragment.split(['?', '#']).next().unwrap_or_default();

    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Render a route path back into a fragment href.
pub fn hash_href(path: &str) -> String {
    if path.starts_with('/') {
        format!("#{}", path)
    } else {
        format!("#/{}", path)
    }
}

/// Oldest entries are dropped past this depth.
pub const MAX_HISTORY: usize = 64;

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation. Re-navigating to the current path is a no-op.
    pub fn push(&mut self, path: String) {
        if self.current() == Some(path.as_str()) {
            return;
        }
        self.entries.push(path);
        if self.entries.len() > MAX_HISTORY {
            self.entries.remove(0);
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Drop the current entry and return the one below it. The first entry
    /// is never popped.
    pub fn back(&mut self) -> Option<&str> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.current()
    }
}
