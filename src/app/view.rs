//! Views the console can show and the route table that maps to them.

use crate::router::RouteEntry;
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    About,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::About => "About",
        }
    }

    pub fn describe(self, store: &Store) -> String {
        match self {
            View::Home => format!("count: {}  double: {}", store.state().count, store.double()),
            View::About => "A counter with synchronous commits and delayed actions.".to_string(),
        }
    }
}

/// Home is held eagerly; About is built on first navigation.
pub fn default_routes() -> Vec<RouteEntry<View>> {
    vec![
        RouteEntry::eager("/", "Home", View::Home),
        RouteEntry::lazy("/about", "About", || View::About),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Router;
    use crate::store::Mutation;

    #[test]
    fn test_default_routes() {
        let router = Router::with_routes(default_routes()).unwrap();
        assert_eq!(router.is_loaded("About"), Some(false));
        assert_eq!(*router.resolve("/").unwrap(), View::Home);
        assert_eq!(router.is_loaded("About"), Some(false));
        assert_eq!(*router.resolve("/about").unwrap(), View::About);
        assert_eq!(router.is_loaded("About"), Some(true));
    }

    #[test]
    fn test_home_reads_getters() {
        let mut store = Store::default();
        store.commit(Mutation::Increment);
        assert_eq!(View::Home.describe(&store), "count: 1  double: 2");
    }
}
