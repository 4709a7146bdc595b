use crate::app::view::{self, View};
use crate::config::AppConfig;
use crate::router::{hash_href, RouteError, Router};
use crate::store::Store;
use chrono::Local;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    System,
    Error,
    View,
}

#[derive(Debug, Clone)]
pub struct Line {
    pub timestamp: String,
    pub text: String,
    pub kind: LineKind,
}

impl Line {
    pub fn render(&self) -> String {
        match self.kind {
            LineKind::System => format!("[{}] *** {}", self.timestamp, self.text),
            LineKind::Error => format!("[{}] !!! {}", self.timestamp, self.text),
            LineKind::View => format!("[{}] {}", self.timestamp, self.text),
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub router: Router<View>,
    pub view: Option<Arc<View>>,
    /// Route path the current view was reached at.
    pub view_path: String,
    /// Lines produced since the last flush to stdout.
    pub transcript: Vec<Line>,
    pub should_quit: bool,
    pub timestamp_format: String,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, RouteError> {
        let store = Store::from_config(&config.store);
        let router = Router::with_routes(view::default_routes())?;
        let timestamp_format = config.ui.timestamp_format.clone();
        Ok(Self {
            config,
            store,
            router,
            view: None,
            view_path: "/".to_string(),
            transcript: Vec::new(),
            should_quit: false,
            timestamp_format,
        })
    }

    fn push_line(&mut self, kind: LineKind, text: String) {
        self.transcript.push(Line {
            timestamp: Local::now().format(&self.timestamp_format).to_string(),
            text,
            kind,
        });
    }

    pub fn system_line(&mut self, text: String) {
        self.push_line(LineKind::System, text);
    }

    pub fn error_line(&mut self, text: String) {
        self.push_line(LineKind::Error, text);
    }

    /// Show `view` at route `path` and render it against the current store.
    pub fn show(&mut self, view: Arc<View>, path: &str) {
        let text = format!(
            "[{} {}] {}",
            view.title(),
            hash_href(path),
            view.describe(&self.store)
        );
        self.view = Some(view);
        self.view_path = path.to_string();
        self.push_line(LineKind::View, text);
    }

    /// Re-render the current view if it reads store values.
    pub fn refresh(&mut self) {
        if let Some(view) = self.view.clone() {
            if *view == View::Home {
                let path = self.view_path.clone();
                self.show(view, &path);
            }
        }
    }

    pub fn take_transcript(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_store_config() {
        let mut config = AppConfig::default();
        config.store.initial_count = 4;
        let state = AppState::new(config).unwrap();
        assert_eq!(state.store.state().count, 4);
        assert_eq!(state.router.len(), 2);
        assert!(state.view.is_none());
    }

    #[test]
    fn test_line_render() {
        let line = Line {
            timestamp: "12:00:00".into(),
            text: "hello".into(),
            kind: LineKind::Error,
        };
        assert_eq!(line.render(), "[12:00:00] !!! hello");
    }

    #[test]
    fn test_refresh_only_redraws_home() {
        let mut state = AppState::new(AppConfig::default()).unwrap();
        state.show(Arc::new(View::About), "/about");
        state.take_transcript();
        state.refresh();
        assert!(state.transcript.is_empty());

        state.show(Arc::new(View::Home), "/");
        state.take_transcript();
        state.refresh();
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].text, "[Home #/] count: 0  double: 0");
        assert_eq!(state.view_path, "/");
    }
}
