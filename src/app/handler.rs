use crate::app::command::{self, ParsedCommand};
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::router::{hash_path, RouteError};

pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Input(line) => handle_input(state, &line),
        AppEvent::InputClosed => {
            state.should_quit = true;
        }
        AppEvent::Committed(mutation) => {
            state.system_line(format!(
                "action committed {}: count is now {}",
                mutation,
                state.store.state().count
            ));
            state.refresh();
        }
    }
}

fn handle_input(state: &mut AppState, line: &str) {
    if line.trim().is_empty() {
        return;
    }

    let Some(cmd) = command::parse_command(line) else {
        state.error_line(format!("Unknown command: {} (try /help)", line.trim()));
        return;
    };

    match cmd {
        ParsedCommand::Commit { name } => match state.store.commit_named(&name) {
            Ok(mutation) => {
                state.system_line(format!(
                    "committed {}: count is now {}",
                    mutation,
                    state.store.state().count
                ));
                state.refresh();
            }
            Err(e) => state.error_line(e.to_string()),
        },
        ParsedCommand::Dispatch { name } => match state.store.dispatch_named(&name) {
            Ok(handle) => {
                let delay = state.store.action_delay().as_millis();
                state.system_line(format!("dispatched {} (commits in {} ms)", handle.action(), delay));
            }
            Err(e) => state.error_line(e.to_string()),
        },
        ParsedCommand::Go { href } => navigate(state, &href),
        ParsedCommand::Back => match state.router.back() {
            Some(Ok(matched)) => state.show(matched.component, &matched.path),
            Some(Err(e)) => state.error_line(e.to_string()),
            None => state.error_line("No earlier view".to_string()),
        },
        ParsedCommand::State => {
            let snapshot = state.store.state();
            let text = format!(
                "count: {}  double: {}  commits: {}  pending actions: {}",
                snapshot.count,
                state.store.double(),
                state.store.commits(),
                state.store.pending_actions()
            );
            state.system_line(text);
        }
        ParsedCommand::Help => {
            for line in command::HELP {
                state.system_line(line.to_string());
            }
        }
        ParsedCommand::Quit => {
            state.should_quit = true;
        }
    }
}

/// Navigate to `href`. An unknown path shows the configured fallback view,
/// if any, at the requested path and without adding it to history.
pub fn navigate(state: &mut AppState, href: &str) {
    match state.router.navigate(href) {
        Ok(matched) => state.show(matched.component, &matched.path),
        Err(e @ RouteError::NotFound(_)) => {
            state.error_line(e.to_string());
            let Some(fallback) = state.config.router.not_found_fallback.clone() else {
                return;
            };
            match state.router.resolve_name(&fallback) {
                Ok(view) => state.show(view, &hash_path(href)),
                Err(e) => state.error_line(format!("Fallback view unavailable: {}", e)),
            }
        }
        Err(e) => state.error_line(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::LineKind;
    use crate::app::view::View;
    use crate::config::AppConfig;
    use crate::store::Mutation;

    fn app() -> AppState {
        AppState::new(AppConfig::default()).unwrap()
    }

    fn input(state: &mut AppState, line: &str) {
        handle_event(state, AppEvent::Input(line.to_string()));
    }

    #[test]
    fn test_commit_and_state() {
        let mut state = app();
        input(&mut state, "/commit increment");
        input(&mut state, "/c increment");
        assert_eq!(state.store.state().count, 2);

        state.take_transcript();
        input(&mut state, "/state");
        assert_eq!(
            state.transcript[0].text,
            "count: 2  double: 4  commits: 2  pending actions: 0"
        );
    }

    #[test]
    fn test_unknown_mutation_is_reported() {
        let mut state = app();
        input(&mut state, "/commit nonexistent");
        assert_eq!(state.store.state().count, 0);
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].kind, LineKind::Error);
        assert_eq!(state.transcript[0].text, "unknown transition: nonexistent");
    }

    #[test]
    fn test_unknown_command() {
        let mut state = app();
        input(&mut state, "hello");
        input(&mut state, "   ");
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.transcript[0].kind, LineKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_then_committed_event() {
        let mut state = app();
        navigate(&mut state, "#/");
        input(&mut state, "/dispatch increment");
        assert_eq!(state.store.state().count, 0);
        assert_eq!(state.store.pending_actions(), 1);

        let mutation = state.store.next_commit().await.unwrap();
        state.take_transcript();
        handle_event(&mut state, AppEvent::Committed(mutation));
        assert_eq!(state.store.state().count, 1);
        assert_eq!(state.transcript[0].text, "action committed increment: count is now 1");
        assert_eq!(state.transcript[1].text, "[Home #/] count: 1  double: 2");
    }

    #[test]
    fn test_navigation_and_back() {
        let mut state = app();
        navigate(&mut state, "#/");
        input(&mut state, "/go #/about?ref=menu");
        assert_eq!(state.view.as_deref(), Some(&View::About));
        assert!(state.transcript.last().unwrap().text.starts_with("[About #/about] "));
        input(&mut state, "/back");
        assert_eq!(state.view.as_deref(), Some(&View::Home));

        state.take_transcript();
        input(&mut state, "/back");
        assert_eq!(state.transcript[0].text, "No earlier view");
    }

    #[test]
    fn test_not_found_without_fallback_keeps_view() {
        let mut state = app();
        navigate(&mut state, "#/about");
        navigate(&mut state, "#/missing");
        assert_eq!(state.view.as_deref(), Some(&View::About));
        assert_eq!(state.transcript.last().unwrap().text, "no route matches /missing");
    }

    #[test]
    fn test_not_found_with_fallback() {
        let mut config = AppConfig::default();
        config.router.not_found_fallback = Some("Home".into());
        let mut state = AppState::new(config).unwrap();
        navigate(&mut state, "#/about");
        navigate(&mut state, "#/missing");
        assert_eq!(state.view.as_deref(), Some(&View::Home));
        assert_eq!(state.view_path, "/missing");
        assert!(state.transcript.last().unwrap().text.starts_with("[Home #/missing] "));
        assert_eq!(state.router.current().unwrap().name, "About");
    }

    #[test]
    fn test_committed_mutation_on_about_does_not_redraw() {
        let mut state = app();
        navigate(&mut state, "#/about");
        state.store.commit(Mutation::Increment);
        state.take_transcript();
        handle_event(&mut state, AppEvent::Committed(Mutation::Increment));
        assert_eq!(state.transcript.len(), 1);
    }

    #[test]
    fn test_quit_and_eof() {
        let mut state = app();
        input(&mut state, "/quit");
        assert!(state.should_quit);

        let mut state = app();
        handle_event(&mut state, AppEvent::InputClosed);
        assert!(state.should_quit);
    }
}
