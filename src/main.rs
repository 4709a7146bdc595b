use anyhow::{Context, Result};
use spa_core::app::event::AppEvent;
use spa_core::app::handler;
use spa_core::app::state::AppState;
use spa_core::{config, logging};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cfg = config::load_config()?;
    logging::init(&cfg.logging)?;

    let result = run_app(cfg).await;
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app(cfg: config::AppConfig) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let mut state = AppState::new(cfg).context("Failed to build route table")?;
    tracing::info!(
        routes = state.router.len(),
        action_delay_ms = state.store.action_delay().as_millis() as u64,
        "console started"
    );

    // Spawn stdin reader task
    let input_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if input_tx.send(AppEvent::Input(line)).is_err() {
                        break;
                    }
                }
                Ok(None) | Err(_) => {
                    let _ = input_tx.send(AppEvent::InputClosed);
                    break;
                }
            }
        }
    });

    state.system_line("Type /help for commands.".to_string());
    handler::navigate(&mut state, "#/");
    flush(&mut state)?;

    // Main event loop
    loop {
        let event = tokio::select! {
            event = event_rx.recv() => match event {
                Some(event) => event,
                None => break,
            },
            Some(mutation) = state.store.next_commit() => AppEvent::Committed(mutation),
        };

        handler::handle_event(&mut state, event);
        flush(&mut state)?;

        if state.should_quit {
            break;
        }
    }

    let pending = state.store.pending_actions();
    if pending > 0 {
        tracing::info!(pending, "exiting with actions still scheduled");
    }
    Ok(())
}

fn flush(state: &mut AppState) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in state.take_transcript() {
        writeln!(stdout, "{}", line.render())?;
    }
    stdout.flush()?;
    Ok(())
}
