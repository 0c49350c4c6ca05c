//! conductor-dash - A terminal dashboard for Conductor project progress
//!
//! This is the main entry point for the conductor-dash application.
//! It uses the Component Architecture pattern from ratatui.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::{Cli, Config};
use crate::services::HttpAnalysisClient;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    // A dashboard without logs is still usable
    let log_path = match logging::init() {
        Ok(path) => path,
        Err(err) => {
            eprintln!("Warning: logging disabled: {:#}", err);
            None
        }
    };
    info!(
        service_url = %config.service_url,
        default_repo = ?config.default_repo_url,
        log = ?log_path,
        "starting conductor-dash"
    );

    let client = HttpAnalysisClient::new(&config.service_url)
        .context("Failed to create analysis client")?;
    debug!(endpoint = client.endpoint(), "analysis client ready");

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(config.tick_rate_ms));
    tui.enter()?;

    // Create app state
    let mut app = App::new(config, Arc::new(client));
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    // Cleanup terminal
    tui.exit()?;

    // Handle any errors
    if let Err(err) = result {
        error!(error = %err, "exiting with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("bye");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        // Draw the UI
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            draw_result = app.draw(frame, frame.area());
        })?;
        draw_result?;

        // Poll for events
        if let Some(event) = tui.next_event()? {
            // Convert event to action
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick to drain finished requests
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
