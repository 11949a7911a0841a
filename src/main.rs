// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Markdown Express - Main Entry Point
//!
//! A live Markdown editor with a synchronized preview. Built with Rust and egui.

mod app;
mod config;
mod editor;
mod error;
mod export;
mod files;
mod i18n;
mod markdown;
mod preview;
mod state;
mod theme;

use app::MarkdownExpressApp;
use config::{FileStore, WindowSize};
use log::info;
use state::AppState;

/// Application name constant.
const APP_NAME: &str = "Markdown Express";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let state = AppState::load(Box::new(FileStore::open_default()));
    let window_size = state.window_size();

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([WindowSize::MIN_WIDTH, WindowSize::MIN_HEIGHT])
        .with_maximized(window_size.maximized);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(MarkdownExpressApp::new(cc, state)))),
    )
}
