//! Terminal shell around the pure core: reads input, runs effects, renders results.
mod app;
mod effects;
mod render;

pub use app::{run_once, run_session, App, ShellEvent};
pub use effects::EffectRunner;
