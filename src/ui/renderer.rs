//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view
//! model computation and delegation to the UI components.

use crate::app::AppState;

use super::components;

/// Renders the plugin UI to stdout.
///
/// Computes the view model from application state and delegates to the
/// component layer. Prints ANSI-styled output using `print!`; Zellij clears
/// the pane between frames.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_screen(&viewmodel, &state.theme, rows, cols);
}
