//! Immediate-mode UI helpers for the Macroquad rendering backend.
//!
//! This module hosts all uses of `macroquad::ui` so the rest of the adapter
//! can remain agnostic of Macroquad's UI types. The control panel mirrors the
//! keyboard shortcuts: every lifecycle action stays reachable with the mouse
//! alone.

use grid_snake_core::RunPhase;
use macroquad::{
    color::{Color, WHITE},
    math::{vec2, RectOffset},
    ui::{hash, Ui},
};

/// Outcome of rendering the control panel UI during the current frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ControlPanelUiResult {
    /// Whether the start button was pressed during this frame.
    pub start_pressed: bool,
    /// Whether the pause button was pressed during this frame.
    pub pause_pressed: bool,
    /// Whether the restart button was pressed during this frame.
    pub restart_pressed: bool,
}

/// Snapshot of the control panel's UI layout and data for the current frame.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ControlPanelUiContext {
    /// Left edge of the panel in screen coordinates.
    pub x: f32,
    /// Top edge of the panel in screen coordinates.
    pub y: f32,
    /// Panel width in screen space.
    pub width: f32,
    /// Panel height in screen space.
    pub height: f32,
    /// Background colour applied to the window skin so the panel blends into
    /// the cleared frame.
    pub background: Color,
    /// Current lifecycle phase, displayed as a status label.
    pub phase: RunPhase,
}

/// Renders the control panel's interactive elements for the current frame.
pub(crate) fn draw_control_panel_ui(
    ui: &mut Ui,
    context: ControlPanelUiContext,
) -> ControlPanelUiResult {
    let mut skin = ui.default_skin();

    let window_style = ui
        .style_builder()
        .color(context.background)
        .color_hovered(context.background)
        .color_clicked(context.background)
        .text_color(WHITE)
        .margin(RectOffset::new(8.0, 8.0, 8.0, 8.0))
        .build();
    skin.window_style = window_style;

    let button_style = ui
        .style_builder()
        .text_color(WHITE)
        .text_color_hovered(WHITE)
        .text_color_clicked(WHITE)
        .color(Color::from_rgba(70, 70, 70, 255))
        .color_hovered(Color::from_rgba(96, 96, 96, 255))
        .color_clicked(Color::from_rgba(56, 56, 56, 255))
        .margin(RectOffset::new(6.0, 6.0, 4.0, 4.0))
        .build();
    skin.button_style = button_style;

    ui.push_skin(&skin);

    let mut result = ControlPanelUiResult::default();
    let _ = ui.window(
        hash!("control_panel"),
        vec2(context.x, context.y),
        vec2(context.width, context.height),
        |ui| {
            let phase_label = match context.phase {
                RunPhase::Idle => "Ready",
                RunPhase::Running => "Running",
                RunPhase::Paused => "Paused",
                RunPhase::GameOver => "Game over",
            };
            ui.label(None, phase_label);
            ui.same_line(0.0);

            result.start_pressed = ui.button(None, "Start");
            ui.same_line(0.0);
            result.pause_pressed = ui.button(None, "Pause");
            ui.same_line(0.0);
            result.restart_pressed = ui.button(None, "Restart");
        },
    );

    ui.pop_skin();

    result
}
