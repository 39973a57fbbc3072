//! Debug panel for tuning the parking spot at runtime.
//!
//! The panel owns the input constraint on target coordinates: edits are
//! clamped here before they reach [`ParkingState`], the controller itself
//! accepts any value. The widget frontend is built with `bevy_egui` when the
//! `render` feature is enabled; the edit model below is engine-agnostic.

use bevy::prelude::*;

use crate::constants::{PANEL_WIDTH, TARGET_MAX, TARGET_MIN, TARGET_STEP};
use crate::state::{ParkingState, TargetAxis};
use crate::viewport::PointerCapture;

#[cfg(feature = "render")]
use bevy::ecs::error::BevyError;
#[cfg(feature = "render")]
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

/// Runtime configuration for the debug panel.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct PanelSettings {
    /// Smallest value a target field accepts.
    pub min: f32,
    /// Largest value a target field accepts.
    pub max: f32,
    /// Slider increment.
    pub step: f64,
    /// Panel width in logical pixels.
    pub width: f32,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            min: TARGET_MIN,
            max: TARGET_MAX,
            step: TARGET_STEP,
            width: PANEL_WIDTH,
        }
    }
}

impl PanelSettings {
    /// Whether `min..=max` is a usable range.
    #[must_use]
    pub fn has_valid_range(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    /// Clamps `value` into the accepted range.
    ///
    /// Returns `None` for non-finite input, which the panel discards. Every
    /// edit is discarded while the configured range is unusable.
    ///
    /// # Examples
    /// ```
    /// use valet::panel::PanelSettings;
    /// let settings = PanelSettings::default();
    /// assert_eq!(settings.clamp(7.5), Some(5.0));
    /// assert_eq!(settings.clamp(f32::NAN), None);
    /// ```
    #[must_use]
    pub fn clamp(&self, value: f32) -> Option<f32> {
        (value.is_finite() && self.has_valid_range()).then(|| value.clamp(self.min, self.max))
    }
}

/// A single user edit of a target field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelEdit {
    /// Field being edited.
    pub axis: TargetAxis,
    /// Raw value entered by the user.
    pub value: f32,
}

/// Applies a panel edit to the simulation state.
///
/// Returns the value now stored on the target axis. A discarded edit leaves
/// the target unchanged and returns its current value.
pub fn apply_panel_edit(state: &mut ParkingState, settings: &PanelSettings, edit: PanelEdit) -> f32 {
    let Some(value) = settings.clamp(edit.value) else {
        return state.target().axis(edit.axis);
    };
    state.set_target_axis(edit.axis, value);
    log::debug!("panel set target {} to {value:.2}", edit.axis.label());
    value
}

/// Read-only status lines shown under the target fields.
#[must_use]
pub fn status_lines(state: &ParkingState) -> [String; 4] {
    let pose = state.actor().displayed_pose();
    let phase = match (state.actor().is_ready(), state.phase()) {
        (false, _) => "waiting for model".to_owned(),
        (true, None) => "starting".to_owned(),
        (true, Some(phase)) => phase.to_string(),
    };
    [
        format!("actor: ({:.2}, {:.2})", pose.position.x, pose.position.z),
        format!("heading: {:.0}°", pose.yaw.to_degrees()),
        format!("phase: {phase}"),
        format!("ticks: {}", state.ticks()),
    ]
}

/// Draws the panel and forwards edits to [`ParkingState`].
///
/// Also records whether the pointer is over the panel so the viewport can
/// ignore drags meant for the widgets.
#[cfg(feature = "render")]
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn panel_ui_system(
    mut contexts: EguiContexts,
    settings: Res<PanelSettings>,
    mut state: ResMut<ParkingState>,
    mut capture: ResMut<PointerCapture>,
) -> Result<(), BevyError> {
    let ctx = contexts.ctx_mut()?;
    let mut edits = Vec::new();

    egui::Window::new("Debug")
        .default_width(settings.width)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Parking spot");
            for axis in [TargetAxis::X, TargetAxis::Z] {
                let mut value = state.target().axis(axis);
                let slider = egui::Slider::new(&mut value, settings.min..=settings.max)
                    .step_by(settings.step)
                    .text(axis.label());
                if ui.add(slider).changed() {
                    edits.push(PanelEdit { axis, value });
                }
            }
            ui.separator();
            for line in status_lines(&state) {
                ui.label(line);
            }
        });

    for edit in edits {
        apply_panel_edit(&mut state, &settings, edit);
    }
    capture.over_ui = ctx.is_pointer_over_area() || ctx.wants_pointer_input();
    Ok(())
}

/// Plugin installing the debug panel.
#[derive(Debug, Default)]
pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelSettings>();
        app.init_resource::<PointerCapture>();

        #[cfg(feature = "render")]
        {
            if !app.is_plugin_added::<EguiPlugin>() {
                app.add_plugins(EguiPlugin::default());
            }
            app.add_systems(EguiPrimaryContextPass, panel_ui_system);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::inside(2.25, 2.25)]
    #[case::above(12.0, 5.0)]
    #[case::below(-9.0, -5.0)]
    #[case::upper_edge(5.0, 5.0)]
    #[case::lower_edge(-5.0, -5.0)]
    fn edits_are_clamped_to_panel_range(#[case] raw: f32, #[case] stored: f32) {
        let mut state = ParkingState::default();
        let settings = PanelSettings::default();
        let applied = apply_panel_edit(
            &mut state,
            &settings,
            PanelEdit {
                axis: TargetAxis::Z,
                value: raw,
            },
        );
        assert_relative_eq!(applied, stored);
        assert_relative_eq!(state.target().position.z, stored);
    }

    #[rstest]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn non_finite_edits_are_discarded(#[case] raw: f32) {
        let mut state = ParkingState::default();
        let before = *state.target();
        let applied = apply_panel_edit(
            &mut state,
            &PanelSettings::default(),
            PanelEdit {
                axis: TargetAxis::X,
                value: raw,
            },
        );
        assert_relative_eq!(applied, before.position.x);
        assert_eq!(*state.target(), before);
    }

    #[rstest]
    #[case::inverted(5.0, -5.0)]
    #[case::nan_bound(f32::NAN, 5.0)]
    #[case::infinite_bound(-5.0, f32::INFINITY)]
    fn unusable_range_discards_edits(#[case] min: f32, #[case] max: f32) {
        let settings = PanelSettings {
            min,
            max,
            ..PanelSettings::default()
        };
        assert!(!settings.has_valid_range());
        assert_eq!(settings.clamp(1.0), None);

        let mut state = ParkingState::default();
        let before = *state.target();
        apply_panel_edit(
            &mut state,
            &settings,
            PanelEdit {
                axis: TargetAxis::X,
                value: 1.0,
            },
        );
        assert_eq!(*state.target(), before);
    }

    #[test]
    fn status_reports_pending_model() {
        let state = ParkingState::default();
        let lines = status_lines(&state);
        assert_eq!(lines[2], "phase: waiting for model");
        assert_eq!(lines[0], "actor: (-4.00, -4.00)");
    }

    #[test]
    fn status_reports_phase_and_heading_once_driven() {
        let mut state = ParkingState::default();
        state.mark_actor_ready();
        state.tick();
        let lines = status_lines(&state);
        assert_eq!(lines[1], "heading: 90°");
        assert_eq!(lines[2], "phase: moving along X");
        assert_eq!(lines[3], "ticks: 1");
    }
}
