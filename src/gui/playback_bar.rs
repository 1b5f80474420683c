use eframe::egui::{
    self,
    Ui,
};

use super::theme::Theme;
use crate::session::{
    Autoplay,
    PlayGap,
    PlaySpeed,
    PracticeSession,
};

pub enum PlaybackAction {
    Play,
    TogglePause,
    Stop,
}

pub struct PlaybackBarState {
    pub action: Option<PlaybackAction>,
    pub presets_changed: bool,
}

/// Autoplay transport plus the speed and gap presets. Preset edits apply to
/// the next armed deadline, so they are written straight into the controller.
pub fn playback_bar(
    ui: &mut Ui,
    autoplay: &mut Autoplay,
    session: &PracticeSession,
    theme: &Theme,
) -> PlaybackBarState {
    let mut state = PlaybackBarState { action: None, presets_changed: false };

    ui.horizontal(|ui| {
        if autoplay.is_playing() {
            let pause_label = if autoplay.is_paused() { "⏵ Resume" } else { "⏸ Pause" };
            if ui.button(pause_label).clicked() {
                state.action = Some(PlaybackAction::TogglePause);
            }
            if ui.button("⏹ Stop").clicked() {
                state.action = Some(PlaybackAction::Stop);
            }

            let status = if autoplay.is_paused() {
                format!("Paused at {} of {}", session.cursor() + 1, session.len())
            } else {
                format!("Playing {} of {}…", session.cursor() + 1, session.len())
            };
            ui.label(theme.accent(&status));
        } else if ui.add_enabled(!session.is_empty(), egui::Button::new("⏵ Play")).clicked() {
            state.action = Some(PlaybackAction::Play);
        }

        ui.separator();

        ui.label(theme.faded("speed"));
        for speed in PlaySpeed::ALL {
            if ui.selectable_label(autoplay.speed == speed, speed.label()).clicked()
                && autoplay.speed != speed
            {
                autoplay.speed = speed;
                state.presets_changed = true;
            }
        }

        ui.separator();

        ui.label(theme.faded("gap"));
        for gap in PlayGap::ALL {
            if ui.selectable_label(autoplay.gap == gap, gap.label()).clicked()
                && autoplay.gap != gap
            {
                autoplay.gap = gap;
                state.presets_changed = true;
            }
        }
    });

    state
}
