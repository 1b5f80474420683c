use eframe::egui::{
    self,
    Color32,
    RichText,
    Stroke,
    Visuals,
};
use egui::{
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
};

use crate::mastery::MasteryStatus;

#[derive(Clone)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub selection: Color32,
    pub comment: Color32,
    pub red: Color32,
    pub orange: Color32,
    pub yellow: Color32,
    pub green: Color32,
    pub purple: Color32,
    pub cyan: Color32,
    pub background_darker: Color32,
    pub background_dark: Color32,
    pub background_light: Color32,
    pub background_lighter: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            orange: Color32::from_rgb(0xff, 0xb8, 0x6c),
            yellow: Color32::from_rgb(0xf1, 0xfa, 0x8c),
            green: Color32::from_rgb(0x50, 0xfa, 0x7b),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
            background_darker: Color32::from_rgb(25, 26, 33),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
            background_lighter: Color32::from_rgb(66, 69, 80),
        }
    }

    pub fn heading(&self, content: &str) -> RichText {
        RichText::new(content).color(self.purple)
    }

    pub fn accent(&self, content: &str) -> RichText {
        RichText::new(content).color(self.orange)
    }

    pub fn faded(&self, content: &str) -> RichText {
        RichText::new(content).color(self.comment)
    }

    /// Badge and stat color for a mastery status; unrated gets the muted
    /// comment color.
    pub fn mastery_color(&self, status: Option<MasteryStatus>) -> Color32 {
        match status {
            Some(MasteryStatus::Know) => self.green,
            Some(MasteryStatus::Unsure) => self.yellow,
            Some(MasteryStatus::DontKnow) => self.red,
            None => self.comment,
        }
    }
}

fn widget(
    base: WidgetVisuals,
    bg_fill: Color32,
    weak_bg_fill: Color32,
    bg_stroke: Color32,
    fg_stroke: Color32,
) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill,
        weak_bg_fill,
        bg_stroke: Stroke { color: bg_stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: fg_stroke, ..base.fg_stroke },
        ..base
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    let default = Visuals::dark();

    ctx.set_visuals(Visuals {
        dark_mode: true,
        widgets: Widgets {
            noninteractive: widget(
                default.widgets.noninteractive,
                theme.background,
                theme.background_lighter,
                theme.background_dark,
                theme.foreground,
            ),
            inactive: widget(
                default.widgets.inactive,
                theme.background_light,
                theme.background_lighter,
                theme.background_dark,
                theme.foreground,
            ),
            hovered: widget(
                default.widgets.hovered,
                theme.selection,
                theme.background_lighter,
                theme.cyan,
                theme.foreground,
            ),
            active: widget(
                default.widgets.active,
                theme.selection,
                theme.background_light,
                theme.cyan,
                theme.foreground,
            ),
            open: widget(
                default.widgets.open,
                theme.background_dark,
                theme.background_lighter,
                theme.purple,
                theme.foreground,
            ),
        },
        selection: Selection {
            bg_fill: theme.selection,
            stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
        },
        hyperlink_color: theme.cyan,
        faint_bg_color: theme.background_darker,
        extreme_bg_color: theme.background_darker,
        code_bg_color: theme.background_dark,
        error_fg_color: theme.red,
        warn_fg_color: theme.orange,
        window_shadow: Shadow { color: theme.background_darker, ..default.window_shadow },
        window_fill: theme.background,
        window_stroke: Stroke { color: theme.background_light, ..default.window_stroke },
        panel_fill: theme.background_dark,
        ..default
    });
}
