use eframe::egui::Ui;

use super::theme::Theme;
use crate::{
    core::Dataset,
    session::{
        DeckFilter,
        StudyMode,
    },
};

/// Chapter or pattern picker, depending on the study mode. Returns the filter
/// the user clicked, if any.
pub fn filter_panel(
    ui: &mut Ui,
    dataset: &Dataset,
    mode: StudyMode,
    active: Option<&DeckFilter>,
    theme: &Theme,
) -> Option<DeckFilter> {
    match mode {
        StudyMode::Chapter => chapter_list(ui, dataset, active, theme),
        StudyMode::Pattern => pattern_list(ui, dataset, active, theme),
        StudyMode::Random => None,
    }
}

fn chapter_list(
    ui: &mut Ui,
    dataset: &Dataset,
    active: Option<&DeckFilter>,
    theme: &Theme,
) -> Option<DeckFilter> {
    ui.label(theme.heading("Chapters"));
    ui.add_space(4.0);

    let mut clicked = None;
    for (id, chapter) in dataset.chapters() {
        let selected = active == Some(&DeckFilter::Chapter(*id));
        let label = format!("Ch.{}: {} ({})", id, chapter.title, chapter.sentences.len());
        if ui.selectable_label(selected, label).clicked() {
            clicked = Some(DeckFilter::Chapter(*id));
        }
    }
    clicked
}

fn pattern_list(
    ui: &mut Ui,
    dataset: &Dataset,
    active: Option<&DeckFilter>,
    theme: &Theme,
) -> Option<DeckFilter> {
    ui.label(theme.heading("Patterns"));
    ui.add_space(4.0);

    let mut clicked = None;
    for id in dataset.pattern_ids() {
        let count = dataset.pattern_group(id).map(|group| group.len()).unwrap_or(0);
        let selected = matches!(active, Some(DeckFilter::Pattern(p)) if p == id);
        let label = format!("{} ({})", dataset.pattern_name(id), count);
        if ui.selectable_label(selected, label).clicked() {
            clicked = Some(DeckFilter::Pattern(id.clone()));
        }
    }
    clicked
}
