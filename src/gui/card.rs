use eframe::egui::{
    self,
    Sense,
    Ui,
};

use super::theme::Theme;
use crate::{
    core::Sentence,
    mastery::MasteryStatus,
    session::PracticeSession,
    speech::SpeechBackend,
};

pub enum CardAction {
    Flip,
    Speak,
}

/// One flashcard. Front shows the source text with a speak button, back the
/// translation; clicking anywhere else on the card requests a flip.
pub struct CardView<'a> {
    pub sentence: &'a Sentence,
    pub flipped: bool,
    pub show_rom: bool,
    pub show_en: bool,
    pub status: Option<MasteryStatus>,
    pub pattern_name: &'a str,
    pub theme: &'a Theme,
}

impl CardView<'_> {
    pub fn show(self, ui: &mut Ui) -> Option<CardAction> {
        let mut action = None;

        let response = egui::Frame::new()
            .fill(ui.visuals().extreme_bg_color)
            .stroke(egui::Stroke::new(1.0, self.theme.mastery_color(self.status)))
            .corner_radius(8.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_min_height(220.0);
                ui.vertical_centered(|ui| {
                    if self.flipped {
                        self.back(ui);
                    } else {
                        self.front(ui, &mut action);
                    }
                });
            })
            .response;

        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.label(self.theme.faded("click or press space to flip").size(12.0));
        });

        // The speak button sits inside the flip area; its click must not also
        // flip the card.
        if ui.interact(response.rect, ui.id().with("card"), Sense::click()).clicked()
            && action.is_none()
        {
            action = Some(CardAction::Flip);
        }

        action
    }

    fn front(&self, ui: &mut Ui, action: &mut Option<CardAction>) {
        ui.add_space(32.0);
        ui.label(egui::RichText::new(&self.sentence.kr).size(32.0).strong());

        if self.show_rom && !self.sentence.rom.is_empty() {
            ui.add_space(8.0);
            ui.label(self.theme.faded(&self.sentence.rom).size(16.0));
        }

        ui.add_space(10.0);
        if ui.button("🔊 Speak").clicked() {
            *action = Some(CardAction::Speak);
        }

        if let Some(status) = self.status {
            ui.add_space(12.0);
            let badge = match status {
                MasteryStatus::Know => "know",
                MasteryStatus::Unsure => "unsure",
                MasteryStatus::DontKnow => "don't know",
            };
            ui.label(
                egui::RichText::new(badge)
                    .size(12.0)
                    .color(self.theme.mastery_color(Some(status))),
            );
        }
    }

    fn back(&self, ui: &mut Ui) {
        ui.add_space(24.0);
        if self.show_en {
            ui.label(egui::RichText::new(&self.sentence.en).size(24.0));
        } else {
            ui.label(self.theme.faded("translation hidden"));
        }

        if self.show_rom && !self.sentence.rom.is_empty() {
            ui.add_space(6.0);
            ui.label(self.theme.faded(&self.sentence.rom).size(14.0));
        }

        if !self.sentence.vocab.is_empty() {
            ui.add_space(12.0);
            ui.horizontal_wrapped(|ui| {
                for word in &self.sentence.vocab {
                    ui.label(self.theme.accent(word).size(14.0));
                }
            });
        }

        if !self.sentence.pattern.is_empty() {
            ui.add_space(10.0);
            ui.label(self.theme.heading(self.pattern_name).size(13.0));
        }
    }
}

/// Applies a card interaction to the session. Speaking voices the current
/// sentence on demand and leaves cursor and flip untouched.
pub fn apply_card_action(
    action: CardAction,
    session: &mut PracticeSession,
    speech: &dyn SpeechBackend,
) {
    match action {
        CardAction::Flip => session.flip(),
        CardAction::Speak => {
            if let Some(sentence) = session.current() {
                speech.speak(&sentence.kr);
            }
        }
    }
}
