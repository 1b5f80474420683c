use std::{
    path::PathBuf,
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use eframe::egui::{
    self,
    FontData,
    FontDefinitions,
    FontFamily,
};

use super::{
    card::{
        apply_card_action,
        CardView,
    },
    filter_panel::filter_panel,
    playback_bar::{
        playback_bar,
        PlaybackAction,
    },
    settings::SettingsData,
    theme::{
        set_theme,
        Theme,
    },
};
use crate::{
    core::Dataset,
    mastery::{
        count_statuses,
        MasteryStatus,
        MasteryStore,
        MasteryTracker,
    },
    persistence::{
        load_json_or_default,
        save_json,
    },
    session::{
        Autoplay,
        PracticeSession,
        StudyMode,
    },
    speech::{
        detect_backend,
        SpeechBackend,
    },
};

const SETTINGS_FILE: &str = "settings.json";
const DEFAULT_DATASET: &str = "data/sentences.json";

/// How long a graded card stays on screen before the deck advances.
const RESPONSE_FEEDBACK: Duration = Duration::from_millis(400);

/// Fonts with decent hangul coverage, probed in order at startup.
const KOREAN_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

struct LoadedData {
    dataset: Dataset,
    session: PracticeSession,
}

pub struct SejongApp {
    data: Option<LoadedData>,
    placeholder: String,
    mastery: MasteryStore,
    speech: Box<dyn SpeechBackend>,
    autoplay: Autoplay,
    settings_data: SettingsData,
    theme: Theme,
    feedback_until: Option<Instant>,
}

impl SejongApp {
    pub fn new(cc: &eframe::CreationContext<'_>, dataset_path: Option<PathBuf>) -> Self {
        let mut settings_data: SettingsData = load_json_or_default(SETTINGS_FILE);

        let path = dataset_path
            .or_else(|| settings_data.dataset_path.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));

        let (data, placeholder) = match Dataset::load(&path) {
            Ok(dataset) => {
                println!("Loaded {} sentences from {}", dataset.len(), path.display());
                settings_data.dataset_path = Some(path.display().to_string());
                let session = PracticeSession::new(&dataset);
                (Some(LoadedData { dataset, session }), String::new())
            }
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                (None, "No sentence data found".to_string())
            }
        };

        let mut autoplay = Autoplay::new();
        autoplay.speed = settings_data.speed;
        autoplay.gap = settings_data.gap;

        let theme = Theme::default();
        set_theme(&cc.egui_ctx, &theme);
        setup_fonts(&cc.egui_ctx);

        Self {
            data,
            placeholder,
            mastery: MasteryStore::load_or_default(),
            speech: detect_backend(),
            autoplay,
            settings_data,
            theme,
            feedback_until: None,
        }
    }

    fn drive_timers(&mut self, ctx: &egui::Context, now: Instant) {
        if let Some(data) = &mut self.data {
            self.autoplay.tick(&mut data.session, self.speech.as_ref(), now);
        }

        if let Some(until) = self.feedback_until {
            if now >= until {
                self.feedback_until = None;
                if let Some(data) = &mut self.data {
                    data.session.next();
                }
            }
        }

        let wakeups = [self.autoplay.next_deadline(), self.feedback_until];
        if let Some(&deadline) = wakeups.iter().flatten().min() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context, now: Instant) {
        if self.data.is_none() || ctx.wants_keyboard_input() {
            return;
        }

        let (left, right, flip, play, stop, know, unsure, dont_know) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::P),
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Num1),
                i.key_pressed(egui::Key::Num2),
                i.key_pressed(egui::Key::Num3),
            )
        });

        if let Some(data) = &mut self.data {
            if left {
                data.session.prev();
            }
            if right {
                data.session.next();
            }
            if flip {
                data.session.flip();
            }
            if play {
                if self.autoplay.is_playing() {
                    self.autoplay.toggle_pause(&mut data.session, self.speech.as_ref(), now);
                } else {
                    self.autoplay.start(&mut data.session, self.speech.as_ref(), now);
                }
            }
            if stop {
                self.autoplay.stop();
            }
        }

        if know {
            self.handle_response(MasteryStatus::Know, now);
        }
        if unsure {
            self.handle_response(MasteryStatus::Unsure, now);
        }
        if dont_know {
            self.handle_response(MasteryStatus::DontKnow, now);
        }
    }

    fn handle_response(&mut self, status: MasteryStatus, now: Instant) {
        // Previous response is still settling.
        if self.feedback_until.is_some() {
            return;
        }

        if let Some(data) = &mut self.data {
            if data.session.record_response(status, &mut self.mastery) {
                self.feedback_until = Some(now + RESPONSE_FEEDBACK);
            }
        }
    }

    fn open_dataset(&mut self) {
        let Some(path) = rfd::FileDialog::new().add_filter("JSON", &["json"]).pick_file() else {
            return;
        };

        match Dataset::load(&path) {
            Ok(dataset) => {
                println!("Loaded {} sentences from {}", dataset.len(), path.display());
                self.autoplay.stop();
                self.feedback_until = None;
                let session = PracticeSession::new(&dataset);
                self.data = Some(LoadedData { dataset, session });
                self.placeholder.clear();
                self.settings_data.dataset_path = Some(path.display().to_string());
                self.save_settings();
            }
            Err(e) => {
                // Keep whatever was already loaded.
                eprintln!("Failed to open {}: {}", path.display(), e);
            }
        }
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings_data, SETTINGS_FILE) {
            eprintln!("Failed to save settings: {}", e);
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label(self.theme.heading("Sejong").size(18.0).strong());
                ui.separator();

                let mode = self.data.as_ref().map(|data| data.session.mode());
                for (label, target) in [
                    ("Chapters", StudyMode::Chapter),
                    ("Patterns", StudyMode::Pattern),
                    ("Random", StudyMode::Random),
                ] {
                    if ui.selectable_label(mode == Some(target), label).clicked() {
                        if let Some(data) = &mut self.data {
                            data.session.set_mode(target, &data.dataset);
                        }
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Open dataset…").clicked() {
                        self.open_dataset();
                    }

                    let mut changed = false;
                    changed |= ui.checkbox(&mut self.settings_data.show_en, "EN").changed();
                    changed |= ui.checkbox(&mut self.settings_data.show_rom, "Rom").changed();
                    if changed {
                        self.save_settings();
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn side_panel(&mut self, ctx: &egui::Context) {
        let Some(data) = &mut self.data else {
            return;
        };
        if data.session.mode() == StudyMode::Random {
            return;
        }

        egui::SidePanel::left("filters").default_width(230.0).show(ctx, |ui| {
            ui.add_space(6.0);
            egui::ScrollArea::vertical().show(ui, |ui| {
                let clicked = filter_panel(
                    ui,
                    &data.dataset,
                    data.session.mode(),
                    data.session.filter(),
                    &self.theme,
                );
                if let Some(filter) = clicked {
                    data.session.filter_by(filter, &data.dataset, &self.mastery);
                }
            });
        });
    }

    fn bottom_panel(&mut self, ctx: &egui::Context, now: Instant) {
        let mut response = None;
        let mut playback = None;
        let mut presets_changed = false;

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            let Some(data) = &mut self.data else {
                ui.add_space(4.0);
                ui.label(self.theme.faded("0 / 0"));
                ui.add_space(4.0);
                return;
            };

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                let has_cards = !data.session.is_empty();

                if ui.add_enabled(has_cards, egui::Button::new("⏴ Prev")).clicked() {
                    data.session.prev();
                }
                if ui.add_enabled(has_cards, egui::Button::new("Next ⏵")).clicked() {
                    data.session.next();
                }

                let progress = if has_cards {
                    format!("{} / {}", data.session.cursor() + 1, data.session.len())
                } else {
                    "0 / 0".to_string()
                };
                ui.label(self.theme.accent(&progress));

                ui.separator();

                let can_grade = has_cards && self.feedback_until.is_none();
                if ui.add_enabled(can_grade, egui::Button::new("Know (1)")).clicked() {
                    response = Some(MasteryStatus::Know);
                }
                if ui.add_enabled(can_grade, egui::Button::new("Unsure (2)")).clicked() {
                    response = Some(MasteryStatus::Unsure);
                }
                if ui.add_enabled(can_grade, egui::Button::new("Don't know (3)")).clicked() {
                    response = Some(MasteryStatus::DontKnow);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let counts = count_statuses(data.session.deck(), &self.mastery);
                    ui.label(
                        egui::RichText::new(format!("✗ {}", counts.dont_know))
                            .color(self.theme.mastery_color(Some(MasteryStatus::DontKnow))),
                    );
                    ui.label(
                        egui::RichText::new(format!("? {}", counts.unsure))
                            .color(self.theme.mastery_color(Some(MasteryStatus::Unsure))),
                    );
                    ui.label(
                        egui::RichText::new(format!("✓ {}", counts.know))
                            .color(self.theme.mastery_color(Some(MasteryStatus::Know))),
                    );
                });
            });

            ui.add_space(2.0);
            let bar = playback_bar(ui, &mut self.autoplay, &data.session, &self.theme);
            playback = bar.action;
            presets_changed = bar.presets_changed;
            ui.add_space(6.0);
        });

        if let Some(status) = response {
            self.handle_response(status, now);
        }

        if let Some(action) = playback {
            if let Some(data) = &mut self.data {
                match action {
                    PlaybackAction::Play => {
                        self.autoplay.start(&mut data.session, self.speech.as_ref(), now);
                    }
                    PlaybackAction::TogglePause => {
                        self.autoplay.toggle_pause(&mut data.session, self.speech.as_ref(), now);
                    }
                    PlaybackAction::Stop => self.autoplay.stop(),
                }
            }
        }

        if presets_changed {
            self.settings_data.speed = self.autoplay.speed;
            self.settings_data.gap = self.autoplay.gap;
            self.save_settings();
        }
    }

    fn central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(data) = &mut self.data else {
                ui.centered_and_justified(|ui| {
                    ui.label(self.theme.faded(&self.placeholder).size(18.0));
                });
                return;
            };

            let Some(sentence) = data.session.current() else {
                ui.centered_and_justified(|ui| {
                    ui.label(self.theme.faded("No sentences available").size(18.0));
                });
                return;
            };

            let status = self.mastery.status(&sentence.kr);
            let pattern_name = data.dataset.pattern_name(&sentence.pattern);

            ui.add_space(24.0);
            let action = CardView {
                sentence,
                flipped: data.session.is_flipped(),
                show_rom: self.settings_data.show_rom,
                show_en: self.settings_data.show_en,
                status,
                pattern_name,
                theme: &self.theme,
            }
            .show(ui);

            if let Some(action) = action {
                apply_card_action(action, &mut data.session, self.speech.as_ref());
            }
        });
    }
}

impl eframe::App for SejongApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.drive_timers(ctx, now);
        self.handle_keys(ctx, now);

        self.top_bar(ctx);
        self.side_panel(ctx);
        self.bottom_panel(ctx, now);
        self.central_panel(ctx);
    }
}

fn setup_fonts(ctx: &egui::Context) {
    for path in KOREAN_FONT_CANDIDATES {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };

        let mut fonts = FontDefinitions::default();
        fonts
            .font_data
            .insert("korean".to_owned(), Arc::new(FontData::from_owned(bytes)));
        for family in [FontFamily::Proportional, FontFamily::Monospace] {
            fonts.families.entry(family).or_default().push("korean".to_owned());
        }
        ctx.set_fonts(fonts);
        return;
    }

    eprintln!("No hangul-capable font found, text may render as boxes");
}
