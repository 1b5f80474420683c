use std::time::{
    Duration,
    Instant,
};

use serde::{
    Deserialize,
    Serialize,
};

use super::state::PracticeSession;
use crate::speech::SpeechBackend;

/// Playback speed presets. The factor divides the spoken-phase estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaySpeed {
    Slow,
    Normal,
    Fast,
}

impl PlaySpeed {
    pub const ALL: [PlaySpeed; 3] = [PlaySpeed::Slow, PlaySpeed::Normal, PlaySpeed::Fast];

    pub fn factor(self) -> f32 {
        match self {
            PlaySpeed::Slow => 0.75,
            PlaySpeed::Normal => 1.0,
            PlaySpeed::Fast => 1.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaySpeed::Slow => "0.75x",
            PlaySpeed::Normal => "1x",
            PlaySpeed::Fast => "1.5x",
        }
    }
}

impl Default for PlaySpeed {
    fn default() -> Self {
        PlaySpeed::Normal
    }
}

/// Pause between revealing the translation and moving to the next card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayGap {
    Short,
    Medium,
    Long,
}

impl PlayGap {
    pub const ALL: [PlayGap; 3] = [PlayGap::Short, PlayGap::Medium, PlayGap::Long];

    pub fn duration(self) -> Duration {
        match self {
            PlayGap::Short => Duration::from_millis(2000),
            PlayGap::Medium => Duration::from_millis(4000),
            PlayGap::Long => Duration::from_millis(7000),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlayGap::Short => "2s",
            PlayGap::Medium => "4s",
            PlayGap::Long => "7s",
        }
    }
}

impl Default for PlayGap {
    fn default() -> Self {
        PlayGap::Medium
    }
}

/// The speech backend offers no completion callback, so card timing runs on a
/// length-based estimate of the spoken duration.
pub fn estimate_speech_duration(text: &str) -> Duration {
    let estimate = Duration::from_millis(100) * text.chars().count() as u32;
    estimate.max(Duration::from_millis(2000))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Front shown, speech requested, waiting out the duration estimate.
    Speaking,
    /// Back shown, waiting out the gap before advancing.
    Revealing,
}

/// Timer-driven playback over the session deck. At most one deadline is armed
/// at a time; the event loop calls [`Autoplay::tick`] and repaints against
/// [`Autoplay::next_deadline`], so pause/stop simply disarm the deadline and
/// nothing can fire afterwards.
pub struct Autoplay {
    phase: Phase,
    paused: bool,
    deadline: Option<Instant>,
    pub speed: PlaySpeed,
    pub gap: PlayGap,
}

impl Default for Autoplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Autoplay {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            paused: false,
            deadline: None,
            speed: PlaySpeed::default(),
            gap: PlayGap::default(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Begins playback at the current cursor. No-op on an empty deck.
    pub fn start(
        &mut self,
        session: &mut PracticeSession,
        speech: &dyn SpeechBackend,
        now: Instant,
    ) {
        if session.is_empty() {
            return;
        }
        self.paused = false;
        self.begin_card(session, speech, now);
    }

    /// Advances the machine when the armed deadline has passed. Safe to call
    /// every frame.
    pub fn tick(
        &mut self,
        session: &mut PracticeSession,
        speech: &dyn SpeechBackend,
        now: Instant,
    ) {
        if self.paused {
            return;
        }
        let Some(deadline) = self.deadline else {
            return;
        };
        if now < deadline {
            return;
        }

        match self.phase {
            Phase::Idle => {}
            Phase::Speaking => {
                session.set_flipped(true);
                self.phase = Phase::Revealing;
                self.deadline = Some(now + self.gap.duration());
            }
            Phase::Revealing => {
                session.next();
                if session.cursor() == 0 {
                    // Wrapped: one full pass ends the run.
                    self.stop();
                } else {
                    self.begin_card(session, speech, now);
                }
            }
        }
    }

    /// Pausing disarms the deadline without losing cursor or flip; resuming
    /// restarts the current card from the front.
    pub fn toggle_pause(
        &mut self,
        session: &mut PracticeSession,
        speech: &dyn SpeechBackend,
        now: Instant,
    ) {
        if self.phase == Phase::Idle {
            return;
        }

        self.paused = !self.paused;
        if self.paused {
            self.deadline = None;
        } else {
            self.begin_card(session, speech, now);
        }
    }

    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.paused = false;
        self.deadline = None;
    }

    fn begin_card(
        &mut self,
        session: &mut PracticeSession,
        speech: &dyn SpeechBackend,
        now: Instant,
    ) {
        let Some(sentence) = session.current() else {
            self.stop();
            return;
        };
        let text = sentence.kr.clone();

        session.set_flipped(false);
        speech.speak(&text);

        self.phase = Phase::Speaking;
        self.deadline = Some(now + estimate_speech_duration(&text).div_f32(self.speed.factor()));
    }
}
