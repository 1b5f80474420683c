pub mod autoplay;
pub mod state;

pub use autoplay::{
    Autoplay,
    PlayGap,
    PlaySpeed,
};
pub use state::{
    DeckFilter,
    PracticeSession,
    StudyMode,
};
