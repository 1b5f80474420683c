use std::process::{
    Command,
    Stdio,
};

/// Fire-and-forget text-to-speech. There is no completion signal; callers
/// that need timing estimate it from the text instead.
pub trait SpeechBackend {
    fn speak(&self, text: &str);
}

/// Backend that says nothing. Used when no engine is found and in tests.
pub struct NullSpeech;

impl SpeechBackend for NullSpeech {
    fn speak(&self, _text: &str) {}
}

/// Spawns the platform speech engine and does not wait for it to finish.
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
}

impl CommandSpeech {
    #[cfg(target_os = "macos")]
    pub fn detect() -> Option<Self> {
        Some(Self { program: "say".to_string(), args: Vec::new() })
    }

    #[cfg(target_os = "windows")]
    pub fn detect() -> Option<Self> {
        Some(Self {
            program: "PowerShell".to_string(),
            args: vec!["-NoProfile".to_string(), "-Command".to_string()],
        })
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    pub fn detect() -> Option<Self> {
        ["espeak-ng", "espeak"].into_iter().find(|program| is_available(program)).map(|program| {
            Self { program: program.to_string(), args: vec!["-v".to_string(), "ko".to_string()] }
        })
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
fn is_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

impl SpeechBackend for CommandSpeech {
    fn speak(&self, text: &str) {
        let mut command = Command::new(&self.program);
        command.args(&self.args);

        #[cfg(target_os = "windows")]
        command.arg(format!(
            "Add-Type -AssemblyName System.Speech; \
             (New-Object System.Speech.Synthesis.SpeechSynthesizer).Speak('{}')",
            text.replace('\'', "''")
        ));

        #[cfg(not(target_os = "windows"))]
        command.arg(text);

        if let Err(e) = command.stdout(Stdio::null()).stderr(Stdio::null()).spawn() {
            eprintln!("Failed to start speech engine {}: {}", self.program, e);
        }
    }
}

/// Best-effort platform backend, falling back to silence.
pub fn detect_backend() -> Box<dyn SpeechBackend> {
    match CommandSpeech::detect() {
        Some(speech) => Box::new(speech),
        None => {
            eprintln!("No speech engine found, text-to-speech disabled.");
            Box::new(NullSpeech)
        }
    }
}
