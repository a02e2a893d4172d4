use std::fmt;

use clap::ValueEnum;

/// Output language for summaries. English is the model's native output and
/// is never sent to the translator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    #[value(alias = "en")]
    English,
    #[value(alias = "ur")]
    Urdu,
    #[value(alias = "ar")]
    Arabic,
}

impl Language {
    /// ISO 639-1 code passed to the translation service.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
            Language::Arabic => "ar",
        }
    }

    pub fn needs_translation(self) -> bool {
        self != Language::English
    }

    /// Case-insensitive lookup by name or code, as typed in the command loop.
    pub fn parse(s: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(s.trim(), true).ok()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::English => "English",
            Language::Urdu => "Urdu",
            Language::Arabic => "Arabic",
        })
    }
}
