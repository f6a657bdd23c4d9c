// Locale support — Spanish first, English second
//
// Only the strings that seed the quick-message store live here; the CLI
// speaks English for its own output.

const SUGGESTIONS_ES: &[&str] = &[
    "¡Hola! ¿Cómo estás?",
    "Hola, me interesa más información, por favor.",
    "¡Buenos días! ¿Tienes un momento para hablar?",
    "Gracias por tu tiempo, ¡saludos!",
    "Hola, ¿sigue disponible?",
];

const SUGGESTIONS_EN: &[&str] = &[
    "Hi! How are you?",
    "Hello, I'd like some more information, please.",
    "Good morning! Do you have a moment to talk?",
    "Thanks for your time, best regards!",
    "Hi, is this still available?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    /// Default quick-message texts for this language.
    pub fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Lang::Es => SUGGESTIONS_ES,
            Lang::En => SUGGESTIONS_EN,
        }
    }

    /// Pick a language from the process environment (`LC_ALL` over `LANG`).
    /// Anything that isn't English gets Spanish.
    pub fn detect() -> Lang {
        let env_lang = std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_default()
            .to_lowercase();
        if env_lang.starts_with("en") {
            Lang::En
        } else {
            Lang::Es
        }
    }
}

impl std::str::FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" => Ok(Lang::Es),
            "en" => Ok(Lang::En),
            other => Err(format!("unknown language: {other} (expected 'es' or 'en')")),
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_sets_align() {
        assert_eq!(SUGGESTIONS_ES.len(), SUGGESTIONS_EN.len());
        assert_eq!(Lang::Es.suggestions().len(), 5);
    }

    #[test]
    fn test_parse() {
        assert_eq!("ES".parse::<Lang>().unwrap(), Lang::Es);
        assert_eq!("en".parse::<Lang>().unwrap(), Lang::En);
        assert!("fr".parse::<Lang>().is_err());
    }
}
