//! Visual style presets for image prompts

/// A named visual preset controlling how image prompts are phrased.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Style {
    /// Black-and-white Japanese comic styling.
    Manga,
    /// Colorful anime film styling.
    Anime,
    /// Classic American superhero comic styling.
    American,
    /// Belgian ligne claire styling.
    Belgian,
}

/// Every selectable style, in the order the form presents them.
pub const ALL_STYLES: [Style; 4] = [Style::Manga, Style::Anime, Style::American, Style::Belgian];

impl Style {
    /// Human-readable label, also used as the form value.
    pub fn label(self) -> &'static str {
        match self {
            Style::Manga => "Manga",
            Style::Anime => "Anime",
            Style::American => "American",
            Style::Belgian => "Belgian",
        }
    }

    /// The phrase embedded into every image-generation prompt.
    pub fn prompt_phrase(self) -> &'static str {
        match self {
            Style::Manga => "black and white manga style, screentone shading, dynamic inking",
            Style::Anime => "vibrant anime film style, cel shading, expressive characters",
            Style::American => "american comic book style, bold outlines, halftone colors",
            Style::Belgian => "belgian ligne claire style, flat colors, clean uniform lines",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized = input.trim().to_ascii_lowercase();
        ALL_STYLES
            .into_iter()
            .find(|style| style.label().to_ascii_lowercase() == normalized)
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_labels_case_insensitively() {
        assert_eq!(Style::parse("Manga"), Some(Style::Manga));
        assert_eq!(Style::parse("anime"), Some(Style::Anime));
        assert_eq!(Style::parse(" BELGIAN "), Some(Style::Belgian));
    }

    #[test]
    fn parse_rejects_unknown_styles() {
        assert_eq!(Style::parse("watercolour"), None);
        assert_eq!(Style::parse(""), None);
    }

    #[test]
    fn every_style_has_a_prompt_phrase() {
        for style in ALL_STYLES {
            assert!(!style.prompt_phrase().is_empty());
        }
    }
}
