use crossterm::style::Color;
use std::collections::BTreeMap;

/// Maps styling classes to terminal colors at paint time.
///
/// Classes stay opaque strings everywhere upstream; this is the single place
/// they are interpreted. Unmapped classes paint with the default color.
#[derive(Debug, Clone)]
pub struct Theme {
    colors: BTreeMap<String, Color>,
}

impl Default for Theme {
    fn default() -> Self {
        let mut colors = BTreeMap::new();
        colors.insert("keyword".to_string(), Color::Yellow);
        colors.insert("string".to_string(), Color::Green);
        colors.insert("number".to_string(), Color::Magenta);
        colors.insert("comment".to_string(), Color::DarkGrey);
        colors.insert("reference".to_string(), Color::Cyan);
        Self { colors }
    }
}

impl Theme {
    pub fn color_for(&self, class: &str) -> Option<Color> {
        self.colors.get(class).copied()
    }

    pub fn set(&mut self, class: &str, color: Color) {
        self.colors.insert(class.to_string(), color);
    }

    /// Apply an override from a config line. Returns false when the color
    /// name is unknown (the line is skipped).
    pub fn set_named(&mut self, class: &str, color_name: &str) -> bool {
        match parse_color(color_name) {
            Some(color) => {
                self.set(class, color);
                true
            }
            None => false,
        }
    }
}

/// Parse a user-facing color name.
pub fn parse_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "darkgrey" | "darkgray" => Color::DarkGrey,
        "darkred" => Color::DarkRed,
        "darkgreen" => Color::DarkGreen,
        "darkyellow" => Color::DarkYellow,
        "darkblue" => Color::DarkBlue,
        "darkmagenta" => Color::DarkMagenta,
        "darkcyan" => Color::DarkCyan,
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_maps_core_classes() {
        let theme = Theme::default();
        assert_eq!(theme.color_for("keyword"), Some(Color::Yellow));
        assert_eq!(theme.color_for("reference"), Some(Color::Cyan));
        assert_eq!(theme.color_for("no-such-class"), None);
    }

    #[test]
    fn test_named_override() {
        let mut theme = Theme::default();
        assert!(theme.set_named("keyword", "blue"));
        assert_eq!(theme.color_for("keyword"), Some(Color::Blue));

        assert!(!theme.set_named("keyword", "chartreuse"));
        assert_eq!(theme.color_for("keyword"), Some(Color::Blue));
    }

    #[test]
    fn test_parse_color_is_case_insensitive() {
        assert_eq!(parse_color("CYAN"), Some(Color::Cyan));
        assert_eq!(parse_color("DarkGrey"), Some(Color::DarkGrey));
        assert_eq!(parse_color("gray"), Some(Color::Grey));
        assert_eq!(parse_color(""), None);
    }
}
