use crate::render::Theme;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct RcConfig {
    pub show_line_numbers: bool,
    pub tab_stop: usize,
    pub highlight_overrides: Vec<(String, String)>,
}

impl Default for RcConfig {
    fn default() -> Self {
        Self {
            show_line_numbers: false,
            tab_stop: 4,
            highlight_overrides: Vec::new(),
        }
    }
}

impl RcConfig {
    /// Apply `highlight CLASS=COLOR` overrides. Unknown color names are
    /// skipped.
    pub fn apply_overrides(&self, theme: &mut Theme) {
        for (class, color) in &self.highlight_overrides {
            theme.set_named(class, color);
        }
    }
}

pub struct RcLoader;

impl RcLoader {
    /// Get the path to the RC file
    /// Looks for .flowdocrc in:
    /// 1. Current directory
    /// 2. Home directory (~/.flowdocrc)
    pub fn get_rc_path() -> Option<PathBuf> {
        let current_rc = Path::new(".flowdocrc");
        if current_rc.exists() {
            return Some(current_rc.to_path_buf());
        }

        if let Ok(home) = env::var("HOME") {
            let home_rc = Path::new(&home).join(".flowdocrc");
            if home_rc.exists() {
                return Some(home_rc);
            }
        }

        None
    }

    /// Load and parse the RC file
    pub fn load_config() -> RcConfig {
        let mut config = RcConfig::default();

        if let Some(rc_path) = Self::get_rc_path() {
            if let Ok(content) = fs::read_to_string(&rc_path) {
                Self::parse_config_content(&content, &mut config);
            }
            // Silently fall back to defaults if the file is unreadable
        }

        config
    }

    fn parse_config_content(content: &str, config: &mut RcConfig) {
        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') || line.starts_with('"') {
                continue;
            }

            Self::parse_config_line(line, config);
        }
    }

    fn parse_config_line(line: &str, config: &mut RcConfig) {
        // Remove inline comments
        let line = if let Some(pos) = line.find('#') {
            &line[..pos]
        } else {
            line
        }
        .trim();

        if let Some(stripped) = line.strip_prefix("set ") {
            let setting = stripped.trim();

            if setting == "nu" || setting == "number" {
                config.show_line_numbers = true;
            } else if setting == "nonu" || setting == "nonumber" {
                config.show_line_numbers = false;
            } else if let Some(value) = setting.strip_prefix("tabstop=") {
                if let Ok(tab_stop) = value.parse::<usize>() {
                    if tab_stop > 0 && tab_stop <= 16 {
                        config.tab_stop = tab_stop;
                    }
                }
            }
        } else if let Some(stripped) = line.strip_prefix("highlight ") {
            if let Some((class, color)) = stripped.trim().split_once('=') {
                let class = class.trim();
                let color = color.trim();
                if !class.is_empty() && !color.is_empty() {
                    config
                        .highlight_overrides
                        .push((class.to_string(), color.to_string()));
                }
            }
        }
        // Unrecognized lines are ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    fn parse(content: &str) -> RcConfig {
        let mut config = RcConfig::default();
        RcLoader::parse_config_content(content, &mut config);
        config
    }

    #[test]
    fn test_set_lines() {
        let config = parse("set nu\nset tabstop=8\n");
        assert!(config.show_line_numbers);
        assert_eq!(config.tab_stop, 8);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let config = parse("# a comment\n\" vim style\n\nset number  # trailing\n");
        assert!(config.show_line_numbers);
    }

    #[test]
    fn test_tabstop_out_of_range_is_ignored() {
        let config = parse("set tabstop=0\nset tabstop=99\n");
        assert_eq!(config.tab_stop, 4);
    }

    #[test]
    fn test_highlight_overrides_apply_to_theme() {
        let config = parse("highlight keyword=blue\nhighlight string=nosuchcolor\n");
        assert_eq!(config.highlight_overrides.len(), 2);

        let mut theme = Theme::default();
        config.apply_overrides(&mut theme);
        assert_eq!(theme.color_for("keyword"), Some(Color::Blue));
        // Bad color name left the default alone
        assert_eq!(theme.color_for("string"), Some(Color::Green));
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let config = parse("highlight nothing\nset\nnonsense line\n");
        assert!(!config.show_line_numbers);
        assert!(config.highlight_overrides.is_empty());
    }
}
