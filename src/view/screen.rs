use super::view_model::ViewModel;
use crate::render::{Theme, NODE_ID_ATTR};
use crossterm::{
    cursor, execute,
    style::{Color, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{size, Clear, ClearType},
};
use std::io::{self, stdout, Write};
use unicode_width::UnicodeWidthChar;

#[derive(Clone)]
pub struct PaintParams<'a> {
    pub title: Option<&'a str>,
    pub status_message: &'a str,
    /// Index of the focused code region, if any.
    pub focused_region: Option<usize>,
    /// Copy-control icon per code region, parallel to the region list.
    pub region_icons: &'a [char],
    /// Workflow-node id whose chip is currently emphasized.
    pub highlighted_ref: Option<&'a str>,
}

pub struct Screen {
    last_lines: Vec<String>,
    last_title: Option<String>,
    last_status: String,
    last_terminal_size: (u16, u16),
    scroll_offset: usize,
    needs_full_redraw: bool,
    paint_count: usize,
    show_line_numbers: bool,
    tab_stop: usize,
    theme: Theme,
}

impl Screen {
    pub fn new(theme: Theme) -> Self {
        Self {
            last_lines: Vec::new(),
            last_title: None,
            last_status: String::new(),
            last_terminal_size: (0, 0),
            scroll_offset: 0,
            needs_full_redraw: true,
            paint_count: 0,
            show_line_numbers: false,
            tab_stop: 4,
            theme,
        }
    }

    pub fn set_line_numbers(&mut self, show: bool) {
        if self.show_line_numbers != show {
            self.show_line_numbers = show;
            self.needs_full_redraw = true;
        }
    }

    pub fn set_tab_stop(&mut self, tab_stop: usize) {
        if self.tab_stop != tab_stop {
            self.tab_stop = tab_stop;
            self.needs_full_redraw = true;
        }
    }

    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn scroll_by(&mut self, delta: isize, line_count: usize) {
        let target = self.scroll_offset.saturating_add_signed(delta);
        self.scroll_to(target, line_count);
    }

    pub fn scroll_to(&mut self, line: usize, line_count: usize) {
        let max_offset = line_count.saturating_sub(self.visible_rows());
        let clamped = line.min(max_offset);
        if clamped != self.scroll_offset {
            self.scroll_offset = clamped;
            self.needs_full_redraw = true;
        }
    }

    /// Scroll the minimum amount needed to bring a line on screen.
    pub fn ensure_visible(&mut self, line: usize, line_count: usize) {
        let rows = self.visible_rows();
        if line < self.scroll_offset {
            self.scroll_to(line, line_count);
        } else if rows > 0 && line >= self.scroll_offset + rows {
            self.scroll_to(line + 1 - rows, line_count);
        }
    }

    pub fn visible_rows(&self) -> usize {
        let (_, height) = size().unwrap_or((80, 24));
        // One row for the title, one for the status line
        (height as usize).saturating_sub(2)
    }

    fn clear_screen(&self) -> io::Result<()> {
        execute!(stdout(), Clear(ClearType::All))
    }

    fn move_cursor(&self, line: usize, column: usize) -> io::Result<()> {
        execute!(stdout(), cursor::MoveTo(column as u16, line as u16))
    }

    pub fn paint(&mut self, view_model: &dyn ViewModel, params: &PaintParams<'_>) -> io::Result<()> {
        let (width, height) = size()?;
        let start_line = usize::from(params.title.is_some());

        self.paint_count += 1;

        // Force full redraw every 50 paints to prevent state drift
        if self.paint_count % 50 == 0 {
            self.needs_full_redraw = true;
        }

        let current_size = (width, height);
        if self.last_terminal_size != current_size {
            self.needs_full_redraw = true;
            self.last_terminal_size = current_size;
        }

        if self.needs_full_redraw {
            self.clear_screen()?;
            self.needs_full_redraw = false;
            self.last_lines.clear();
            self.last_title = None;
            self.last_status.clear();
        }

        // Title row
        if self.last_title.as_deref() != params.title {
            self.move_cursor(0, 0)?;
            execute!(stdout(), Clear(ClearType::CurrentLine))?;
            if let Some(title) = params.title {
                let clipped = clip_to_cells(title, width as usize, self.tab_stop);
                print!("{clipped}");
            }
            self.last_title = params.title.map(str::to_string);
        }

        let max_lines = (height as usize).saturating_sub(1 + start_line);

        let visible_lines: Vec<String> = (0..max_lines)
            .map(|i| self.compose_row(view_model, self.scroll_offset + i, width as usize, params))
            .collect();

        if self.last_lines != visible_lines {
            for (i, line) in visible_lines.iter().enumerate() {
                if i >= self.last_lines.len() || self.last_lines[i] != *line {
                    self.move_cursor(i + start_line, 0)?;
                    execute!(stdout(), Clear(ClearType::CurrentLine))?;
                    print!("{line}");
                }
            }
            self.last_lines = visible_lines;
        }

        // Status line
        if self.last_status != params.status_message {
            self.move_cursor((height as usize).saturating_sub(1), 0)?;
            execute!(stdout(), Clear(ClearType::CurrentLine))?;
            let clipped = clip_to_cells(params.status_message, width as usize, self.tab_stop);
            print!("{clipped}");
            self.last_status = params.status_message.to_string();
        }

        stdout().flush()?;
        Ok(())
    }

    /// Compose one terminal row: gutter for code regions, styled spans,
    /// clipped to the terminal width.
    fn compose_row(
        &self,
        view_model: &dyn ViewModel,
        doc_line: usize,
        width: usize,
        params: &PaintParams<'_>,
    ) -> String {
        let Some(line) = view_model.line(doc_line) else {
            return String::new();
        };

        let mut out = String::new();
        let mut used = 0usize;

        let region = view_model
            .code_regions()
            .iter()
            .enumerate()
            .find(|(_, region)| region.contains_line(doc_line));

        if let Some((region_index, region)) = region {
            let icon = if doc_line == region.first_line {
                params
                    .region_icons
                    .get(region_index)
                    .copied()
                    .unwrap_or(' ')
            } else {
                ' '
            };
            let gutter_color = if params.focused_region == Some(region_index) {
                Color::Cyan
            } else {
                Color::DarkGrey
            };
            out.push_str(&format!("{}{icon} {}", SetForegroundColor(gutter_color), ResetColor));
            used += 2;

            if self.show_line_numbers {
                let local = doc_line - region.first_line + 1;
                out.push_str(&format!(
                    "{}{local:>3} {}",
                    SetForegroundColor(Color::DarkGrey),
                    ResetColor
                ));
                used += 4;
            }
        }

        for span in &line.spans {
            if used >= width {
                break;
            }

            let highlighted = params.highlighted_ref.is_some()
                && span.attr(NODE_ID_ATTR) == params.highlighted_ref;

            let text = clip_to_cells(&span.text, width - used, self.tab_stop);
            if text.is_empty() {
                continue;
            }
            used += display_cells(&text);

            if highlighted {
                out.push_str(&format!(
                    "{}{}{text}{}",
                    SetBackgroundColor(Color::Yellow),
                    SetForegroundColor(Color::Black),
                    ResetColor
                ));
            } else if let Some(color) = span.class.as_deref().and_then(|c| self.theme.color_for(c)) {
                out.push_str(&format!("{}{text}{}", SetForegroundColor(color), ResetColor));
            } else {
                out.push_str(&text);
            }
        }

        out
    }
}

/// Take the longest prefix fitting the given cell budget, expanding tabs.
fn clip_to_cells(text: &str, cells: usize, tab_stop: usize) -> String {
    let mut out = String::new();
    let mut used = 0usize;

    for ch in text.chars() {
        let (rendered, w) = if ch == '\t' {
            (" ".repeat(tab_stop), tab_stop)
        } else {
            (ch.to_string(), ch.width().unwrap_or(0))
        };
        if used + w > cells {
            break;
        }
        out.push_str(&rendered);
        used += w;
    }
    out
}

fn display_cells(text: &str) -> usize {
    text.chars().map(|ch| ch.width().unwrap_or(0)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{CodeRegion, RenderedDocument, RenderedLine, RenderedSpan};
    use crate::view::DocumentViewModel;

    fn doc_with_block() -> RenderedDocument {
        let mut doc = RenderedDocument::default();
        let mut prose = RenderedLine::default();
        prose.push(RenderedSpan::raw("intro"));
        doc.lines.push(prose);

        for text in ["fn main() {", "}"] {
            let mut line = RenderedLine::default();
            line.push(RenderedSpan::raw(text));
            doc.lines.push(line);
        }
        doc.code_regions.push(CodeRegion {
            first_line: 1,
            line_count: 2,
            path: vec![1],
            language: None,
        });
        doc
    }

    fn params<'a>(icons: &'a [char]) -> PaintParams<'a> {
        PaintParams {
            title: None,
            status_message: "",
            focused_region: Some(0),
            region_icons: icons,
            highlighted_ref: None,
        }
    }

    #[test]
    fn test_clip_to_cells_expands_tabs_and_respects_width() {
        assert_eq!(clip_to_cells("a\tb", 10, 4), "a    b");
        assert_eq!(clip_to_cells("hello", 3, 4), "hel");
        // A wide char that does not fit is dropped entirely
        assert_eq!(clip_to_cells("a\u{4e2d}", 2, 4), "a");
    }

    #[test]
    fn test_compose_row_prefixes_code_region_with_icon_gutter() {
        let rendered = doc_with_block();
        let screen = Screen::new(Theme::default());
        let view_model = DocumentViewModel::new(&rendered);
        let icons = ['\u{29c9}'];

        let first = screen.compose_row(&view_model, 1, 80, &params(&icons));
        assert!(first.contains('\u{29c9}'));
        assert!(first.contains("fn main() {"));

        // Following lines of the region get a blank gutter, not the icon
        let second = screen.compose_row(&view_model, 2, 80, &params(&icons));
        assert!(!second.contains('\u{29c9}'));
        assert!(second.contains("}"));
    }

    #[test]
    fn test_compose_row_line_numbers_are_per_block() {
        let rendered = doc_with_block();
        let mut screen = Screen::new(Theme::default());
        screen.show_line_numbers = true;
        let view_model = DocumentViewModel::new(&rendered);
        let icons = ['\u{29c9}'];

        let row = screen.compose_row(&view_model, 2, 80, &params(&icons));
        assert!(row.contains("  2 "));
    }

    #[test]
    fn test_compose_row_out_of_range_is_blank() {
        let rendered = doc_with_block();
        let screen = Screen::new(Theme::default());
        let view_model = DocumentViewModel::new(&rendered);
        assert_eq!(screen.compose_row(&view_model, 99, 80, &params(&[])), "");
    }

    #[test]
    fn test_compose_row_highlights_reference_chip() {
        let mut rendered = RenderedDocument::default();
        let mut line = RenderedLine::default();
        line.push(RenderedSpan::raw("go to "));
        line.push(
            RenderedSpan::classed("\u{2b22} Fetch", "reference").with_attr(NODE_ID_ATTR, "n-42"),
        );
        rendered.lines.push(line);

        let screen = Screen::new(Theme::default());
        let view_model = DocumentViewModel::new(&rendered);
        let mut p = params(&[]);
        p.focused_region = None;
        p.highlighted_ref = Some("n-42");

        let row = screen.compose_row(&view_model, 0, 80, &p);
        let highlight = format!("{}", SetBackgroundColor(Color::Yellow));
        assert!(row.contains(&highlight));
    }
}
