use crate::clipboard::{ClipboardSink, CopyControl, SystemClipboard};
use crate::config::RcConfig;
use crate::document::{CodeBlock, Document, Node};
use crate::render::{render_document, RenderedDocument, Theme};
use crate::view::{DocumentViewModel, PaintParams, Screen};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::stdout;
use std::time::{Duration, Instant};

const DEFAULT_STATUS: &str = "j/k scroll | Tab next block | y copy | r cycle refs | q quit";

pub struct ViewerController {
    document: Document,
    rendered: RenderedDocument,
    screen: Screen,
    clipboard: Box<dyn ClipboardSink>,
    copy_controls: Vec<CopyControl>,
    focused_region: Option<usize>,
    highlighted_ref: Option<usize>,
    status_message: String,
    title: String,
}

impl ViewerController {
    pub fn new(document: Document, config: &RcConfig, display_name: String) -> Self {
        Self::with_clipboard(document, config, display_name, Box::new(SystemClipboard))
    }

    pub fn with_clipboard(
        document: Document,
        config: &RcConfig,
        display_name: String,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let mut theme = Theme::default();
        config.apply_overrides(&mut theme);

        let mut screen = Screen::new(theme);
        screen.set_line_numbers(config.show_line_numbers);
        screen.set_tab_stop(config.tab_stop);

        let rendered = render_document(&document);
        let copy_controls = (0..rendered.code_regions.len())
            .map(|_| CopyControl::new())
            .collect();
        let focused_region = (!rendered.code_regions.is_empty()).then_some(0);
        let title = format!(
            "\"{display_name}\" | {} code block(s) | {} reference(s)",
            rendered.code_regions.len(),
            rendered.reference_ids().len()
        );

        Self {
            document,
            rendered,
            screen,
            clipboard,
            copy_controls,
            focused_region,
            highlighted_ref: None,
            status_message: String::new(),
            title,
        }
    }

    pub fn run(mut self) -> Result<(), Box<dyn std::error::Error>> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, cursor::Hide)?;

        let result = self.run_loop();

        execute!(stdout(), cursor::Show, LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            let now = Instant::now();
            for control in &mut self.copy_controls {
                control.tick(now);
            }

            self.paint()?;

            // Short poll so copy indicators reset even without input
            if event::poll(Duration::from_millis(100))? {
                match event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key(key_event) {
                            break;
                        }
                    }
                    Event::Resize(_, _) => self.screen.force_redraw(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn paint(&mut self) -> std::io::Result<()> {
        let icons: Vec<char> = self.copy_controls.iter().map(CopyControl::icon).collect();
        let highlighted = self
            .highlighted_ref
            .and_then(|index| self.rendered.reference_ids().get(index).copied());

        let view_model = DocumentViewModel::new(&self.rendered);
        let params = PaintParams {
            title: Some(&self.title),
            status_message: if self.status_message.is_empty() {
                DEFAULT_STATUS
            } else {
                &self.status_message
            },
            focused_region: self.focused_region,
            region_icons: &icons,
            highlighted_ref: highlighted,
        };
        self.screen.paint(&view_model, &params)
    }

    /// Returns true when the viewer should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('j') | KeyCode::Down => self.scroll(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => {
                self.scroll(self.screen.visible_rows() as isize)
            }
            KeyCode::PageUp => self.scroll(-(self.screen.visible_rows() as isize)),
            KeyCode::Char('g') | KeyCode::Home => {
                let count = self.rendered.line_count();
                self.screen.scroll_to(0, count);
            }
            KeyCode::Char('G') | KeyCode::End => {
                let count = self.rendered.line_count();
                self.screen.scroll_to(count, count);
            }
            KeyCode::Tab => self.focus_block(1),
            KeyCode::BackTab => self.focus_block(-1),
            KeyCode::Char('y') | KeyCode::Enter => self.copy_focused_block(),
            KeyCode::Char('r') => self.cycle_reference(),
            _ => {}
        }
        false
    }

    fn scroll(&mut self, delta: isize) {
        let count = self.rendered.line_count();
        self.screen.scroll_by(delta, count);
    }

    fn focus_block(&mut self, step: isize) {
        let count = self.rendered.code_regions.len();
        if count == 0 {
            self.status_message = "No code blocks in this document".to_string();
            return;
        }

        let next = match self.focused_region {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None if step >= 0 => 0,
            None => count - 1,
        };
        self.focused_region = Some(next);

        // Bring the whole block on screen when it fits, its first line otherwise
        let region = &self.rendered.code_regions[next];
        let (first_line, last_line) = (region.first_line, region.last_line());
        let line_count = self.rendered.line_count();
        self.screen.ensure_visible(last_line, line_count);
        self.screen.ensure_visible(first_line, line_count);
    }

    /// Copy the focused code block. The text is re-extracted from the
    /// document tree at activation time, not taken from the rendered lines.
    fn copy_focused_block(&mut self) {
        let Some(index) = self.focused_region else {
            self.status_message = "No code block selected".to_string();
            return;
        };

        let path = self.rendered.code_regions[index].path.clone();
        let document = &self.document;
        let sink = self.clipboard.as_ref();
        self.copy_controls[index].activate(Instant::now(), sink, || {
            block_text_at(document, &path)
        });
    }

    fn cycle_reference(&mut self) {
        let ids = self.rendered.reference_ids();
        if ids.is_empty() {
            self.status_message = "No node references in this document".to_string();
            return;
        }

        let next = match self.highlighted_ref {
            Some(index) => (index + 1) % ids.len(),
            None => 0,
        };
        let id = ids[next].to_string();
        self.highlighted_ref = Some(next);

        if let Some(hit) = self.rendered.find_reference(&id) {
            let line_count = self.rendered.line_count();
            self.screen.ensure_visible(hit.line, line_count);
        }
        self.status_message = format!("Workflow node {id}");
    }
}

/// Plain text of the code block element at the given document path. Anything
/// other than a code block yields the empty string.
fn block_text_at(document: &Document, path: &[usize]) -> String {
    match document.node_at_path(path) {
        Some(Node::Element(element)) => CodeBlock::from_element(element)
            .map(|block| block.plain_text())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
