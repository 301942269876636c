use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::info;
use waypost_core::PageSession;
use waypost_core::nav::NavKey;
use waypost_protocol::{NavCommand, SectionId, ThemeMode, ThemeToken};

use crate::config::PreviewConfig;
use crate::page::SimulatedPage;

const FRAME: Duration = Duration::from_millis(16);

fn token_to_color(token: ThemeToken, theme: ThemeMode) -> Color {
    match (token, theme) {
        (ThemeToken::NavBackgroundDark, _) => Color::Rgb(40, 40, 48),
        (ThemeToken::NavBackgroundLight, _) => Color::Rgb(225, 225, 232),
        (ThemeToken::NavBorder, _) => Color::DarkGray,
        (ThemeToken::LinkIdle, ThemeMode::Dark) => Color::White,
        (ThemeToken::LinkIdle, ThemeMode::Light) => Color::Black,
        (ThemeToken::LinkActive | ThemeToken::ActiveUnderline, _) => Color::Cyan,
        (ThemeToken::MenuButton, _) => Color::Yellow,
        (ThemeToken::MenuOverlay, _) => Color::Rgb(20, 20, 28),
        (ThemeToken::MenuText, _) => Color::Gray,
    }
}

const BAND_COLORS: [Color; 4] = [Color::Blue, Color::Magenta, Color::Green, Color::Red];

/// Interactive state that only exists in the terminal: which link has
/// keyboard focus.
struct Preview {
    session: PageSession,
    page: SimulatedPage,
    focus: usize,
    row_px: f64,
}

impl Preview {
    fn new(session: PageSession, config: &PreviewConfig) -> Self {
        let page = SimulatedPage::lay_out(session.tracker().rendered_sections(), config);
        Self {
            session,
            page,
            focus: 0,
            row_px: config.px_per_row.max(1.0),
        }
    }

    /// One frame of page time: resize to the terminal, step the animation
    /// and sample the tracker, whether or not input arrived.
    fn advance(&mut self, content_rows: u16, dt_ms: f64) {
        self.page
            .set_viewport_height(f64::from(content_rows) * self.row_px);
        self.page.tick(dt_ms);
        self.scroll_signal();
    }

    fn link_targets(&self) -> Vec<SectionId> {
        self.session
            .tracker()
            .rendered_sections()
            .iter()
            .map(|s| s.id.clone())
            .collect()
    }

    fn focused_target(&self) -> Option<SectionId> {
        self.link_targets().get(self.focus).cloned()
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.link_targets().len();
        if count == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    fn scroll_signal(&mut self) {
        if self
            .session
            .on_scroll(&self.page.viewport(), self.page.bounds())
        {
            info!(
                active = self.session.active_section().map_or("<none>", SectionId::as_str),
                scroll_y = self.page.scroll_y(),
                "active section changed"
            );
        }
    }

    fn activate(&mut self, key: NavKey) {
        if let Some(target) = self.focused_target() {
            self.session.handle_key(&mut self.page, key, &target);
        }
    }

    fn jump(&mut self, index: usize) {
        if let Some(target) = self.link_targets().get(index).cloned() {
            self.focus = index;
            self.session.follow_link(&mut self.page, &target);
        }
    }
}

pub fn run_preview(session: PageSession, config: &PreviewConfig) -> Result<()> {
    let mut preview = Preview::new(session, config);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut preview);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    preview: &mut Preview,
) -> Result<()> {
    let started = Instant::now();
    let mut splash_skipped = false;
    let mut last_tick = Instant::now();

    loop {
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        if !splash_skipped && !preview.session.loader_phase(elapsed_ms).content_visible() {
            terminal.draw(draw_splash)?;
            if event::poll(FRAME)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    break;
                }
                splash_skipped = true;
            }
            continue;
        }

        let term_size = terminal.size()?;
        let content_rows = term_size.height.saturating_sub(4);
        let dt = last_tick.elapsed();
        last_tick = Instant::now();
        preview.advance(content_rows, dt.as_secs_f64() * 1000.0);

        terminal.draw(|frame| draw(frame, preview))?;

        if !event::poll(FRAME)? {
            continue;
        }
        let step = preview.row_px;
        let page_step = f64::from(content_rows) * preview.row_px;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Up | KeyCode::Char('k') => preview.page.scroll_by(-step),
                KeyCode::Down | KeyCode::Char('j') => preview.page.scroll_by(step),
                KeyCode::PageUp => preview.page.scroll_by(-page_step),
                KeyCode::PageDown => preview.page.scroll_by(page_step),
                KeyCode::Home => preview.page.scroll_by(-preview.page.scroll_y()),
                KeyCode::Tab | KeyCode::Right => preview.move_focus(true),
                KeyCode::BackTab | KeyCode::Left => preview.move_focus(false),
                KeyCode::Enter => preview.activate(NavKey::Enter),
                KeyCode::Char(' ') => preview.activate(NavKey::Space),
                KeyCode::Char('t') => {
                    preview.session.toggle_theme();
                }
                KeyCode::Char('m') => {
                    if preview.session.is_menu_open() {
                        preview.session.close_menu();
                    } else {
                        preview.session.open_menu();
                    }
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    preview.jump(index);
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => preview.page.scroll_by(step * 3.0),
                MouseEventKind::ScrollUp => preview.page.scroll_by(-step * 3.0),
                _ => {}
            },
            _ => {}
        }
        preview.scroll_signal();
    }

    Ok(())
}

fn draw_splash(frame: &mut Frame) {
    let area = frame.area();
    let mid = Rect::new(0, area.height / 2, area.width, 1);
    frame.render_widget(
        Paragraph::new("waypost: loading (press any key to skip)")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray)),
        mid,
    );
}

fn draw(frame: &mut Frame, preview: &Preview) {
    let area = frame.area();
    let theme = preview.session.theme();
    let commands = preview.session.nav_commands();

    // Nav bar
    let nav_area = Rect::new(0, 0, area.width, 1);
    let underline_area = Rect::new(0, 1, area.width, 1);
    let (nav, underline) = nav_lines(&commands, theme, preview.focused_target().as_ref());
    frame.render_widget(nav, nav_area);
    frame.render_widget(Paragraph::new(underline), underline_area);

    // Page content
    let content_area = Rect::new(0, 2, area.width, area.height.saturating_sub(3));
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(token_to_color(ThemeToken::NavBorder, theme)));
    let inner = block.inner(content_area);
    frame.render_widget(block, content_area);

    let mut lines = Vec::with_capacity(usize::from(inner.height));
    for row in 0..inner.height {
        let y = preview.page.scroll_y() + f64::from(row) * preview.row_px;
        let line = match preview.page.section_at(y, preview.row_px) {
            Some((id, label, first_row)) => {
                let order = preview
                    .session
                    .tracker()
                    .sections()
                    .get(id)
                    .map_or(0, |s| s.order);
                let color = BAND_COLORS[order % BAND_COLORS.len()];
                let text = if first_row {
                    format!("── {label} ({}) ", id.anchor())
                } else {
                    "│".to_string()
                };
                Line::from(Span::styled(text, Style::default().fg(color)))
            }
            None => Line::from(Span::styled(
                "footer",
                Style::default().fg(Color::DarkGray),
            )),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines), inner);

    // Status line
    let status_area = Rect::new(0, area.height.saturating_sub(1), area.width, 1);
    let active = preview
        .session
        .active_section()
        .map_or("<none>", SectionId::as_str);
    let status = format!(
        " y={:.0} | active: {active} | {:?} | ↑↓ scroll | Tab focus | Enter/Space go | 1-9 jump | t theme | m menu | q quit ",
        preview.page.scroll_y(),
        preview.session.layout(),
    );
    frame.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::White).bg(Color::DarkGray)),
        status_area,
    );
}

/// Turn nav commands into the bar line and the underline line beneath it.
fn nav_lines<'a>(
    commands: &'a [NavCommand],
    theme: ThemeMode,
    focused: Option<&SectionId>,
) -> (Paragraph<'a>, Line<'a>) {
    let mut bar_style = Style::default();
    let mut spans: Vec<Span<'a>> = Vec::new();
    let mut under: Vec<Span<'a>> = Vec::new();
    let mut in_menu = false;

    for cmd in commands {
        match cmd {
            NavCommand::Bar { background, .. } => {
                bar_style = bar_style.bg(token_to_color(*background, theme));
            }
            NavCommand::Link {
                target,
                label,
                active,
                color,
            } => {
                let mut style = Style::default().fg(token_to_color(*color, theme));
                if *active {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if focused == Some(target) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let text = if in_menu {
                    format!(" [{label}] ")
                } else {
                    format!("  {label}  ")
                };
                let width = text.chars().count();
                spans.push(Span::styled(text, style));
                under.push(Span::raw(" ".repeat(width)));
            }
            NavCommand::Underline { color, .. } => {
                // Replace the padding under the link just pushed.
                if let Some(last) = under.last_mut() {
                    let width = last.content.chars().count();
                    *last = Span::styled(
                        format!("  {}  ", "━".repeat(width.saturating_sub(4))),
                        Style::default().fg(token_to_color(*color, theme)),
                    );
                }
            }
            NavCommand::MenuButton { color } => {
                spans.push(Span::styled(
                    " ☰ menu ",
                    Style::default().fg(token_to_color(*color, theme)),
                ));
            }
            NavCommand::BeginMenu { .. } => {
                in_menu = true;
                spans.push(Span::raw(" │"));
            }
            NavCommand::EndMenu => {
                in_menu = false;
            }
        }
    }

    (Paragraph::new(Line::from(spans)).style(bar_style), Line::from(under))
}
