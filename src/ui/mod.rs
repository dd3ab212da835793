use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Popup};
use crate::engine::Key;
use crate::keypad;

/// Height of the bordered display box (expression line + display line).
const DISPLAY_HEIGHT: u16 = 4;

/// Smallest terminal that fits the display box and the button grid.
const MIN_WIDTH: u16 = 21;
const MIN_HEIGHT: u16 = 19;

/// Below this the footer hints are dropped rather than truncated away.
const FOOTER_MIN_WIDTH: u16 = 40;

/// The screen chunks. The mouse path uses the same split as `draw` so
/// clicks land on the buttons being rendered.
pub struct ScreenLayout {
    pub display: Rect,
    pub keypad: Rect,
    pub footer: Rect,
}

pub fn screen_layout(area: Rect, show_footer: bool) -> ScreenLayout {
    // The footer line is the first thing to go when space gets tight.
    let footer = u16::from(
        show_footer && area.width >= FOOTER_MIN_WIDTH && area.height > MIN_HEIGHT,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DISPLAY_HEIGHT), // Display box
            Constraint::Min(0),                 // Keypad grid
            Constraint::Length(footer),         // Footer
        ])
        .split(area);

    ScreenLayout {
        display: chunks[0],
        keypad: chunks[1],
        footer: chunks[2],
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        draw_too_small(f, app, area);
        return;
    }

    let chunks = screen_layout(area, app.config.show_footer);
    draw_display(f, app, chunks.display);
    draw_keypad(f, app, chunks.keypad);
    if chunks.footer.height > 0 {
        draw_footer(f, app, chunks.footer);
    }

    if app.popup == Popup::Help {
        draw_help_popup(f, app);
    }
}

fn draw_display(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let block = Block::default()
        .title(Span::styled(" dentaku ", Style::default().fg(theme.accent)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.inactive));

    // The in-progress expression sits dimmed above the display string.
    let expression = match app.engine.operator() {
        Some(op) => {
            let second = app.engine.second_operand();
            if second.is_empty() {
                format!("{} {}", app.engine.first_operand(), op.symbol())
            } else {
                format!("{} {} {}", app.engine.first_operand(), op.symbol(), second)
            }
        }
        None => String::new(),
    };

    let lines = vec![
        Line::styled(expression, Style::default().fg(theme.text_dim)),
        Line::styled(
            app.engine.display().to_string(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
    ];

    let display = Paragraph::new(lines).alignment(Alignment::Right).block(block);
    f.render_widget(display, area);
}

fn draw_keypad(f: &mut Frame, app: &App, area: Rect) {
    for (rect, key) in keypad::layout(area) {
        draw_button(f, app, rect, key);
    }
}

fn draw_button(f: &mut Frame, app: &App, area: Rect, key: Key) {
    let theme = &app.theme;
    let color = theme.button_color(keypad::category(key));
    let is_cursor = keypad::key_at(app.cursor.0, app.cursor.1) == Some(key);
    let is_pressed = app.pressed == Some(key);

    let mut border_style = Style::default().fg(if is_cursor { theme.accent } else { color });
    let mut label_style = Style::default().fg(theme.text).add_modifier(Modifier::BOLD);
    if is_pressed {
        border_style = border_style.add_modifier(Modifier::REVERSED);
        label_style = label_style.add_modifier(Modifier::REVERSED);
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    // Label centered on the middle row of the button.
    let label_area = Rect::new(inner.x, inner.y + (inner.height - 1) / 2, inner.width, 1);
    let label = Paragraph::new(Line::styled(key.label(), label_style))
        .alignment(Alignment::Center);
    f.render_widget(label, label_area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let hints: Vec<(&str, &str)> = vec![
        ("0-9", "Type"),
        ("↑↓←→", "Move"),
        ("Space", "Press"),
        ("Enter", "="),
        ("c", "AC"),
        ("?", "Help"),
        ("q", "Quit"),
    ];

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 {
        4
    } else if area.width < 80 {
        5
    } else {
        hints.len()
    };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(theme.text_dim)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}

fn draw_too_small(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines = vec![
        Line::styled("dentaku", Style::default().fg(theme.accent)),
        Line::styled(
            format!("needs at least {}x{}", MIN_WIDTH, MIN_HEIGHT),
            Style::default().fg(theme.text_dim),
        ),
        Line::styled(
            format!("terminal is {}x{}", area.width, area.height),
            Style::default().fg(theme.text_dim),
        ),
    ];

    let height = (lines.len() as u16).min(area.height);
    let top = area.height.saturating_sub(height) / 2;
    let notice_area = Rect::new(area.x, area.y + top, area.width, height);

    let notice = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(notice, notice_area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let theme = &app.theme;
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 60 { 90 } else { 60 },
        if area.height < 30 { 90 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let header = Style::default().fg(theme.operator).add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(theme.accent);

    let help_text = vec![
        Line::from(Span::styled("═══ Typing ═══", header)),
        Line::from(vec![
            Span::styled("  0-9 .      ", key_style),
            Span::raw("Digits and decimal point"),
        ]),
        Line::from(vec![
            Span::styled("  + - * /    ", key_style),
            Span::raw("Choose an operator (x works for ×)"),
        ]),
        Line::from(vec![
            Span::styled("  % s        ", key_style),
            Span::raw("Percent, sign toggle"),
        ]),
        Line::from(vec![
            Span::styled("  = Enter    ", key_style),
            Span::raw("Evaluate"),
        ]),
        Line::from(vec![
            Span::styled("  c Delete   ", key_style),
            Span::raw("Clear (AC)"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Keypad ═══", header)),
        Line::from(vec![
            Span::styled("  ↑↓←→       ", key_style),
            Span::raw("Move between buttons"),
        ]),
        Line::from(vec![
            Span::styled("  Space      ", key_style),
            Span::raw("Press the highlighted button"),
        ]),
        Line::from(vec![
            Span::styled("  Click      ", key_style),
            Span::raw("Press a button with the mouse"),
        ]),
        Line::from(""),
        Line::from(Span::styled("═══ Other ═══", header)),
        Line::from(vec![
            Span::styled("  q / Ctrl-C ", key_style),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("?", key_style),
            Span::styled("/", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", key_style),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" dentaku Help ", Style::default().fg(theme.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
