//! Terminal UI rendering for the glossdeck editor.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use glossdeck_core::render::{self, Segment};
use glossdeck_core::{App, Focus, InputTarget, MetaField, Mode};

// Catppuccin Mocha colors
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const RED: Color = Color::Rgb(243, 139, 168);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const TEAL: Color = Color::Rgb(148, 226, 213);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(8), // Title-slide metadata
            Constraint::Min(0),    // Paragraph preview + explanations
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_meta(frame, app, chunks[1]);
    draw_main_area(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    match app.mode {
        Mode::Input => draw_input_dialog(frame, app),
        Mode::Confirm => draw_confirm_dialog(frame, app),
        Mode::Help => draw_help(frame),
        _ => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = app.store.meta().title.trim().to_string();
    let title = if title.is_empty() {
        "Untitled Presentation".to_string()
    } else {
        title
    };
    let count = app.store.paragraphs().len();
    let current = if count > 0 {
        app.selected_paragraph + 1
    } else {
        0
    };

    let bar = Paragraph::new(format!(
        " glossdeck - {} [paragraph {}/{}]",
        title, current, count
    ))
    .style(Style::default().fg(TEXT).bg(SURFACE0));

    frame.render_widget(bar, area);
}

fn draw_meta(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.focus == Focus::Meta {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SUBTEXT0)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title("Title Slide");

    let items: Vec<ListItem> = MetaField::all()
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let selected = app.focus == Focus::Meta && i == app.selected_meta;
            let marker = if selected { ">" } else { " " };
            let value = app.store.meta().get(*field);
            let shown = if value.is_empty() { "-" } else { value };
            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };
            ListItem::new(format!("{} {:<10} {}", marker, field.label(), shown)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_main_area(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Paragraph preview
            Constraint::Length(34), // Explanations sidebar
        ])
        .split(area);

    draw_preview(frame, app, chunks[0]);
    draw_explanations(frame, app, chunks[1]);
}

fn draw_preview(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Paragraphs {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SUBTEXT0)
    };

    let mode_indicator = match app.mode {
        Mode::Visual => " [VISUAL]",
        _ => "",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("Paragraph{}", mode_indicator));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(paragraph) = app.active_paragraph() else {
        let empty = Paragraph::new("No paragraphs. Press 'a' to add one.")
            .style(Style::default().fg(SUBTEXT0));
        frame.render_widget(empty, inner);
        return;
    };

    if paragraph.is_draft() {
        let hint = Paragraph::new("Empty paragraph. Press 'e' to enter its text.")
            .style(Style::default().fg(SUBTEXT0));
        frame.render_widget(hint, inner);
        return;
    }

    let selection = app.selection_range();
    let cursor_offset = app.cursor.offset();
    let segments = render::segments(&paragraph.text, &paragraph.explanations);

    // Styled per character: highlight membership comes from the segment,
    // selection and cursor from raw offsets.
    let mut lines: Vec<Line> = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut offset = 0;
    for segment in &segments {
        let highlighted = matches!(segment, Segment::Highlight { .. });
        for ch in segment.content().chars() {
            if ch == '\n' {
                lines.push(Line::from(std::mem::take(&mut spans)));
                offset += 1;
                continue;
            }
            let mut style = Style::default().fg(TEXT);
            if highlighted {
                style = style.fg(TEAL).add_modifier(Modifier::UNDERLINED);
            }
            if let Some(range) = selection {
                if range.contains(offset) {
                    style = style.bg(SURFACE1).add_modifier(Modifier::BOLD);
                }
            }
            if offset == cursor_offset && app.focus == Focus::Paragraphs {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(ch.to_string(), style));
            offset += 1;
        }
    }
    // Cursor sitting at the very end of the text.
    if offset == cursor_offset && app.focus == Focus::Paragraphs {
        spans.push(Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)));
    }
    lines.push(Line::from(spans));

    let cursor = app.cursor.cursor();
    let visible_height = inner.height as usize;
    let scroll_offset = if visible_height > 0 && cursor.0 >= visible_height {
        cursor.0 - visible_height + 1
    } else {
        0
    };

    let preview = Paragraph::new(lines)
        .scroll((scroll_offset as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, inner);
}

fn draw_explanations(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Explanations {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SUBTEXT0)
    };

    let count = app
        .active_paragraph()
        .map(|p| p.explanations.len())
        .unwrap_or(0);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("Explanations ({})", count));

    let Some(paragraph) = app.active_paragraph() else {
        frame.render_widget(block, area);
        return;
    };

    if paragraph.explanations.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let hint = Paragraph::new("No explanations added yet.\nSelect text with 'v' to\nadd one.")
            .style(Style::default().fg(SUBTEXT0));
        frame.render_widget(hint, inner);
        return;
    }

    let text = &paragraph.text;
    let items: Vec<ListItem> = paragraph
        .explanations_sorted()
        .iter()
        .enumerate()
        .map(|(i, exp)| {
            let selected = i == app.selected_explanation;
            let marker = if selected { ">" } else { " " };

            let target: String = text
                .chars()
                .skip(exp.range.start_index)
                .take(exp.range.end_index - exp.range.start_index)
                .collect::<String>()
                .replace('\n', " ")
                .chars()
                .take(24)
                .collect();
            let body: String = exp.body.chars().take(28).collect();

            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };

            ListItem::new(vec![
                Line::from(Span::styled(format!("{} \"{}\"", marker, target), style)),
                Line::from(Span::styled(format!("   {}", body), style.fg(SUBTEXT0))),
            ])
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Visual => "VISUAL",
        Mode::Input => "INPUT",
        Mode::Confirm => "CONFIRM",
        Mode::Help => "HELP",
    };

    let status = app.status_message.as_deref().unwrap_or("");
    let help_hint = "Tab focus | v select | m manual | E export | ? help";

    let bar = Paragraph::new(format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    ))
    .style(Style::default().fg(SUBTEXT0).bg(SURFACE0));

    frame.render_widget(bar, area);
}

fn draw_input_dialog(frame: &mut Frame, app: &App) {
    let (title, height) = match app.input_target {
        InputTarget::ParagraphText => ("Paragraph text (Enter = newline, Ctrl+S = confirm)", 12),
        InputTarget::ExplanationBody => ("Enter explanation (then press Enter)", 5),
        InputTarget::ExplanationEdit => ("Edit explanation (then press Enter)", 5),
        InputTarget::TargetText => ("Enter the exact word, phrase, or sentence to explain", 5),
        InputTarget::Meta(field) => match field {
            MetaField::Title => ("Enter title", 5),
            MetaField::Subtitle => ("Enter subtitle", 5),
            MetaField::InstructorName => ("Enter instructor name", 5),
            MetaField::ContactInfo => ("Enter contact info", 5),
            MetaField::Date => ("Enter date", 5),
            MetaField::Location => ("Enter location", 5),
        },
    };

    let area = centered_rect(64, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GREEN))
        .title(title);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input = Paragraph::new(format!("{}_", app.input_buffer))
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: false });
    frame.render_widget(input, inner);
}

fn draw_confirm_dialog(frame: &mut Frame, app: &App) {
    let prompt = app
        .pending_action
        .as_ref()
        .map(|a| a.prompt())
        .unwrap_or("Continue?");

    let area = centered_rect(60, 6, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(RED))
        .title("Confirm (y/n)");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let body = Paragraph::new(prompt)
        .style(Style::default().fg(TEXT))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, inner);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(62, 22, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let bold = Style::default().fg(MAUVE).add_modifier(Modifier::BOLD);
    let help_text = vec![
        Line::from(Span::styled("Navigation", bold)),
        Line::from("  Tab      Cycle focus (title slide / paragraph / explanations)"),
        Line::from("  j/k/h/l  Move cursor, or move through the focused list"),
        Line::from("  w/b      Word forward/back"),
        Line::from("  g/G      Start/end of paragraph"),
        Line::from("  ]/[      Next/previous paragraph"),
        Line::from(""),
        Line::from(Span::styled("Editing", bold)),
        Line::from("  a        Add a paragraph"),
        Line::from("  e/Enter  Edit the focused item"),
        Line::from("  v        Select text, then Enter to explain it"),
        Line::from("  m        Explain an exact phrase (manual)"),
        Line::from("  d        Remove the selected explanation"),
        Line::from("  D        Remove the current paragraph"),
        Line::from("  C        Clear all data"),
        Line::from(""),
        Line::from(Span::styled("File", bold)),
        Line::from("  s        Save now"),
        Line::from("  E        Export the presentation as HTML"),
        Line::from("  q        Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
