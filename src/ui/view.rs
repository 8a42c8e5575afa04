//! Panel rendering
//!
//! Rendering is a pure function of `ViewModel`:
//! - Header
//! - Input bar (with submit affordance)
//! - Status line (ready / analyzing / error banner)
//! - Result panel
//! - Activity console

use ratatui::style::Stylize;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::analysis::NutritionRecord;
use crate::ui::state::{App, ViewModel};

/// Render the whole UI
pub fn render<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> std::io::Result<()> {
    let vm = app.view_model();
    terminal.draw(|f| draw(f, &vm))?;
    Ok(())
}

/// Draw one frame
pub fn draw(f: &mut Frame, vm: &ViewModel<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(6),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input_bar(f, vm, chunks[1]);
    render_status_line(f, vm, chunks[2]);
    render_result_panel(f, vm, chunks[3]);
    render_console(f, vm, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled("MacroAI", Style::default().fg(Color::Magenta).bold()),
        Span::styled(
            "  Intelligent Nutrition Analysis",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

/// Label of the submit affordance
pub fn submit_label(vm: &ViewModel<'_>) -> &'static str {
    if vm.loading {
        " Processing... "
    } else {
        " [Enter] Analyze Meal "
    }
}

fn render_input_bar(f: &mut Frame, vm: &ViewModel<'_>, area: Rect) {
    let hint_style = if vm.submit_enabled {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = if vm.query.is_empty() {
        Line::from(Span::styled(
            "e.g., I ate a grilled chicken sandwich and a salad...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(vm.query))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Meal ")
        .title_bottom(Line::from(Span::styled(submit_label(vm), hint_style)).right_aligned());
    f.render_widget(Paragraph::new(content).block(block), area);

    // Cursor after the typed text, clamped to the box
    let typed = u16::try_from(vm.query.chars().count()).unwrap_or(u16::MAX);
    let max_x = area.x.saturating_add(area.width.saturating_sub(2));
    let x = area.x.saturating_add(1).saturating_add(typed).min(max_x);
    f.set_cursor_position((x, area.y + 1));
}

/// Status line text and style
pub fn status_line(vm: &ViewModel<'_>) -> Line<'static> {
    if let Some(error) = vm.error {
        Line::from(vec![
            Span::styled("! ", Style::default().fg(Color::Red).bold()),
            Span::styled(error.to_string(), Style::default().fg(Color::LightRed)),
        ])
    } else if vm.loading {
        Line::from(Span::styled("Analyzing...", Style::default().fg(Color::Yellow)))
    } else if vm.result.is_some() {
        Line::from(Span::styled("Done", Style::default().fg(Color::Green)))
    } else {
        Line::from(Span::styled("Ready", Style::default().fg(Color::DarkGray)))
    }
}

fn render_status_line(f: &mut Frame, vm: &ViewModel<'_>, area: Rect) {
    let border = if vm.error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let status = Paragraph::new(status_line(vm))
        .block(Block::default().borders(Borders::ALL).border_style(border));
    f.render_widget(status, area);
}

/// Lines of the result panel
pub fn result_lines(vm: &ViewModel<'_>) -> Vec<Line<'static>> {
    match vm.result {
        Some(record) => record_lines(record),
        None => {
            let placeholder = if vm.loading {
                "Waiting for analysis..."
            } else {
                "No analysis yet"
            };
            vec![Line::from(Span::styled(
                placeholder,
                Style::default().fg(Color::DarkGray),
            ))]
        }
    }
}

fn record_lines(record: &NutritionRecord) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::DarkGray);
    vec![
        Line::from(Span::styled(
            record.item_name.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled("Detected meal", label)),
        Line::from(""),
        Line::from(vec![
            Span::styled("Calories ", label),
            Span::styled(
                record.calories_display(),
                Style::default().fg(Color::LightRed).bold(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Protein ", label),
            Span::styled(
                NutritionRecord::grams_display(record.protein),
                Style::default().fg(Color::Green),
            ),
            Span::styled("   Carbs ", label),
            Span::styled(
                NutritionRecord::grams_display(record.carbs),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("   Fat ", label),
            Span::styled(
                NutritionRecord::grams_display(record.fat),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tip: ", Style::default().fg(Color::Blue).bold()),
            Span::raw(record.health_tip.clone()),
        ]),
    ]
}

fn render_result_panel(f: &mut Frame, vm: &ViewModel<'_>, area: Rect) {
    let panel = Paragraph::new(result_lines(vm))
        .block(Block::default().borders(Borders::ALL).title(" Nutrition "))
        .wrap(Wrap { trim: true });
    f.render_widget(panel, area);
}

fn render_console(f: &mut Frame, vm: &ViewModel<'_>, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = vm.console.len().saturating_sub(visible);
    let lines: Vec<Line> = vm
        .console
        .iter()
        .skip(skip)
        .map(|m| {
            Line::from(vec![
                Span::styled(
                    m.timestamp.format("%H:%M:%S ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(m.content.clone()),
            ])
        })
        .collect();
    let console =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Activity "));
    f.render_widget(console, area);
}
