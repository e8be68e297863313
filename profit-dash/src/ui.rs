//! Terminal renderer
//!
//! Paints the view-models into a fixed layout. No state lives here; every
//! frame is rebuilt from what the controller holds.

use profit_client::{Grouping, RecordType};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};
use tui_input::Input;

use crate::app::{App, Mode};
use crate::i18n::Strings;
use crate::range::QuickFilter;
use crate::view::{CardSet, TableLayout, TableView};

pub fn draw(frame: &mut Frame, app: &App) {
    let s = app.strings();
    let [header, filters, today, totals, table, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, app, s);
    draw_filters(frame, filters, app, s);
    draw_cards(frame, today, app.today_cards.as_ref(), s.today_title);
    draw_cards(frame, totals, app.totals_cards.as_ref(), s.totals_title);
    draw_table(frame, table, app.table.as_ref(), s);
    draw_footer(frame, footer, app, s);

    if app.alert.is_some() {
        draw_alert(frame, app, s);
    } else {
        match app.mode {
            Mode::Range => draw_range_form(frame, app, s),
            Mode::Record => draw_record_form(frame, app, s),
            Mode::Plan => draw_plan_form(frame, app, s),
            Mode::Normal => {}
        }
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, s: &Strings) {
    let mut spans = vec![Span::from(s.app_title).bold()];
    if let Some(status) = &app.status {
        spans.push(Span::from("  ·  ").dim());
        spans.push(Span::from(status.clone()).dim());
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_filters(frame: &mut Frame, area: Rect, app: &App, s: &Strings) {
    let items = [
        (QuickFilter::Today, "1", s.filter_today),
        (QuickFilter::Yesterday, "2", s.filter_yesterday),
        (QuickFilter::ThisWeek, "3", s.filter_this_week),
        (QuickFilter::LastWeek, "4", s.filter_last_week),
        (QuickFilter::ThisMonth, "5", s.filter_this_month),
        (QuickFilter::LastMonth, "6", s.filter_last_month),
        (QuickFilter::All, "7", s.filter_all),
    ];
    let mut spans = Vec::new();
    for (filter, key, label) in items {
        let text = format!(" {key} {label} ");
        if app.selection.active_quick == Some(filter) {
            spans.push(Span::from(text).reversed());
        } else {
            spans.push(Span::from(text).dim());
        }
        spans.push(Span::from(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_cards(frame: &mut Frame, area: Rect, set: Option<&CardSet>, fallback_title: &str) {
    let title = set.map_or_else(|| fallback_title.to_string(), |set| set.title.clone());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(set) = set else { return };
    if set.cards.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, set.cards.len() as u32); set.cards.len()];
    let slots = Layout::horizontal(constraints).split(inner);
    for (card, slot) in set.cards.iter().zip(slots.iter()) {
        let text = vec![
            Line::from(card.label.clone()).dim(),
            Line::from(card.value.clone()).bold(),
        ];
        frame.render_widget(Paragraph::new(text).centered(), *slot);
    }
}

fn draw_table(frame: &mut Frame, area: Rect, table: Option<&TableView>, s: &Strings) {
    let Some(view) = table else {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(s.records_title.to_string());
        frame.render_widget(block, area);
        return;
    };

    let widths: Vec<Constraint> = match view.layout {
        TableLayout::Records => vec![
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Min(12),
        ],
        TableLayout::Aggregates => vec![
            Constraint::Length(12),
            Constraint::Min(12),
            Constraint::Min(12),
            Constraint::Min(12),
        ],
    };
    let header = Row::new(view.header.clone()).style(Style::new().bold());
    let rows = view.rows.iter().map(|row| Row::new(row.clone()));
    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(2)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} {}", view.title, view.suffix)),
        );
    frame.render_widget(widget, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, app: &App, s: &Strings) {
    let hint = if app.alert.is_some() {
        s.hint_alert
    } else {
        match app.mode {
            Mode::Normal => s.hint_normal,
            _ => s.hint_form,
        }
    };
    frame.render_widget(Paragraph::new(Line::from(hint).dim()), area);
}

// ========== Popups ==========

fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

fn field_line(label: &str, value: String, focused: bool) -> Line<'static> {
    let label_span = Span::from(format!("{label}: ")).dim();
    let value_span = if focused {
        Span::from(value).bold()
    } else {
        Span::from(value)
    };
    Line::from(vec![label_span, value_span])
}

fn set_text_cursor(frame: &mut Frame, inner: Rect, row: u16, label: &str, input: &Input) {
    let x = inner.x + label.chars().count() as u16 + 2 + input.visual_cursor() as u16;
    let x = x.min(inner.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y + row));
}

fn draw_range_form(frame: &mut Frame, app: &App, s: &Strings) {
    let area = popup_area(frame.area(), 46, 6);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(s.form_range_title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let group_label = match app.range_form.group {
        Grouping::Daily => s.group_daily,
        Grouping::Monthly => s.group_monthly,
        Grouping::Yearly => s.group_yearly,
    };
    let form = &app.range_form;
    let lines = vec![
        field_line(s.label_start, form.start.value().to_string(), form.focus == 0),
        field_line(s.label_end, form.end.value().to_string(), form.focus == 1),
        field_line(s.label_group, group_label.to_string(), form.focus == 2),
        Line::from(s.hint_form).dim(),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    match form.focus {
        0 => set_text_cursor(frame, inner, 0, s.label_start, &form.start),
        1 => set_text_cursor(frame, inner, 1, s.label_end, &form.end),
        _ => {}
    }
}

fn draw_record_form(frame: &mut Frame, app: &App, s: &Strings) {
    let area = popup_area(frame.area(), 46, 6);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(s.form_record_title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let type_label = match app.record_form.record_type {
        RecordType::Sale => s.type_sale,
        RecordType::Expense => s.type_expense,
    };
    let form = &app.record_form;
    let lines = vec![
        field_line(s.label_date, form.date.value().to_string(), form.focus == 0),
        field_line(s.label_type, type_label.to_string(), form.focus == 1),
        field_line(s.label_amount, form.amount.value().to_string(), form.focus == 2),
        Line::from(s.hint_form).dim(),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    match form.focus {
        0 => set_text_cursor(frame, inner, 0, s.label_date, &form.date),
        2 => set_text_cursor(frame, inner, 2, s.label_amount, &form.amount),
        _ => {}
    }
}

fn draw_plan_form(frame: &mut Frame, app: &App, s: &Strings) {
    let area = popup_area(frame.area(), 40, 4);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(s.form_plan_title.to_string());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        field_line(s.label_plan, app.plan_input.value().to_string(), true),
        Line::from(s.hint_form).dim(),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
    set_text_cursor(frame, inner, 0, s.label_plan, &app.plan_input);
}

fn draw_alert(frame: &mut Frame, app: &App, s: &Strings) {
    let area = popup_area(frame.area(), 50, 6);
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(s.alert_title.to_string())
        .border_style(Style::new().fg(Color::Red));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = app.alert.clone().unwrap_or_default();
    let lines = vec![
        Line::from(message),
        Line::from(""),
        Line::from(s.hint_alert).dim(),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
