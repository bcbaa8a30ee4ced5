use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::form::{ClientForm, FormField};
use crate::ui::StatusBanner;

const INPUT_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, PartialEq)]
pub enum FormAction {
    Quit,
    /// New full value of a field after one keystroke.
    Edit(FormField, String),
    Submit,
    Activate,
    Deactivate,
}

pub struct ClientFormScreen {
    pub current_field: FormField,
    pub editing: bool,
}

impl Default for ClientFormScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientFormScreen {
    pub fn new() -> Self {
        Self {
            current_field: FormField::Name,
            editing: false,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = self.current_field.next();
    }

    pub fn previous_field(&mut self) {
        self.current_field = self.current_field.previous();
    }

    /// The value the current field would have after `key`, if `key` edits it.
    pub fn edited_value(&self, form: &ClientForm, key: KeyCode) -> Option<String> {
        if !self.editing {
            return None;
        }

        let mut value = form.value(self.current_field).to_string();
        match key {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop()?;
            }
            _ => return None,
        }
        Some(value)
    }
}

pub fn render_client_form<B: Backend>(
    f: &mut Frame<B>,
    screen: &ClientFormScreen,
    form: &ClientForm,
    banner: Option<(String, String)>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title_text = match form.id {
        Some(id) => format!("Editing client #{id}"),
        None => "New client".to_string(),
    };
    let (status_text, status_color) = if form.status {
        ("Active", Color::Green)
    } else {
        ("Inactive", Color::Red)
    };

    let title = Paragraph::new(Spans::from(vec![
        Span::styled(title_text, Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(status_text, Style::default().fg(status_color)),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_fields(f, screen, form, chunks[1]);

    let help_text = if screen.editing {
        "Type to edit | Enter/Esc - Stop editing"
    } else {
        "Enter - Edit field | Up/Down - Navigate | S - Save | A - Activate | D - Deactivate | Esc - Quit"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);

    let banner_line = match banner {
        Some((message, dismiss_label)) => Spans::from(vec![
            Span::styled(message, Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(
                format!("[{dismiss_label}]"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Spans::from(""),
    };
    f.render_widget(
        Paragraph::new(banner_line).block(Block::default().borders(Borders::ALL)),
        chunks[3],
    );
}

fn render_fields<B: Backend>(f: &mut Frame<B>, screen: &ClientFormScreen, form: &ClientForm, area: Rect) {
    let items: Vec<ListItem> = FormField::ALL
        .iter()
        .map(|field| {
            let selected = *field == screen.current_field;
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let value = form.value(*field);
            let mut spans = vec![Span::styled(format!("{}: ", field.label()), label_style)];
            if selected && screen.editing {
                spans.push(Span::styled(
                    format!("{value}|"),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::raw(value.to_string()));
            }

            if let Err(err) = form.field_error(*field) {
                spans.push(Span::styled(format!("  ({err})"), Style::default().fg(Color::Red)));
            }

            ListItem::new(Spans::from(spans))
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Client Details"));

    f.render_widget(form_list, area);
}

/// Wait briefly for a key and translate it. Returns `Ok(None)` on timeout so
/// the caller can redraw expiring banners.
pub fn handle_input(
    screen: &mut ClientFormScreen,
    form: &ClientForm,
    banner: &StatusBanner,
) -> Result<Option<FormAction>> {
    if !event::poll(INPUT_POLL)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(handle_key(screen, form, banner, key.code)),
        _ => Ok(None),
    }
}

/// Translate one key. While a banner is showing, the key only dismisses it.
pub fn handle_key(
    screen: &mut ClientFormScreen,
    form: &ClientForm,
    banner: &StatusBanner,
    code: KeyCode,
) -> Option<FormAction> {
    if banner.visible().is_some() {
        banner.dismiss();
        return None;
    }

    if screen.editing {
        match code {
            KeyCode::Esc | KeyCode::Enter => screen.toggle_editing(),
            code => {
                if let Some(value) = screen.edited_value(form, code) {
                    return Some(FormAction::Edit(screen.current_field, value));
                }
            }
        }
        return None;
    }

    match code {
        KeyCode::Esc => return Some(FormAction::Quit),
        KeyCode::Enter => screen.toggle_editing(),
        KeyCode::Up => screen.previous_field(),
        KeyCode::Down => screen.next_field(),
        KeyCode::Char('s') => return Some(FormAction::Submit),
        KeyCode::Char('a') => return Some(FormAction::Activate),
        KeyCode::Char('d') => return Some(FormAction::Deactivate),
        _ => {}
    }

    None
}
