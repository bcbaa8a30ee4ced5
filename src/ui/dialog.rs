use std::io::Stdout;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode};
use tracing::error;
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::form::{Confirmation, ConfirmationPrompt};

pub type SharedTerminal = Arc<Mutex<Terminal<CrosstermBackend<Stdout>>>>;

/// Modal yes/no prompt drawn over the current screen.
pub struct TerminalConfirmation {
    terminal: SharedTerminal,
}

impl TerminalConfirmation {
    pub fn new(terminal: SharedTerminal) -> Self {
        Self { terminal }
    }
}

#[async_trait]
impl Confirmation for TerminalConfirmation {
    async fn confirm(&self, prompt: ConfirmationPrompt) -> Option<bool> {
        // event::read blocks the calling thread.
        tokio::task::block_in_place(|| self.ask(&prompt))
    }
}

impl TerminalConfirmation {
    fn ask(&self, prompt: &ConfirmationPrompt) -> Option<bool> {
        let mut terminal = self.terminal.lock().unwrap_or_else(PoisonError::into_inner);

        if let Err(e) = terminal.draw(|f| render_confirmation(f, prompt)) {
            error!("failed to draw confirmation dialog: {:?}", e);
            return None;
        }

        loop {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if let Some(answer) = answer_for(key.code) {
                        return answer;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    error!("failed to read confirmation input: {:?}", e);
                    return None;
                }
            }
        }
    }
}

/// Answer carried by a key press, or `None` when the key is ignored.
/// Esc dismisses the dialog without an answer.
fn answer_for(code: KeyCode) -> Option<Option<bool>> {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Some(true)),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(Some(false)),
        KeyCode::Esc => Some(None),
        _ => None,
    }
}

fn render_confirmation<B: Backend>(frame: &mut Frame<B>, prompt: &ConfirmationPrompt) {
    let popup_area = centered_rect(50, 25, frame.size());

    let popup = Paragraph::new(vec![
        Spans::from(""),
        Spans::from(vec![
            Span::raw(format!("{} ", prompt.message)),
            Span::styled(
                prompt.subject_label.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("?"),
        ]),
        Spans::from(""),
        Spans::from(format!("<Y> {}  <N> Cancel", prompt.action_label)),
    ])
    .block(
        Block::default()
            .title(prompt.action_label.as_str())
            .borders(Borders::ALL),
    )
    .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

/// Helper function to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
