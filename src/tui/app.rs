//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the todo store, the
//! new-task input buffer and the current filter. It handles key events,
//! re-projects the visible list after every change and renders the screen.

use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};

use crate::error::Result;
use crate::filter::Filter;
use crate::store::TodoStore;
use crate::tui::{
    colors::{DARK_RED, FADED, NAVY, PAPER},
    enums::{AppState, InputMode},
    input::InputField,
    utils::centered_rect,
};
use crate::view::{self, TodoView};

const INPUT_PLACEHOLDER: &str = "// ENTER NEW TASK...";

/// Main application state for the terminal user interface.
///
/// All todo state lives here: the store with the canonical list, the input
/// buffer and the filter selection. `visible` holds the IDs of the current
/// projection so the table selection can be mapped back to a todo.
pub struct App {
    state: AppState,
    store: TodoStore,
    input: InputField,
    input_mode: InputMode,
    filter: Filter,
    list_state: TableState,
    visible: Vec<u64>,
    status_message: String,
    confirm_clear: bool,
    confirm_action: Option<String>,
}

impl App {
    /// Create the app around a loaded store.
    ///
    /// Starts with the input focused when there is nothing to navigate yet.
    pub fn new(store: TodoStore, filter: Filter, confirm_clear: bool) -> Self {
        let input_mode = if store.is_empty() {
            InputMode::Text
        } else {
            InputMode::None
        };
        let mut app = App {
            state: AppState::TodoList,
            store,
            input: InputField::new(),
            input_mode,
            filter,
            list_state: TableState::default(),
            visible: Vec::new(),
            status_message: String::new(),
            confirm_clear,
            confirm_action: None,
        };
        app.refresh();
        app
    }

    /// Re-project the visible todos from the store.
    ///
    /// Keeps the selection on the same todo when it is still visible,
    /// otherwise clamps the previous index into range.
    fn refresh(&mut self) {
        let old_selected_id = self
            .list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied();

        self.visible = view::filtered(self.store.todos(), self.filter)
            .iter()
            .map(|t| t.id)
            .collect();

        if let Some(id) = old_selected_id {
            if let Some(pos) = self.visible.iter().position(|&v| v == id) {
                self.list_state.select(Some(pos));
                return;
            }
        }

        if self.visible.is_empty() {
            self.list_state.select(None);
        } else {
            let idx = self
                .list_state
                .selected()
                .unwrap_or(0)
                .min(self.visible.len() - 1);
            self.list_state.select(Some(idx));
        }
    }

    fn select_id(&mut self, id: u64) {
        if let Some(pos) = self.visible.iter().position(|&v| v == id) {
            self.list_state.select(Some(pos));
        }
    }

    /// ID of the todo under the cursor.
    fn selected_id(&self) -> Option<u64> {
        self.list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.refresh();
    }

    /// Add the buffered text as a new todo.
    ///
    /// The buffer is only cleared when a todo was actually created.
    fn submit_input(&mut self) -> Result<()> {
        if let Some(id) = self.store.add(&self.input.value)? {
            self.input.clear();
            self.refresh();
            self.select_id(id);
            self.set_status_message(format!("Added todo {id}"));
        }
        Ok(())
    }

    fn toggle_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id() else {
            self.set_status_message("No todo selected".to_string());
            return Ok(());
        };
        if self.store.toggle(id)? {
            let done = self.store.get(id).map_or(false, |t| t.completed);
            self.refresh();
            self.set_status_message(format!(
                "Marked todo {id} {}",
                if done { "completed" } else { "active" }
            ));
        }
        Ok(())
    }

    fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id() else {
            self.set_status_message("No todo selected".to_string());
            return Ok(());
        };
        if self.store.delete(id)? {
            self.refresh();
            self.set_status_message(format!("Deleted todo {id}"));
        }
        Ok(())
    }

    fn request_clear_completed(&mut self) -> Result<()> {
        let completed = view::completed_count(self.store.todos());
        if completed == 0 {
            self.set_status_message("No completed todos to clear".to_string());
        } else if self.confirm_clear {
            self.confirm_action = Some(format!("Clear {completed} completed todo(s)"));
            self.state = AppState::Confirm;
        } else {
            self.clear_completed()?;
        }
        Ok(())
    }

    fn clear_completed(&mut self) -> Result<()> {
        let removed = self.store.clear_completed()?;
        self.refresh();
        self.set_status_message(format!("Cleared {removed} completed todo(s)"));
        Ok(())
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.list_state.selected().unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as usize).min(last)
        };
        self.list_state.select(Some(next));
    }

    /// Handle keys while the input buffer has focus.
    fn handle_text_input(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Enter => self.submit_input()?,
            KeyCode::Esc | KeyCode::Tab => self.input_mode = InputMode::None,
            KeyCode::Char(c) => self.input.handle_char(c),
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Home => self.input.move_cursor_home(),
            KeyCode::End => self.input.move_cursor_end(),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input when in the todo list view.
    ///
    /// Returns true if the application should quit.
    fn handle_list_input(&mut self, key: KeyCode) -> Result<bool> {
        if self.input_mode == InputMode::Text {
            return self.handle_text_input(key);
        }
        match key {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Char('/') | KeyCode::Tab => {
                self.input_mode = InputMode::Text;
            }
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Home | KeyCode::Char('g') => self.move_selection(isize::MIN),
            KeyCode::End | KeyCode::Char('G') => self.move_selection(isize::MAX),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected()?,
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected()?,
            KeyCode::Char('C') => self.request_clear_completed()?,
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Active),
            KeyCode::Char('3') => self.set_filter(Filter::Completed),
            KeyCode::Char('f') => self.set_filter(self.filter.next()),
            KeyCode::Char('h') | KeyCode::Char('?') => self.state = AppState::Help,
            _ => {}
        }
        Ok(false)
    }

    fn handle_confirm_input(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.state = AppState::TodoList;
                self.confirm_action = None;
                self.clear_completed()?;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.state = AppState::TodoList;
                self.confirm_action = None;
                self.set_status_message("Cancelled".to_string());
            }
            _ => {}
        }
        Ok(false)
    }

    fn handle_help_input(&mut self, key: KeyCode) -> Result<bool> {
        if matches!(
            key,
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            self.state = AppState::TodoList;
        }
        Ok(false)
    }

    /// Dispatch a key press based on the current application state.
    ///
    /// Returns true if the application should quit.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }
        self.clear_status_message();
        match self.state {
            AppState::TodoList => self.handle_list_input(key.code),
            AppState::Help => self.handle_help_input(key.code),
            AppState::Confirm => self.handle_confirm_input(key.code),
        }
    }

    /// Poll for and handle a keyboard event.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return self.handle_key(key);
                }
            }
        }
        Ok(false)
    }

    /// Render the title bar with the live counts.
    fn render_header(&self, f: &mut Frame, area: Rect) {
        let view = TodoView::project(self.store.todos(), self.filter);
        let counts = Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC);
        let header_text = vec![Line::from(vec![
            Span::styled(" DN ", Style::default().bg(NAVY).fg(PAPER).add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(format!("//ACTIVE: {}", view.active), counts),
            Span::raw("  "),
            Span::styled(format!("//COMPLETED: {}", view.completed), counts),
            Span::raw("  "),
            Span::styled(format!("//TOTAL: {}", view.total), counts),
        ])];
        let header = Paragraph::new(header_text)
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render the new-task input line and place the cursor when it has focus.
    fn render_input(&self, f: &mut Frame, area: Rect) {
        let focused = self.input_mode == InputMode::Text;
        let border_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let content = if self.input.is_empty() {
            Line::from(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(FADED)))
        } else {
            Line::from(self.input.value.as_str())
        };
        let cursor_col = self.input.cursor_column();
        let scroll = input_scroll(cursor_col, area.width.saturating_sub(2));
        let input = Paragraph::new(content).scroll((0, scroll)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("New task (Enter to add)"),
        );
        f.render_widget(input, area);

        if focused {
            let col = u16::try_from(cursor_col)
                .unwrap_or(u16::MAX)
                .saturating_sub(scroll);
            f.set_cursor_position((area.x.saturating_add(1).saturating_add(col), area.y + 1));
        }
    }

    fn render_filter_tabs(&self, f: &mut Frame, area: Rect) {
        let tabs = Tabs::new(Filter::ALL.iter().map(|flt| flt.label()))
            .block(Block::default().borders(Borders::ALL).title("Filter (1/2/3, f)"))
            .select(self.filter.index())
            .style(Style::default())
            .highlight_style(Style::default().bg(NAVY).fg(PAPER).add_modifier(Modifier::BOLD))
            .divider("|");
        f.render_widget(tabs, area);
    }

    /// Render the filtered todo table, or the empty placeholder.
    fn render_todo_list(&mut self, f: &mut Frame, area: Rect) {
        let view = TodoView::project(self.store.todos(), self.filter);
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Todos ({}/{}) - Press 'h' for help",
            view.visible.len(),
            view.total
        ));

        if view.visible.is_empty() {
            let empty = Paragraph::new(view::empty_message(self.filter))
                .style(Style::default().fg(FADED))
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(empty, area);
            return;
        }

        let rows: Vec<Row> = view
            .visible
            .iter()
            .map(|todo| {
                let (check, text_style) = if todo.completed {
                    (
                        "[x]",
                        Style::default().fg(FADED).add_modifier(Modifier::CROSSED_OUT),
                    )
                } else {
                    ("[ ]", Style::default().fg(Color::White))
                };
                let created = todo
                    .created_at
                    .with_timezone(&Local)
                    .format("%Y-%m-%d")
                    .to_string();
                Row::new(vec![
                    Cell::from(check),
                    Cell::from(todo.text.clone()).style(text_style),
                    Cell::from(created).style(Style::default().fg(FADED)),
                    Cell::from("[DEL]").style(Style::default().fg(FADED)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(3),  // Checkbox
            Constraint::Min(20),    // Text
            Constraint::Length(10), // Created
            Constraint::Length(5),  // Delete hint
        ];

        let highlight = if self.input_mode == InputMode::None {
            Style::default().bg(Color::Gray).fg(Color::Black)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let table = Table::new(rows, widths)
            .block(block)
            .row_highlight_style(highlight)
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.list_state);
    }

    /// Render the clear-completed hint, shown only when there is something to clear.
    fn render_clear_hint(&self, f: &mut Frame, area: Rect) {
        let completed = view::completed_count(self.store.todos());
        if completed == 0 {
            return;
        }
        let hint = Paragraph::new(format!("// CLEAR COMPLETED ({completed})  [C]"))
            .style(Style::default().fg(DARK_RED).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Right);
        f.render_widget(hint, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(60, 70, area);
        f.render_widget(Clear, area);

        let key = |k: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("{k:<14}"), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(what),
            ])
        };
        let text = vec![
            Line::from(Span::styled("Input", Style::default().fg(Color::Cyan))),
            key("Enter", "Add task"),
            key("Esc / Tab", "Back to list"),
            Line::from(""),
            Line::from(Span::styled("List", Style::default().fg(Color::Cyan))),
            key("a / i / /", "Type a new task"),
            key("j k / arrows", "Move selection"),
            key("Space / Enter", "Toggle completed"),
            key("d / Delete", "Delete task"),
            key("C", "Clear completed"),
            key("1 2 3 / f", "Filter all / active / completed"),
            key("q / Ctrl+C", "Quit"),
        ];

        let help = Paragraph::new(text)
            .block(Block::default().title("Help").borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(help, area);
    }

    /// Render a confirmation dialog for destructive actions.
    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 30, area);
        f.render_widget(Clear, area);

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "Are you sure you want to:",
                Style::default().add_modifier(Modifier::BOLD),
            )]),
            Line::from(self.confirm_action.as_deref().unwrap_or("")),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];

        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else {
            match (self.state, self.input_mode) {
                (AppState::TodoList, InputMode::Text) => {
                    "Typing | Enter to add, Esc for list".to_string()
                }
                (AppState::TodoList, InputMode::None) => format!(
                    "{} shown | Press 'a' to add, 'h' for help",
                    self.visible.len()
                ),
                (AppState::Help, _) => "Help".to_string(),
                (AppState::Confirm, _) => "Confirm Action".to_string(),
            }
        };

        let status = Paragraph::new(status_text)
            .style(Style::default().bg(NAVY).fg(PAPER))
            .alignment(Alignment::Left);

        f.render_widget(status, area);
    }

    /// Main render function that lays out the page and draws any overlay.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Input
                Constraint::Length(3), // Filter tabs
                Constraint::Min(3),    // Todo list
                Constraint::Length(1), // Clear completed
                Constraint::Length(1), // Status bar
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_input(f, chunks[1]);
        self.render_filter_tabs(f, chunks[2]);
        self.render_todo_list(f, chunks[3]);
        self.render_clear_hint(f, chunks[4]);
        self.render_status_bar(f, chunks[5]);

        let full = f.area();
        match self.state {
            AppState::TodoList => {}
            AppState::Help => self.render_help(f, full),
            AppState::Confirm => self.render_confirm(f, full),
        }
    }

    /// Main event loop for the TUI application.
    ///
    /// Redraws the whole screen every tick and handles input until the user exits.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// Columns to scroll the input line so `cursor_col` stays inside a box
/// `inner_width` columns wide.
fn input_scroll(cursor_col: usize, inner_width: u16) -> u16 {
    let width = usize::from(inner_width.max(1));
    u16::try_from((cursor_col + 1).saturating_sub(width)).unwrap_or(u16::MAX)
}
