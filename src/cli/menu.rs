//! Terminal menu launcher using ratatui
//!
//! Shows a short list of entries; Enter runs the highlighted external
//! command with the terminal handed back to it, then redraws the menu.

use std::io::{self, stdout};
use std::process::Command;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tracing::debug;

use super::prompts::pause_for_enter;

/// Program plus fixed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Run(ExternalCommand),
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action: MenuAction,
}

/// Disk usage, process viewer, exit.
pub fn default_entries() -> Vec<MenuEntry> {
    vec![
        MenuEntry {
            label: "Disk Usage".to_string(),
            action: MenuAction::Run(ExternalCommand::new("df", &["-h"])),
        },
        MenuEntry {
            label: "Processes".to_string(),
            action: MenuAction::Run(ExternalCommand::new("htop", &[])),
        },
        MenuEntry {
            label: "Exit".to_string(),
            action: MenuAction::Exit,
        },
    ]
}

/// Highlighted row, always within `[0, len - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCursor {
    index: usize,
    len: usize,
}

impl MenuCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if self.index + 1 < self.len {
            self.index += 1;
        }
    }
}

/// What a key press asks the loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuInput {
    Redraw,
    Launch(ExternalCommand),
    Quit,
}

/// Apply one key to the cursor. Kept free of terminal I/O for testing.
pub fn handle_key(code: KeyCode, cursor: &mut MenuCursor, entries: &[MenuEntry]) -> MenuInput {
    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            cursor.up();
            MenuInput::Redraw
        }
        KeyCode::Down | KeyCode::Char('j') => {
            cursor.down();
            MenuInput::Redraw
        }
        KeyCode::Enter => match entries.get(cursor.index()).map(|e| &e.action) {
            Some(MenuAction::Run(command)) => MenuInput::Launch(command.clone()),
            Some(MenuAction::Exit) => MenuInput::Quit,
            None => MenuInput::Redraw,
        },
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => MenuInput::Quit,
        _ => MenuInput::Redraw,
    }
}

fn enter_tui() -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    Ok(())
}

fn leave_tui() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run `body` between `enter` and `leave`. Once `enter` succeeds, `leave` runs
/// whatever `body` returns; the first error wins.
fn with_terminal_mode<T>(
    enter: impl FnOnce() -> Result<()>,
    leave: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
) -> Result<T> {
    enter()?;
    let result = body();
    let restored = leave();
    let value = result?;
    restored?;
    Ok(value)
}

/// Run the menu until the user exits
pub fn run_menu(entries: Vec<MenuEntry>) -> Result<()> {
    with_terminal_mode(enter_tui, leave_tui, || {
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
        run_menu_loop(&mut terminal, &entries)
    })
}

fn run_menu_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    entries: &[MenuEntry],
) -> Result<()> {
    let mut cursor = MenuCursor::new(entries.len());

    loop {
        terminal.draw(|frame| draw_menu(frame, entries, cursor))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match handle_key(key.code, &mut cursor, entries) {
                MenuInput::Redraw => {}
                MenuInput::Quit => return Ok(()),
                MenuInput::Launch(command) => {
                    leave_tui()?;
                    run_external(&command);
                    enter_tui()?;
                    terminal.clear()?;
                }
            }
        }
    }
}

/// Run with the terminal in cooked mode. Launch failures are shown, then acknowledged.
fn run_external(command: &ExternalCommand) {
    debug!(program = %command.program, args = ?command.args, "launching");
    match Command::new(&command.program).args(&command.args).status() {
        Ok(status) => debug!(%status, "command finished"),
        Err(err) => {
            if err.kind() == io::ErrorKind::NotFound {
                eprintln!("Command not found: {}", command.program);
            } else {
                eprintln!("Failed to run {}: {}", command.program, err);
            }
            if let Err(err) = pause_for_enter("Press ENTER to continue...") {
                debug!(error = %err, "pause prompt failed");
            }
        }
    }
}

fn draw_menu(frame: &mut Frame, entries: &[MenuEntry], cursor: MenuCursor) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| ListItem::new(Line::from(format!("  {}", entry.label))))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" utilkit ")
                .title_style(Style::default().fg(Color::Cyan).bold()),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(cursor.index()));
    frame.render_stateful_widget(list, chunks[0], &mut state);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        "  Use ↑/↓ to move - ENTER to select",
        Style::default().fg(Color::DarkGray),
    )]));
    frame.render_widget(footer, chunks[1]);
}
