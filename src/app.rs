use std::time::{Duration, Instant};

use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Position, Rect},
    style::{Style, Stylize},
    widgets::{Block, Paragraph},
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::board::NoteBoard;
use crate::errors::Result;
use crate::render::{ADD_LABEL, CARD_WIDTH, Hit, NoteCard, Regions, edit_cursor, help_line};
use crate::store::Store;
use crate::theme::Theme;

/// Two clicks on the same note within this window open the editor.
pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Delete(usize),
    BeginEdit(usize),
    CommitEdit,
    ToggleTheme,
    Select(usize),
    Move(isize),
    Focus(Focus),
    Quit,
    None,
}

struct Editing {
    index: usize,
    input: Input,
}

pub struct App {
    store: Store,
    board: NoteBoard,
    theme: Theme,
    input: Input,
    add_enabled: bool,
    focus: Focus,
    selected: usize,
    editing: Option<Editing>,
    last_click: Option<(usize, Instant)>,
    rng: StdRng,
}

impl App {
    /// Restores the theme first, then the notes.
    pub fn new(store: Store) -> Result<App> {
        Self::with_rng(store, StdRng::from_os_rng())
    }

    pub fn with_rng(store: Store, rng: StdRng) -> Result<App> {
        let theme = Theme::load(&store)?;
        let board = NoteBoard::load(&store)?;

        Ok(App {
            store,
            board,
            theme,
            input: Input::default(),
            add_enabled: false,
            focus: Focus::Input,
            selected: 0,
            editing: None,
            last_click: None,
            rng,
        })
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        crossterm::execute!(std::io::stdout(), EnableMouseCapture)?;
        let result = self.event_loop(terminal);
        crossterm::execute!(std::io::stdout(), DisableMouseCapture)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            let event = crossterm::event::read()?;
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);

            if self.handle_event(&event, area, Instant::now())? == Flow::Quit {
                // Leaving while editing still keeps the edit.
                self.apply(Action::CommitEdit)?;
                return Ok(());
            }
        }
    }

    pub fn handle_event(&mut self, event: &Event, area: Rect, now: Instant) -> Result<Flow> {
        let regions = Regions::compute(area, self.board.len(), self.selected);
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.key_action(*key, &regions);
                if action == Action::None {
                    self.forward_key(event);
                    return Ok(Flow::Continue);
                }
                self.apply(action)
            }
            Event::Mouse(mouse) => {
                for action in self.mouse_actions(*mouse, &regions, now) {
                    if self.apply(action)? == Flow::Quit {
                        return Ok(Flow::Quit);
                    }
                }
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn key_action(&self, key: KeyEvent, regions: &Regions) -> Action {
        let columns = (regions.grid.width / CARD_WIDTH).max(1) as isize;

        if self.editing.is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => Action::CommitEdit,
                _ => Action::None,
            };
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('t') {
            return Action::ToggleTheme;
        }

        match self.focus {
            Focus::Input => match key.code {
                KeyCode::Esc => Action::Quit,
                KeyCode::Enter => Action::Add,
                KeyCode::Tab => Action::Focus(Focus::Notes),
                _ => Action::None,
            },
            Focus::Notes => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
                KeyCode::Tab => Action::Focus(Focus::Input),
                KeyCode::Char('l') | KeyCode::Right => Action::Move(1),
                KeyCode::Char('h') | KeyCode::Left => Action::Move(-1),
                KeyCode::Char('j') | KeyCode::Down => Action::Move(columns),
                KeyCode::Char('k') | KeyCode::Up => Action::Move(-columns),
                KeyCode::Char('e') | KeyCode::Enter => Action::BeginEdit(self.selected),
                KeyCode::Char('d') | KeyCode::Char('x') | KeyCode::Delete => {
                    Action::Delete(self.selected)
                }
                KeyCode::Char('t') => Action::ToggleTheme,
                _ => Action::None,
            },
        }
    }

    /// Keys without a binding go to whichever text field is active.
    fn forward_key(&mut self, event: &Event) {
        if let Some(editing) = self.editing.as_mut() {
            editing.input.handle_event(event);
        } else if self.focus == Focus::Input {
            self.input.handle_event(event);
            self.add_enabled = !self.input.value().trim().is_empty();
        }
    }

    fn mouse_actions(&mut self, mouse: MouseEvent, regions: &Regions, now: Instant) -> Vec<Action> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Vec::new();
        }

        let hit = regions.hit(Position::new(mouse.column, mouse.row));
        let mut actions = Vec::new();

        // A click anywhere but the note being edited ends the edit. That
        // note shows no delete glyph, so its glyph cell only ends the edit.
        if let Some(editing) = &self.editing {
            if hit == Hit::Note(editing.index) {
                return actions;
            }
            actions.push(Action::CommitEdit);
            if hit == Hit::DeleteGlyph(editing.index) {
                return actions;
            }
        }

        match hit {
            Hit::Input => actions.push(Action::Focus(Focus::Input)),
            Hit::AddButton => actions.push(Action::Add),
            Hit::ThemeButton => actions.push(Action::ToggleTheme),
            Hit::DeleteGlyph(index) => actions.push(Action::Delete(index)),
            Hit::Note(index) => {
                let double = matches!(
                    self.last_click,
                    Some((last, at)) if last == index && now.duration_since(at) <= DOUBLE_CLICK
                );
                if double {
                    self.last_click = None;
                    actions.push(Action::BeginEdit(index));
                } else {
                    self.last_click = Some((index, now));
                    actions.push(Action::Select(index));
                }
            }
            Hit::Nothing => {}
        }

        actions
    }

    pub fn apply(&mut self, action: Action) -> Result<Flow> {
        match action {
            Action::Add => {
                if let Some(index) =
                    self.board
                        .add(&self.store, self.input.value(), &mut self.rng)?
                {
                    self.input.reset();
                    self.add_enabled = false;
                    self.selected = index;
                }
            }
            Action::Delete(index) => {
                if self.board.delete(&self.store, index)?.is_some()
                    && (self.selected > index || self.selected >= self.board.len())
                {
                    self.selected = self.selected.saturating_sub(1);
                }
                self.last_click = None;
            }
            Action::BeginEdit(index) => {
                if let Some(note) = self.board.get(index) {
                    self.editing = Some(Editing {
                        index,
                        input: Input::default().with_value(note.text.clone()),
                    });
                    self.selected = index;
                    self.focus = Focus::Notes;
                }
            }
            Action::CommitEdit => {
                if let Some(editing) = self.editing.take() {
                    self.board
                        .edit(&self.store, editing.index, editing.input.value())?;
                }
            }
            Action::ToggleTheme => {
                self.theme.toggle(&self.store)?;
            }
            Action::Select(index) => {
                self.selected = index;
                self.focus = Focus::Notes;
            }
            Action::Move(delta) => {
                if !self.board.is_empty() {
                    let last = self.board.len() as isize - 1;
                    let target = self.selected as isize + delta;
                    if (0..=last).contains(&target) {
                        self.selected = target as usize;
                    }
                }
            }
            Action::Focus(focus) => self.focus = focus,
            Action::Quit => return Ok(Flow::Quit),
            Action::None => {}
        }

        Ok(Flow::Continue)
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let regions = Regions::compute(area, self.board.len(), self.selected);
        let palette = self.theme.palette();
        let editing = self.editing.is_some();

        frame.render_widget(Block::new().style(palette.base), area);

        let mut input_block = Block::bordered().title("New note");
        if self.focus == Focus::Input && !editing {
            input_block = input_block.border_style(Style::new().fg(palette.accent));
            let width = regions.input.width.max(3) - 3;
            let scroll = self.input.visual_scroll(width as usize);
            let x = self.input.visual_cursor().max(scroll) - scroll + 1;
            frame.set_cursor_position((regions.input.x + x as u16, regions.input.y + 1));
            frame.render_widget(
                Paragraph::new(self.input.value())
                    .scroll((0, scroll as u16))
                    .block(input_block),
                regions.input,
            );
        } else {
            frame.render_widget(
                Paragraph::new(self.input.value()).block(input_block),
                regions.input,
            );
        }

        let add_style = if self.add_enabled {
            Style::new().fg(palette.accent).bold()
        } else {
            Style::new().fg(palette.muted)
        };
        frame.render_widget(
            Paragraph::new(ADD_LABEL)
                .centered()
                .style(add_style)
                .block(Block::bordered().border_style(add_style)),
            regions.add_button,
        );
        frame.render_widget(
            Paragraph::new(self.theme.toggle_label())
                .centered()
                .block(Block::bordered()),
            regions.theme_button,
        );

        if self.board.is_empty() {
            frame.render_widget(
                Paragraph::new("No notes yet".italic())
                    .centered()
                    .style(Style::new().fg(palette.muted)),
                regions.grid,
            );
        }

        for &(index, card) in &regions.cards {
            let Some(note) = self.board.get(index) else {
                continue;
            };
            let edit_input = self
                .editing
                .as_ref()
                .filter(|e| e.index == index)
                .map(|e| &e.input);
            if let Some(input) = edit_input {
                frame.set_cursor_position(edit_cursor(card, input));
            }
            frame.render_widget(
                NoteCard::new(note, self.theme)
                    .selected(self.focus == Focus::Notes && index == self.selected)
                    .editing(edit_input),
                card,
            );
        }

        frame.render_widget(help_line(editing, self.focus == Focus::Notes), regions.help);
    }

    pub fn board(&self) -> &NoteBoard {
        &self.board
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn input_value(&self) -> &str {
        self.input.value()
    }

    pub fn add_enabled(&self) -> bool {
        self.add_enabled
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Index and current field value of the note being edited.
    pub fn editing(&self) -> Option<(usize, &str)> {
        self.editing
            .as_ref()
            .map(|e| (e.index, e.input.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_rng(Store::in_memory().unwrap(), StdRng::seed_from_u64(1)).unwrap()
    }

    #[test]
    fn add_with_empty_input_keeps_board_empty() {
        let mut app = app();
        app.apply(Action::Add).unwrap();
        assert!(app.board().is_empty());
        assert!(!app.add_enabled());
    }

    #[test]
    fn delete_before_selection_shifts_it() {
        let mut app = app();
        for text in ["a", "b", "c"] {
            app.input = Input::default().with_value(text.to_string());
            app.apply(Action::Add).unwrap();
        }
        assert_eq!(app.selected(), 2);

        app.apply(Action::Delete(0)).unwrap();
        assert_eq!(app.selected(), 1);
        assert_eq!(app.board().get(1).unwrap().text, "c");

        app.apply(Action::Delete(1)).unwrap();
        assert_eq!(app.selected(), 0);
        app.apply(Action::Delete(0)).unwrap();
        assert_eq!(app.selected(), 0);
        assert!(app.board().is_empty());
    }

    #[test]
    fn move_stays_within_board() {
        let mut app = app();
        app.apply(Action::Move(1)).unwrap();
        assert_eq!(app.selected(), 0);

        for text in ["a", "b"] {
            app.input = Input::default().with_value(text.to_string());
            app.apply(Action::Add).unwrap();
        }
        app.apply(Action::Move(-1)).unwrap();
        assert_eq!(app.selected(), 0);
        app.apply(Action::Move(-1)).unwrap();
        assert_eq!(app.selected(), 0);
        app.apply(Action::Move(5)).unwrap();
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn begin_edit_prefills_current_text() {
        let mut app = app();
        app.input = Input::default().with_value("hello".to_string());
        app.apply(Action::Add).unwrap();

        app.apply(Action::BeginEdit(0)).unwrap();
        assert_eq!(app.editing(), Some((0, "hello")));
        assert_eq!(app.focus(), Focus::Notes);

        app.apply(Action::BeginEdit(9)).unwrap();
        assert_eq!(app.editing(), Some((0, "hello")));
    }
}
