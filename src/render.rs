//! Pure projection of the board onto a frame: layout, hit-testing, and the
//! note card widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::{Line, Span, ToSpan},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use tui_input::Input;

use crate::models::Note;
use crate::theme::Theme;

pub const DELETE_GLYPH: &str = "x";
pub const ADD_LABEL: &str = "Add";
pub const CARD_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 6;

/// Screen areas for one frame. Recomputed from the terminal size both when
/// drawing and when resolving mouse clicks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regions {
    pub input: Rect,
    pub add_button: Rect,
    pub theme_button: Rect,
    pub grid: Rect,
    pub help: Rect,
    pub cards: Vec<(usize, Rect)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    AddButton,
    ThemeButton,
    DeleteGlyph(usize),
    Note(usize),
    Nothing,
}

impl Regions {
    pub fn compute(area: Rect, note_count: usize, selected: usize) -> Regions {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let toolbar = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Min(10),
                Constraint::Length(ADD_LABEL.len() as u16 + 4),
                Constraint::Length(14),
            ])
            .split(rows[0]);

        let grid = rows[1];
        let columns = (grid.width / CARD_WIDTH).max(1) as usize;
        let visible_rows = (grid.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = selected.min(note_count.saturating_sub(1)) / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        let cards = (0..note_count)
            .filter_map(|i| {
                let row = i / columns;
                if row < first_row || row >= first_row + visible_rows {
                    return None;
                }
                let x = grid.x + (i % columns) as u16 * CARD_WIDTH;
                let y = grid.y + (row - first_row) as u16 * CARD_HEIGHT;
                let card = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(grid);
                (!card.is_empty()).then_some((i, card))
            })
            .collect();

        Regions {
            input: toolbar[0],
            add_button: toolbar[1],
            theme_button: toolbar[2],
            grid,
            help: rows[2],
            cards,
        }
    }

    pub fn hit(&self, position: Position) -> Hit {
        if self.input.contains(position) {
            return Hit::Input;
        }
        if self.add_button.contains(position) {
            return Hit::AddButton;
        }
        if self.theme_button.contains(position) {
            return Hit::ThemeButton;
        }
        for &(index, card) in &self.cards {
            if delete_glyph_position(card) == position {
                return Hit::DeleteGlyph(index);
            }
            if card.contains(position) {
                return Hit::Note(index);
            }
        }
        Hit::Nothing
    }

    pub fn card(&self, index: usize) -> Option<Rect> {
        self.cards
            .iter()
            .find_map(|&(i, card)| (i == index).then_some(card))
    }
}

/// Cell of the delete glyph: last cell of the top border before the corner.
pub fn delete_glyph_position(card: Rect) -> Position {
    Position::new(card.right().saturating_sub(2), card.y)
}

/// Visual form of one note. While `editing` is set the body shows the edit
/// field instead of the note text.
pub struct NoteCard<'a> {
    note: &'a Note,
    theme: Theme,
    selected: bool,
    editing: Option<&'a Input>,
}

impl<'a> NoteCard<'a> {
    pub fn new(note: &'a Note, theme: Theme) -> NoteCard<'a> {
        NoteCard {
            note,
            theme,
            selected: false,
            editing: None,
        }
    }

    pub fn selected(mut self, selected: bool) -> NoteCard<'a> {
        self.selected = selected;
        self
    }

    pub fn editing(mut self, input: Option<&'a Input>) -> NoteCard<'a> {
        self.editing = input;
        self
    }

    fn style(&self) -> Style {
        let palette = self.theme.palette();
        match self.note.color {
            Some(color) => Style::new()
                .bg(self.theme.note_background(color))
                .fg(palette.note_text),
            None => palette.base,
        }
    }
}

impl Widget for NoteCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme.palette();
        let mut block = Block::bordered().style(self.style());
        if self.selected {
            block = block
                .border_set(border::THICK)
                .border_style(Style::new().fg(palette.accent).bold());
        }

        match self.editing {
            Some(input) => {
                let inner = block.inner(area);
                block.title_top("editing".italic()).render(area, buf);
                let scroll = input.visual_scroll(inner.width.max(1) as usize);
                Paragraph::new(input.value())
                    .style(Style::new().underlined())
                    .scroll((0, scroll as u16))
                    .render(inner, buf);
            }
            None => {
                let glyph = Line::from(DELETE_GLYPH.bold().red()).right_aligned();
                Paragraph::new(self.note.text.as_str())
                    .wrap(Wrap { trim: true })
                    .block(block.title_top(glyph))
                    .render(area, buf);
            }
        }
    }
}

/// Terminal cursor for an edit field drawn inside `card`.
pub fn edit_cursor(card: Rect, input: &Input) -> Position {
    let inner = Block::bordered().inner(card);
    let scroll = input.visual_scroll(inner.width.max(1) as usize);
    let x = input.visual_cursor().max(scroll) - scroll;
    Position::new(inner.x + x as u16, inner.y)
}

pub fn help_line(editing: bool, notes_focused: bool) -> Line<'static> {
    let entries: Vec<Span<'static>> = if editing {
        vec![
            "Enter".bold().yellow(),
            " save, ".to_span(),
            "Esc".bold().yellow(),
            " done".to_span(),
        ]
    } else if notes_focused {
        vec![
            "Esc/q".bold().yellow(),
            " exit, ".to_span(),
            "e".bold().yellow(),
            " edit, ".to_span(),
            "d".bold().red(),
            " delete, ".to_span(),
            "t".bold().yellow(),
            " theme, ".to_span(),
            "Tab".bold().yellow(),
            " new note".to_span(),
        ]
    } else {
        vec![
            "Esc".bold().yellow(),
            " exit, ".to_span(),
            "Enter".bold().yellow(),
            " add, ".to_span(),
            "Ctrl+T".bold().yellow(),
            " theme, ".to_span(),
            "Tab".bold().yellow(),
            " notes".to_span(),
        ]
    };
    Line::from_iter(entries).centered()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteColor;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn card_shows_text_and_trailing_glyph() {
        let note = Note::new("Buy milk", NoteColor::Yellow);
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        NoteCard::new(&note, Theme::Light).render(area, &mut buf);

        let glyph = delete_glyph_position(area);
        assert_eq!(buf[(glyph.x, glyph.y)].symbol(), DELETE_GLYPH);
        assert!(buffer_text(&buf).contains("Buy milk"));
        assert_eq!(
            buf[(2, 1)].bg,
            Theme::Light.note_background(NoteColor::Yellow)
        );
    }

    #[test]
    fn empty_note_keeps_its_glyph() {
        let note = Note::new("", NoteColor::Pink);
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        NoteCard::new(&note, Theme::Dark).render(area, &mut buf);

        let glyph = delete_glyph_position(area);
        assert_eq!(buf[(glyph.x, glyph.y)].symbol(), DELETE_GLYPH);
    }

    #[test]
    fn colorless_note_uses_base_style() {
        let note = Note {
            text: "plain".to_string(),
            color: None,
        };
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        NoteCard::new(&note, Theme::Light).render(area, &mut buf);

        let base = Theme::Light.palette().base;
        assert_eq!(Some(buf[(2, 1)].bg), base.bg);
        assert_eq!(Some(buf[(2, 1)].fg), base.fg);
        let glyph = delete_glyph_position(area);
        assert_eq!(buf[(glyph.x, glyph.y)].symbol(), DELETE_GLYPH);
        assert!(buffer_text(&buf).contains("plain"));
    }

    #[test]
    fn editing_card_shows_field_without_glyph() {
        let note = Note::new("draft", NoteColor::Blue);
        let input = Input::default().with_value("draft v2".to_string());
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        NoteCard::new(&note, Theme::Light)
            .editing(Some(&input))
            .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("draft v2"));
        let glyph = delete_glyph_position(area);
        assert_ne!(buf[(glyph.x, glyph.y)].symbol(), DELETE_GLYPH);
        assert_eq!(edit_cursor(area, &input), Position::new(9, 1));
    }

    #[test]
    fn cards_fill_rows_in_append_order() {
        let regions = Regions::compute(Rect::new(0, 0, 50, 20), 3, 0);
        let origins: Vec<_> = regions.cards.iter().map(|(i, r)| (*i, r.x, r.y)).collect();
        assert_eq!(origins, [(0, 0, 3), (1, 24, 3), (2, 0, 9)]);
    }

    #[test]
    fn grid_scrolls_to_keep_selection_visible() {
        // 16 rows of grid fit two rows of cards.
        let regions = Regions::compute(Rect::new(0, 0, 24, 20), 5, 4);
        let visible: Vec<_> = regions.cards.iter().map(|(i, _)| *i).collect();
        assert_eq!(visible, [3, 4]);
    }

    #[test]
    fn hit_testing_resolves_controls_and_cards() {
        let regions = Regions::compute(Rect::new(0, 0, 60, 20), 2, 0);
        assert_eq!(regions.hit(Position::new(1, 1)), Hit::Input);
        let add = regions.add_button;
        assert_eq!(regions.hit(Position::new(add.x + 1, add.y + 1)), Hit::AddButton);
        let theme = regions.theme_button;
        assert_eq!(regions.hit(Position::new(theme.x, theme.y)), Hit::ThemeButton);

        let card = regions.card(1).unwrap();
        assert_eq!(regions.hit(delete_glyph_position(card)), Hit::DeleteGlyph(1));
        assert_eq!(regions.hit(Position::new(card.x + 2, card.y + 2)), Hit::Note(1));
        assert_eq!(regions.hit(Position::new(59, 18)), Hit::Nothing);
    }
}
