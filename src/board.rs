use rand::Rng;

use crate::errors::{Result, StickiesError};
use crate::models::{Note, NoteColor};
use crate::store::{NOTES_KEY, Store};

/// The notes of one session, in append order. Every mutation is followed by
/// a full save of the list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoteBoard {
    notes: Vec<Note>,
}

impl NoteBoard {
    /// Reads the persisted list. An absent key is an empty board; so is a
    /// value that no longer parses.
    pub fn load(store: &Store) -> Result<NoteBoard> {
        let notes = match store.read_json::<Vec<Note>>(NOTES_KEY) {
            Ok(notes) => notes.unwrap_or_default(),
            Err(err @ StickiesError::Serialization { .. }) => {
                tracing::warn!(error = %err, "discarding unreadable notes");
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        tracing::debug!(count = notes.len(), "loaded notes");

        Ok(NoteBoard { notes })
    }

    pub fn save(&self, store: &Store) -> Result<()> {
        store.write_json(NOTES_KEY, &self.notes)
    }

    /// Appends a note with a random palette color. Blank text is ignored and
    /// returns `None`.
    pub fn add<R: Rng>(
        &mut self,
        store: &Store,
        text: &str,
        rng: &mut R,
    ) -> Result<Option<usize>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let color = NoteColor::random(rng);
        self.notes.push(Note::new(text, color));
        tracing::debug!(%color, "added note");
        self.save(store)?;

        Ok(Some(self.notes.len() - 1))
    }

    pub fn delete(&mut self, store: &Store, index: usize) -> Result<Option<Note>> {
        if index >= self.notes.len() {
            return Ok(None);
        }

        let removed = self.notes.remove(index);
        tracing::debug!(index, "deleted note");
        self.save(store)?;

        Ok(Some(removed))
    }

    /// Replaces the text of a note, trimmed. Empty text is kept as-is and the
    /// color never changes.
    pub fn edit(&mut self, store: &Store, index: usize, new_text: &str) -> Result<bool> {
        let Some(note) = self.notes.get_mut(index) else {
            return Ok(false);
        };

        note.text = new_text.trim().to_string();
        tracing::debug!(index, "edited note");
        self.save(store)?;

        Ok(true)
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
