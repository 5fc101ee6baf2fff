use std::collections::HashSet;

use crate::dto::Note;

/// Ordered in-memory copy of the user's notes.
///
/// Ids are unique within the list. Order is whatever the server returned,
/// followed by locally added notes in append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteList {
    notes: Vec<Note>,
}

impl NoteList {
    pub const fn new() -> Self {
        Self { notes: Vec::new() }
    }

    pub fn as_slice(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Discards the current contents. Repeated ids keep their first entry.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        let mut seen = HashSet::with_capacity(notes.len());
        let mut unique = Vec::with_capacity(notes.len());

        for note in notes {
            if seen.insert(note.id.clone()) {
                unique.push(note);
            } else {
                tracing::warn!("server returned note {} more than once, keeping the first", note.id);
            }
        }

        self.notes = unique;
    }

    /// Appends `note`, or replaces the entry already carrying its id.
    pub fn append(&mut self, note: Note) -> &Note {
        match self.notes.iter().position(|n| n.id == note.id) {
            Some(index) => {
                tracing::warn!("server returned already known note {}, replacing it", note.id);
                self.notes[index] = note;
                &self.notes[index]
            }
            None => {
                self.notes.push(note);
                &self.notes[self.notes.len() - 1]
            }
        }
    }

    /// Removes the entry with this id; no-op when absent.
    pub fn remove(&mut self, id: &str) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == id)?;
        Some(self.notes.remove(index))
    }

    /// Overwrites the editable fields of the first entry with this id.
    /// Returns `false` when no entry matched.
    pub fn apply_edit(&mut self, id: &str, title: &str, description: &str, tag: &str) -> bool {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return false;
        };

        note.title = title.to_string();
        note.description = description.to_string();
        note.tag = tag.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            owner: "alice".to_string(),
            title: title.to_string(),
            description: String::new(),
            tag: String::new(),
            created_at: Utc.with_ymd_and_hms(2023, 5, 9, 12, 0, 0).unwrap(),
        }
    }

    fn list(notes: Vec<Note>) -> NoteList {
        let mut list = NoteList::new();
        list.replace_all(notes);
        list
    }

    #[test]
    fn edit_overwrites_editable_fields_only() {
        let mut notes = list(vec![note("1", "A")]);

        assert!(notes.apply_edit("1", "B", "d", "t"));

        let edited = &notes.as_slice()[0];
        assert_eq!(edited.id, "1");
        assert_eq!(edited.title, "B");
        assert_eq!(edited.description, "d");
        assert_eq!(edited.tag, "t");
        assert_eq!(edited.owner, "alice");
        assert_eq!(edited.created_at, note("1", "A").created_at);
    }

    #[test]
    fn edit_leaves_other_entries_untouched() {
        let mut notes = list(vec![note("1", "A"), note("2", "B"), note("3", "C")]);
        let before = notes.clone();

        notes.apply_edit("2", "X", "d", "t");

        assert_eq!(notes.as_slice()[0], before.as_slice()[0]);
        assert_eq!(notes.as_slice()[2], before.as_slice()[2]);
        assert_eq!(notes.as_slice()[1].title, "X");
    }

    #[test]
    fn edit_of_unknown_id_is_noop() {
        let mut notes = list(vec![note("1", "A")]);
        let before = notes.clone();

        assert!(!notes.apply_edit("9", "B", "d", "t"));
        assert_eq!(notes, before);
    }

    #[test]
    fn delete_removes_only_matching_entry() {
        let mut notes = list(vec![note("1", "A"), note("2", "B")]);

        let removed = notes.remove("1").unwrap();

        assert_eq!(removed.id, "1");
        assert_eq!(notes.as_slice(), &[note("2", "B")]);
    }

    #[test]
    fn delete_of_unknown_id_is_noop() {
        let mut notes = list(vec![note("1", "A"), note("2", "B")]);
        let before = notes.clone();

        assert!(notes.remove("3").is_none());
        assert_eq!(notes, before);
    }

    #[test]
    fn append_grows_by_one_and_keeps_order() {
        let mut notes = NoteList::new();
        for (i, title) in ["A", "B", "C"].into_iter().enumerate() {
            let appended = notes.append(note(&i.to_string(), title)).clone();
            assert_eq!(notes.len(), i + 1);
            assert_eq!(notes.as_slice().last(), Some(&appended));
        }
        let titles: Vec<_> = notes.as_slice().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn append_keeps_ids_unique() {
        let mut notes = list(vec![note("1", "A")]);
        notes.append(note("1", "A2"));
        assert_eq!(notes.len(), 1);
        assert_eq!(notes.get("1").unwrap().title, "A2");
    }

    #[test]
    fn replace_all_keeps_first_of_repeated_ids() {
        let mut notes = NoteList::new();
        notes.replace_all(vec![note("1", "A"), note("2", "B"), note("1", "A2")]);

        assert_eq!(notes.as_slice(), &[note("1", "A"), note("2", "B")]);
    }

    #[test]
    fn replace_all_discards_previous_contents() {
        let mut notes = list(vec![note("1", "A")]);
        notes.append(note("2", "B"));

        notes.replace_all(vec![note("7", "Z")]);

        assert_eq!(notes.as_slice(), &[note("7", "Z")]);
    }
}
