use crate::models::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted(usize),
    Replaced(usize),
}

impl Upsert {
    pub fn position(self) -> usize {
        match self {
            Upsert::Inserted(i) | Upsert::Replaced(i) => i,
        }
    }
}

/// Replaces the entry with the same name in place, or appends it.
/// Names are compared exactly, so "alice" and "Alice" are different people.
pub fn upsert(roster: &mut Vec<Entry>, entry: Entry) -> Upsert {
    match roster.iter().position(|e| e.name == entry.name) {
        Some(index) => {
            roster[index] = entry;
            Upsert::Replaced(index)
        }
        None => {
            roster.push(entry);
            Upsert::Inserted(roster.len() - 1)
        }
    }
}
