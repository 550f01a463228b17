//! Tagged optionals for record fields.

/// A field that arrives as free text and is interpreted by a later stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell<T> {
    /// Empty or a recognised null token.
    Absent,
    /// Input text not yet interpreted.
    Raw(String),
    /// Interpreted value.
    Value(T),
}

impl<T> Cell<T> {
    /// Build a cell from loader text; `None` means absent.
    pub fn from_input(value: Option<&str>) -> Self {
        match value {
            Some(text) => Cell::Raw(text.to_string()),
            None => Cell::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Cell::Absent)
    }

    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    /// The interpreted value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Cell::Value(value) => Some(value),
            Cell::Absent | Cell::Raw(_) => None,
        }
    }

    /// Interpret a raw cell in place.
    ///
    /// Unparseable text becomes `Absent`. Returns true when raw text was
    /// discarded.
    pub fn resolve_with<F>(&mut self, parse: F) -> bool
    where
        F: FnOnce(&str) -> Option<T>,
    {
        let Cell::Raw(text) = self else {
            return false;
        };
        match parse(text) {
            Some(value) => {
                *self = Cell::Value(value);
                false
            }
            None => {
                *self = Cell::Absent;
                true
            }
        }
    }
}

impl<T> Default for Cell<T> {
    fn default() -> Self {
        Cell::Absent
    }
}

/// A value with a missing-value policy.
///
/// Before backfill only `Missing` and `Observed` occur; afterwards only
/// `Observed` and `Filled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backfill<T> {
    Missing,
    /// Present in the source.
    Observed(T),
    /// Supplied by policy (default or sentinel).
    Filled(T),
}

impl<T: Copy> Backfill<T> {
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Backfill::Observed(value),
            None => Backfill::Missing,
        }
    }

    pub fn value(&self) -> Option<T> {
        match self {
            Backfill::Observed(value) | Backfill::Filled(value) => Some(*value),
            Backfill::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Backfill::Missing)
    }

    /// Replace `Missing` with `Filled(fallback)`. Returns true if filled.
    pub fn fill(&mut self, fallback: T) -> bool {
        if self.is_missing() {
            *self = Backfill::Filled(fallback);
            true
        } else {
            false
        }
    }
}

impl<T> Default for Backfill<T> {
    fn default() -> Self {
        Backfill::Missing
    }
}
