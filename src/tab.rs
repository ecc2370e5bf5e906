//! The crontab document: an ordered list of comment, blank and entry lines.
//!
//! Comments and blanks are kept byte-for-byte; entry lines are owned as
//! structured [`CronEntry`] values and come back in canonical form. Because
//! the document is a single ordered list, serialization order is structural
//! rather than reconstructed.

use crate::entry::CronEntry;
use crate::error::CronResult;
use log::debug;
use std::fmt;

/// One physical line of a crontab document.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Line {
    /// Full-line comment, stored verbatim
    Comment(String),

    /// Empty or whitespace-only line, stored verbatim
    Blank(String),

    /// Schedule entry, rendered canonically
    Entry(CronEntry),
}

/// A crontab document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CronTab {
    lines: Vec<Line>,
}

impl CronTab {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a crontab text blob.
    ///
    /// Whole-document operation: a malformed entry aborts the parse with its
    /// 1-based line number and no partially populated document is returned.
    pub fn parse(text: &str) -> CronResult<Self> {
        let mut lines = Vec::new();
        for (number, raw) in text.lines().enumerate() {
            let line = if raw.trim().is_empty() {
                Line::Blank(raw.to_string())
            } else if raw.trim_start().starts_with('#') {
                Line::Comment(raw.to_string())
            } else {
                Line::Entry(CronEntry::parse(raw).map_err(|err| err.at_line(number + 1))?)
            };
            lines.push(line);
        }
        let tab = Self { lines };
        debug!(
            "parsed crontab: {} lines, {} entries",
            tab.lines.len(),
            tab.len()
        );
        Ok(tab)
    }

    /// All physical lines, in document order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Iterate over the entries, in document order.
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            inner: self.lines.iter(),
        }
    }

    /// Iterate mutably over the entries, in document order.
    pub fn entries_mut(&mut self) -> EntriesMut<'_> {
        EntriesMut {
            inner: self.lines.iter_mut(),
        }
    }

    /// Number of entries (comment and blank lines do not count).
    pub fn len(&self) -> usize {
        self.entries().count()
    }

    /// Whether the document holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a default entry line and return it for mutation.
    pub fn new_entry(&mut self, command: impl Into<String>) -> &mut CronEntry {
        self.lines.push(Line::Entry(CronEntry::new(command)));
        match self.lines.last_mut() {
            Some(Line::Entry(entry)) => entry,
            _ => unreachable!("entry line was just appended"),
        }
    }

    /// Remove the `index`th entry (0-based, counting entries only) and hand
    /// its ownership back. Comment and blank lines are untouched.
    pub fn remove(&mut self, index: usize) -> Option<CronEntry> {
        let position = self
            .lines
            .iter()
            .enumerate()
            .filter_map(|(i, line)| matches!(line, Line::Entry(_)).then_some(i))
            .nth(index)?;
        match self.lines.remove(position) {
            Line::Entry(entry) => Some(entry),
            _ => unreachable!("position points at an entry line"),
        }
    }

    /// Render the whole document.
    ///
    /// Comment and blank lines verbatim, entry lines canonical, exactly one
    /// trailing newline. The empty document renders as the empty string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Comment(text) | Line::Blank(text) => out.push_str(text),
                Line::Entry(entry) => out.push_str(&entry.render()),
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for CronTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Iterator over a document's entries.
pub struct Entries<'a> {
    inner: std::slice::Iter<'a, Line>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a CronEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }
}

/// Mutable iterator over a document's entries.
pub struct EntriesMut<'a> {
    inner: std::slice::IterMut<'a, Line>,
}

impl<'a> Iterator for EntriesMut<'a> {
    type Item = &'a mut CronEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|line| match line {
            Line::Entry(entry) => Some(entry),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a CronTab {
    type Item = &'a CronEntry;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

impl<'a> IntoIterator for &'a mut CronTab {
    type Item = &'a mut CronEntry;
    type IntoIter = EntriesMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries_mut()
    }
}
