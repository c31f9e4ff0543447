//! Positional line diff
//!
//! Lines are compared index by index, with no attempt to find a minimal edit
//! script: an inserted line near the top shows every following line as changed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    Removed,
    Added,
}

/// One changed line; `index` is the zero-based line position on both sides
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub index: usize,
    pub change: LineChange,
    pub line: String,
}

impl TextEdit {
    fn removed(index: usize, line: &str) -> Self {
        TextEdit {
            index,
            change: LineChange::Removed,
            line: line.to_string(),
        }
    }

    fn added(index: usize, line: &str) -> Self {
        TextEdit {
            index,
            change: LineChange::Added,
            line: line.to_string(),
        }
    }

    pub fn symbol(&self) -> char {
        match self.change {
            LineChange::Removed => '-',
            LineChange::Added => '+',
        }
    }
}

impl std::fmt::Display for TextEdit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.symbol(), self.line)
    }
}

pub fn positional_diff(old: &str, new: &str) -> Vec<TextEdit> {
    let old_lines = old.lines().collect::<Vec<_>>();
    let new_lines = new.lines().collect::<Vec<_>>();
    let length = old_lines.len().max(new_lines.len());

    let mut edits = Vec::new();
    for index in 0..length {
        match (old_lines.get(index), new_lines.get(index)) {
            (Some(old), Some(new)) if old == new => {}
            (Some(old), Some(new)) => {
                edits.push(TextEdit::removed(index, old));
                edits.push(TextEdit::added(index, new));
            }
            (Some(old), None) => edits.push(TextEdit::removed(index, old)),
            (None, Some(new)) => edits.push(TextEdit::added(index, new)),
            (None, None) => {}
        }
    }

    edits
}
