//! Plain-text rendering shared by the views.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::fmt;

/// One labelled value inside a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub label: &'static str,
    pub value: String,
}

/// Titled block of rows, the unit every view renders into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub rows: Vec<Row>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self { title: title.into(), rows: Vec::new() }
    }

    #[must_use]
    pub fn row(mut self, label: &'static str, value: impl Into<String>) -> Self {
        self.rows.push(Row { label, value: value.into() });
        self
    }

    /// Value of the first row labelled `label`.
    #[must_use]
    pub fn value(&self, label: &str) -> Option<&str> {
        self.rows.iter().find(|r| r.label == label).map(|r| r.value.as_str())
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        let width = self.rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
        for row in &self.rows {
            writeln!(f, "  {:<width$}  {}", row.label, row.value)?;
        }
        Ok(())
    }
}

#[must_use]
pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Comma-joined list, or `none` when empty.
#[must_use]
pub fn join_or_none(items: &[String]) -> String {
    if items.is_empty() { "none".to_owned() } else { items.join(", ") }
}
