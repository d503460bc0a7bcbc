//! Raw table row as lifted out of the results page.

/// One physical `<tr>` of the results table.
///
/// `bgcolor` and `lead_width` are only classification signals: the site
/// paints every row that starts a section with one of two stripe colors and
/// gives its first cell a fixed width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// Cell texts, whitespace collapsed
    pub cells: Vec<String>,

    /// Row background color (`bgcolor` attribute)
    pub bgcolor: Option<String>,

    /// Width attribute of the first cell
    pub lead_width: Option<String>,
}

impl RawRow {
    /// Create a row from its cell texts with no markers.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            bgcolor: None,
            lead_width: None,
        }
    }

    pub fn with_bgcolor(mut self, color: impl Into<String>) -> Self {
        self.bgcolor = Some(color.into());
        self
    }

    pub fn with_lead_width(mut self, width: impl Into<String>) -> Self {
        self.lead_width = Some(width.into());
        self
    }

    /// Text of the cell at `index`, or "" when the row is short.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }

    /// Whole-row text: non-empty cells joined by single spaces.
    pub fn text(&self) -> String {
        self.cells
            .iter()
            .flat_map(|c| c.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
