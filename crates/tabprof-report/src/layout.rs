//! Renderer-neutral table layout.

/// A titled grid of display strings.
///
/// `numeric_column` marks the column whose numbers are decimal-aligned.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub numeric_column: Option<usize>,
}

impl ReportTable {
    pub fn new<H: Into<String>>(headers: impl IntoIterator<Item = H>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            numeric_column: None,
        }
    }

    #[must_use]
    pub fn with_numeric_column(mut self, index: usize) -> Self {
        self.numeric_column = Some(index);
        self
    }

    pub fn push_row<C: Into<String>>(&mut self, cells: impl IntoIterator<Item = C>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    /// Rows with the numeric column padded so decimal points line up.
    pub fn aligned_rows(&self) -> Vec<Vec<String>> {
        let Some(index) = self.numeric_column else {
            return self.rows.clone();
        };
        let cells: Vec<&str> = self
            .rows
            .iter()
            .filter_map(|row| row.get(index).map(String::as_str))
            .collect();
        let mut aligned = decimal_align(&cells).into_iter();
        self.rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if let (Some(cell), Some(padded)) = (row.get_mut(index), aligned.next()) {
                    *cell = padded;
                }
                row
            })
            .collect()
    }
}

fn split_decimal(cell: &str) -> Option<(&str, &str)> {
    cell.parse::<f64>().ok()?;
    Some(match cell.find('.') {
        Some(dot) => cell.split_at(dot),
        None => (cell, ""),
    })
}

/// Pads numeric cells with spaces so their decimal points share a column.
///
/// Non-numeric cells are returned unchanged.
pub fn decimal_align(cells: &[&str]) -> Vec<String> {
    let parts: Vec<Option<(&str, &str)>> = cells.iter().map(|cell| split_decimal(cell)).collect();
    let whole = parts
        .iter()
        .flatten()
        .map(|(w, _)| w.chars().count())
        .max()
        .unwrap_or(0);
    let fraction = parts
        .iter()
        .flatten()
        .map(|(_, f)| f.chars().count())
        .max()
        .unwrap_or(0);
    cells
        .iter()
        .zip(parts)
        .map(|(cell, part)| match part {
            Some((w, f)) => format!("{w:>whole$}{f:<fraction$}"),
            None => (*cell).to_string(),
        })
        .collect()
}

/// Formats `value` with three decimals and comma-grouped thousands.
pub fn format_megabytes(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (whole, fraction) = fixed.split_at(fixed.find('.').unwrap_or(fixed.len()));
    let mut grouped = String::with_capacity(fixed.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}{fraction}")
}
