/// Grid Module
///
/// This module renders a header row plus data rows as human-readable
/// tabular text, either plain (aligned columns with a header underline)
/// or fancy (boxed with border lines).

/// Output style for [`Grid::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStyle {
    Plain,
    Fancy,
}

/// A header row plus data rows, rendered as text.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Grid {
    /// Creates a new, empty Grid.
    pub fn new() -> Self {
        Grid::default()
    }

    /// Sets the header row.
    pub fn set_headers(&mut self, headers: Vec<String>) {
        self.headers = headers;
    }

    /// Appends one data row.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Renders the grid in the requested style. An empty grid renders as
    /// an empty string.
    pub fn render(&self, style: GridStyle) -> String {
        if self.headers.is_empty() && self.rows.is_empty() {
            return String::new();
        }
        let widths = self.column_widths();
        match style {
            GridStyle::Plain => self.render_plain(&widths),
            GridStyle::Fancy => self.render_fancy(&widths),
        }
    }

    fn column_widths(&self) -> Vec<usize> {
        let column_count = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; column_count];
        for (i, header) in self.headers.iter().enumerate() {
            widths[i] = header.len();
        }
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }
        widths
    }

    fn render_plain(&self, widths: &[usize]) -> String {
        let mut output = String::new();
        if !self.headers.is_empty() {
            output.push_str(&padded_line(&self.headers, widths, " | "));
            output.push('\n');
            let underline: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            output.push_str(&underline.join("-+-"));
            output.push('\n');
        }
        for row in &self.rows {
            output.push_str(&padded_line(row, widths, " | "));
            output.push('\n');
        }
        output
    }

    fn render_fancy(&self, widths: &[usize]) -> String {
        let border: String = {
            let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
            format!("+{}+", segments.join("+"))
        };

        let mut output = String::new();
        output.push_str(&border);
        output.push('\n');
        if !self.headers.is_empty() {
            output.push_str(&format!("| {} |", padded_line(&self.headers, widths, " | ")));
            output.push('\n');
            output.push_str(&border);
            output.push('\n');
        }
        for row in &self.rows {
            output.push_str(&format!("| {} |", padded_line(row, widths, " | ")));
            output.push('\n');
        }
        output.push_str(&border);
        output.push('\n');
        output
    }
}

/// Pads each cell to its column width and joins with the separator. Rows
/// shorter than the widest row are padded with empty cells.
fn padded_line(cells: &[String], widths: &[usize], separator: &str) -> String {
    let empty = String::new();
    widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let cell = cells.get(i).unwrap_or(&empty);
            format!("{cell:<w$}")
        })
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> Grid {
        let mut grid = Grid::new();
        grid.set_headers(vec!["ID".to_string(), "Name".to_string()]);
        grid.add_row(vec!["1".to_string(), "Alice".to_string()]);
        grid.add_row(vec!["2".to_string(), "Bob".to_string()]);
        grid
    }

    #[test]
    fn test_render_empty_grid() {
        let grid = Grid::new();
        assert_eq!(grid.render(GridStyle::Plain), "");
        assert_eq!(grid.render(GridStyle::Fancy), "");
    }

    #[test]
    fn test_render_plain() {
        let rendered = sample_grid().render(GridStyle::Plain);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "ID | Name ");
        assert_eq!(lines[1], "---+------");
        assert_eq!(lines[2], "1  | Alice");
        assert_eq!(lines[3], "2  | Bob  ");
    }

    #[test]
    fn test_render_fancy() {
        let rendered = sample_grid().render(GridStyle::Fancy);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "+----+-------+");
        assert_eq!(lines[1], "| ID | Name  |");
        assert_eq!(lines[2], "+----+-------+");
        assert_eq!(lines[3], "| 1  | Alice |");
        assert_eq!(lines[4], "| 2  | Bob   |");
        assert_eq!(lines[5], "+----+-------+");
    }

    #[test]
    fn test_render_without_headers() {
        let mut grid = Grid::new();
        grid.add_row(vec!["a".to_string(), "b".to_string()]);
        let rendered = grid.render(GridStyle::Plain);
        assert_eq!(rendered, "a | b\n");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut grid = sample_grid();
        grid.add_row(vec!["3".to_string()]);
        let rendered = grid.render(GridStyle::Plain);
        assert!(rendered.lines().last().unwrap().starts_with("3  |"));
    }
}
