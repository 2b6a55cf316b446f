use crate::types::storage_types::{TableSchema, Tuple};

/// Renders a result set as a text table.
///
/// ```text
///  id | name
/// ----+------
///  1  | Alice
/// (1 row)
/// ```
pub fn format_table(schema: &TableSchema, tuples: &[Tuple]) -> String {
    if tuples.is_empty() {
        return "(0 rows)".to_string();
    }

    // step 1: header names and initial widths
    let headers: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();

    // step 2: render every cell and widen columns to fit
    let cells: Vec<Vec<String>> = tuples
        .iter()
        .map(|t| {
            (0..headers.len())
                .map(|i| t.value(i).map(|v| v.to_string()).unwrap_or_else(|| "NULL".into()))
                .collect()
        })
        .collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    // step 3: header, separator, rows, count line
    let mut out = String::new();
    push_row(&mut out, &headers, &widths);
    push_separator(&mut out, &widths);
    for row in &cells {
        let row: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut out, &row, &widths);
    }
    let n = tuples.len();
    out.push_str(&format!("({} {})", n, if n == 1 { "row" } else { "rows" }));
    out
}

fn push_row(out: &mut String, values: &[&str], widths: &[usize]) {
    out.push(' ');
    for (i, (value, width)) in values.iter().zip(widths).enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        out.push_str(&format!("{:<width$}", value, width = *width));
    }
    out.push('\n');
}

fn push_separator(out: &mut String, widths: &[usize]) {
    out.push('-');
    let dashes: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&dashes.join("-+-"));
    out.push('\n');
}
