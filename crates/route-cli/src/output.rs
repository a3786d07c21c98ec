use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

/// Columns whose header is listed in `right` are right-aligned (costs, counts).
pub fn print_table(headers: &[&str], right: &[&str], rows: Vec<Vec<String>>) {
    print!("{}", render_table(headers, right, &rows));
}

fn render_table(headers: &[&str], right: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = format_row(headers, headers, right, &widths);
    let sep: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&format!("{}\n", sep.join("  ")));
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_row(&cells, headers, right, &widths));
    }
    out
}

fn format_row(cells: &[&str], headers: &[&str], right: &[&str], widths: &[usize]) -> String {
    let line: Vec<String> = cells
        .iter()
        .zip(headers.iter().zip(widths))
        .map(|(cell, (header, &width))| {
            if right.contains(header) {
                format!("{cell:>width$}")
            } else {
                format!("{cell:<width$}")
            }
        })
        .collect();
    format!("{}\n", line.join("  ").trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aligns_columns() {
        let rows = vec![
            vec!["gemini-flash".to_string(), "$0.0003".to_string()],
            vec!["claude-opus".to_string(), "$0.10".to_string()],
        ];
        let out = render_table(&["TIER", "COST"], &["COST"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "TIER             COST");
        assert_eq!(lines[1], "------------  -------");
        assert_eq!(lines[2], "gemini-flash  $0.0003");
        assert_eq!(lines[3], "claude-opus     $0.10");
    }
}
