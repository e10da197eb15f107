use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display width in characters; medication names are often not ASCII.
fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, w: usize) -> String {
    let fill = w.saturating_sub(width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header. Trailing padding on the last column is trimmed.
pub fn print_table(headers: &[&str], rows: Vec<Vec<String>>) {
    let mut widths: Vec<usize> = headers.iter().map(|h| width(h)).collect();
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let render = |cells: Vec<String>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad(c, w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{}", line.trim_end());
    };

    render(headers.iter().map(|h| h.to_string()).collect());
    render(widths.iter().map(|&w| "-".repeat(w)).collect());
    for row in rows {
        render(row);
    }
}

/// `label: value` lines with the values aligned.
pub fn print_fields(fields: &[(&str, String)]) {
    let w = fields.iter().map(|(k, _)| width(k)).max().unwrap_or(0);
    for (k, v) in fields {
        println!("  {}  {v}", pad(&format!("{k}:"), w + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_counts_characters_not_bytes() {
        assert_eq!(pad("Vía", 5), "Vía  ");
        assert_eq!(pad("toolong", 3), "toolong");
    }
}
