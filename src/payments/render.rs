//! Small HTML fragment builders. Every interpolated value is escaped.

use std::fmt::Write;

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// `<input>` whose name carries the record index, e.g. `bacs_iban[0]`.
pub fn indexed_text_input(name: &str, index: usize, value: &str) -> String {
    format!(
        r#"<input type="text" value="{}" name="{}[{}]" />"#,
        escape_html(value),
        escape_html(name),
        index
    )
}

pub fn table_header(labels: &[&str]) -> String {
    let mut out = String::from("<thead><tr>");
    for label in labels {
        let _ = write!(out, "<th>{}</th>", escape_html(label));
    }
    out.push_str("</tr></thead>");
    out
}

/// `<li>` for one labelled value; empty when there is no value.
pub fn detail_item(class: &str, label: &str, value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    format!(
        r#"<li class="{}">{}: <strong>{}</strong></li>"#,
        escape_html(class),
        escape_html(label),
        escape_html(value)
    )
}

/// Turn plain-text instructions into paragraphs, one per blank-line block.
pub fn paragraphs(text: &str, class: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            let lines: Vec<String> = block.lines().map(|l| escape_html(l.trim())).collect();
            format!(
                r#"<p class="{}">{}</p>"#,
                escape_html(class),
                lines.join("<br />")
            )
        })
        .collect()
}
