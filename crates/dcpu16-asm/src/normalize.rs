/// A source line with comments, whitespace and any label marker removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    /// Label defined by a leading `:name`, upper-cased.
    pub label: Option<String>,
    /// Upper-cased instruction text without whitespace; empty for blank lines.
    pub text: String,
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn normalize(raw: &str) -> Normalized {
    let code = raw.split(';').next().unwrap_or("");
    let mut rest = code.trim_start();

    let mut label = None;
    if let Some(after) = rest.strip_prefix(':') {
        let end = after.find(|c| !is_label_char(c)).unwrap_or(after.len());
        let name = &after[..end];
        if !name.is_empty() {
            label = Some(name.to_ascii_uppercase());
        }
        rest = &after[end..];
    }

    let text = rest
        .chars()
        .filter(|c| c.is_ascii_graphic())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    Normalized { label, text }
}
