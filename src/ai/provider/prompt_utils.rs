//! Text utilities shared by providers.

/// Remove the spaces tokenizers leave before punctuation and clitics
/// (`"word ."` -> `"word."`, `"do n't"` -> `"don't"`) and trim the result.
pub fn clean_up_tokenization_spaces(text: &str) -> String {
    const REPLACEMENTS: &[(&str, &str)] = &[
        (" .", "."),
        (" ?", "?"),
        (" !", "!"),
        (" ,", ","),
        (" ' ", "'"),
        (" n't", "n't"),
        (" 'm", "'m"),
        (" 's", "'s"),
        (" 've", "'ve"),
        (" 're", "'re"),
    ];

    let mut cleaned = text.trim().to_string();
    for (from, to) in REPLACEMENTS {
        cleaned = cleaned.replace(from, to);
    }
    cleaned
}

/// First `max_chars` characters of `text`, for log lines
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
