use deunicode::deunicode;

pub fn normalize_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let folded = deunicode(&raw.replace('\u{2019}', "'"));
    let spaced = folded.replace('\'', " ");

    condense_whitespace(&spaced).to_lowercase()
}

pub fn condense_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<&str>>().join(" ")
}
