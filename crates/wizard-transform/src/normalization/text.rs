/// Lowercases `value` and uppercases the first character of every
/// whitespace-separated word. Words are joined with single spaces.
pub fn capitalize_words(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
