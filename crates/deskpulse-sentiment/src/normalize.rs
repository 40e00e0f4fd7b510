//! Text normalization applied before any scoring pass.

/// Lower-case the input and strip every character that is not alphanumeric
/// or whitespace. Pure and total: empty in, empty out.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}
