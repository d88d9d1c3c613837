//! Identifier splitting.

/// Split a compound identifier into lowercase words.
///
/// Every upper-case character that does not already start the current word
/// opens a new one, so `fooBarBar` gives `foo`, `bar`, `bar` and an acronym
/// run such as `ID` splits letter by letter. Underscores and digits are kept
/// inside words. Joining the result reproduces the lower-cased input.
pub fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut start = 0usize;
    for (idx, c) in name.char_indices() {
        if c.is_uppercase() && idx != start {
            words.push(name[start..idx].to_lowercase());
            start = idx;
        }
    }
    words.push(name[start..].to_lowercase());
    words
}
