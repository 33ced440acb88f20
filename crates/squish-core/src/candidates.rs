//! Abbreviation candidates for a single phrase.
//!
//! Candidates come back most-preferred first: acronyms for multi-word
//! phrases, then short prefixes, then head/tail combinations. Nothing is
//! filtered here; length and collision checks belong to
//! [`crate::assignment`].

/// Candidate abbreviations for `phrase`, most preferred first.
///
/// Phrases shorter than two characters return themselves as the only
/// candidate. The second character deliberately appears twice in the list;
/// the assignment engine skips the repeat because it is already used or
/// already rejected.
pub fn possible_abbreviations(phrase: &str) -> Vec<String> {
    if phrase.chars().count() < 2 {
        return vec![phrase.to_string()];
    }

    let words: Vec<&str> = phrase.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(14);

    if let [first, second, ..] = words.as_slice() {
        out.push(words.iter().map(|w| head(w, 1)).collect());
        out.push(head(first, 1) + &head(second, 1));
        out.push(head(first, 2) + &head(second, 1));
    }

    let joined: Vec<char> = words.iter().flat_map(|w| w.chars()).collect();
    let Some((&first, &last)) = joined.first().zip(joined.last()) else {
        return vec![phrase.to_string()];
    };
    let prefix = |n: usize| -> String { joined.iter().take(n).collect() };
    let suffix = |n: usize| -> String { joined[joined.len().saturating_sub(n)..].iter().collect() };

    out.push(first.to_string());
    out.push(format!("{first}{last}"));
    out.push(prefix(2));
    if let Some(second) = joined.get(1) {
        out.push(second.to_string());
    }
    out.push(last.to_string());
    if let Some(second) = joined.get(1) {
        out.push(second.to_string());
    }
    out.push(prefix(3));
    out.push(format!("{}{last}", prefix(2)));
    out.push(format!("{first}{}", suffix(2)));
    out.push(prefix(4));
    out.push(prefix(2) + &suffix(2));

    out
}

/// First `n` characters of a word.
fn head(word: &str, n: usize) -> String {
    word.chars().take(n).collect()
}
