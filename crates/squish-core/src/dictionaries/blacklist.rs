//! Strings that must never become an abbreviation.
//!
//! Anything here collides with text people type on purpose, so an expansion
//! tool would fire on it constantly.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Reserved strings: every single letter plus common short words.
pub static BLACKLIST: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Single letters
    set.extend([
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
        "s", "t", "u", "v", "w", "x", "y", "z",
    ]);

    // Two-letter words
    set.extend([
        "ah", "am", "an", "as", "at", "be", "by", "do", "eh", "go", "ha", "he", "hi", "if", "in",
        "is", "it", "me", "my", "no", "of", "oh", "ok", "on", "or", "so", "to", "up", "us", "we",
        "ya", "yo",
    ]);

    // Three-letter words
    set.extend([
        "all", "and", "any", "are", "but", "can", "day", "did", "few", "for", "get", "got", "had",
        "has", "her", "him", "his", "how", "its", "let", "lol", "may", "new", "not", "now", "off",
        "old", "one", "our", "out", "own", "put", "say", "see", "she", "the", "too", "two", "use",
        "was", "way", "who", "why", "yes", "yet", "you",
    ]);

    set
});
