//! Hand-chosen phrase → abbreviation pairs.
//!
//! Keys use the normalized corpus form (lowercase, no punctuation), so
//! `"i dont know"` rather than `"I don't know"`. Export restores the grammar.

use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Presets that take precedence over any derived abbreviation.
pub static PRESET_ABBREVIATIONS: LazyLock<BTreeMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut map = BTreeMap::new();

        // Single words people already abbreviate in chat
        map.extend([
            ("about", "abt"),
            ("actually", "acly"),
            ("again", "ag"),
            ("already", "alr"),
            ("because", "bc"),
            ("before", "bf"),
            ("between", "btwn"),
            ("could", "cd"),
            ("definitely", "dfn"),
            ("everyone", "eo"),
            ("everything", "evt"),
            ("government", "govt"),
            ("important", "imp"),
            ("information", "info"),
            ("meeting", "mtg"),
            ("message", "msg"),
            ("people", "ppl"),
            ("please", "pls"),
            ("probably", "prob"),
            ("question", "qn"),
            ("really", "rly"),
            ("should", "shd"),
            ("someone", "sm"),
            ("something", "sth"),
            ("thanks", "thx"),
            ("though", "tho"),
            ("through", "thru"),
            ("tomorrow", "tmrw"),
            ("tonight", "tnt"),
            ("without", "wo"),
            ("would", "wd"),
            ("yesterday", "yday"),
        ]);

        // Well-known chat acronyms
        map.extend([
            ("as soon as possible", "asap"),
            ("by the way", "btw"),
            ("for example", "eg"),
            ("i dont know", "idk"),
            ("in my opinion", "imo"),
            ("let me know", "lmk"),
            ("right now", "rn"),
            ("sounds good", "sg"),
            ("thank you", "ty"),
            ("to be honest", "tbh"),
            ("what do you think", "wdyt"),
        ]);

        map
    });

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dictionaries::blacklist::BLACKLIST;

    #[test]
    fn contains_common_presets() {
        assert_eq!(PRESET_ABBREVIATIONS.get("again"), Some(&"ag"));
        assert_eq!(PRESET_ABBREVIATIONS.get("because"), Some(&"bc"));
        assert!(!PRESET_ABBREVIATIONS.contains_key("robot"));
    }

    #[test]
    fn preset_abbreviations_are_unique() {
        let values: HashSet<_> = PRESET_ABBREVIATIONS.values().collect();
        assert_eq!(values.len(), PRESET_ABBREVIATIONS.len());
    }

    #[test]
    fn preset_abbreviations_avoid_blacklist() {
        for (phrase, abbrev) in PRESET_ABBREVIATIONS.iter() {
            assert!(!BLACKLIST.contains(abbrev), "{phrase} -> {abbrev} is reserved");
        }
    }

    #[test]
    fn preset_abbreviations_save_typing() {
        for (phrase, abbrev) in PRESET_ABBREVIATIONS.iter() {
            assert!(
                abbrev.chars().count() + 2 <= phrase.chars().count(),
                "{phrase} -> {abbrev} saves too little"
            );
        }
    }
}
