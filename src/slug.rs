//! Topic to slug conversion.
//!
//! A slug is the filename stem shared by every artifact of a topic, so it has
//! to be safe in both paths and URLs and stable across runs.

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn separator_regex() -> &'static Regex {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid separator pattern"))
}

fn entity_regex() -> &'static Regex {
    static ENTITIES: OnceLock<Regex> = OnceLock::new();
    ENTITIES.get_or_init(|| {
        Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|([a-zA-Z]+));").expect("valid entity pattern")
    })
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "hellip" => '…',
        "ndash" => '–',
        "mdash" => '—',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        "eacute" => 'é',
        "egrave" => 'è',
        "agrave" => 'à',
        "ccedil" => 'ç',
        "uuml" => 'ü',
        "ouml" => 'ö',
        "auml" => 'ä',
        "szlig" => 'ß',
        _ => return None,
    };
    Some(c)
}

/// Replace HTML character references with the characters they name.
/// Unknown names and invalid code points are left as written.
fn decode_entities(text: &str) -> String {
    entity_regex()
        .replace_all(text, |caps: &Captures| {
            let decoded = if let Some(hex) = caps.get(1) {
                u32::from_str_radix(hex.as_str(), 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = caps.get(2) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| named_entity(name.as_str()))
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Drop thousands separators: a comma with a digit on both sides.
fn strip_digit_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| {
            !(c == ','
                && i > 0
                && chars[i - 1].is_ascii_digit()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit()))
        })
        .map(|(_, &c)| c)
        .collect()
}

/// Derive a slug from a topic.
///
/// HTML entities are decoded (`&amp;` becomes `&`), non-ASCII text is
/// transliterated (`café` becomes `cafe`), and the result is lowercased.
/// Commas between digits are removed so `1,000` stays `1000`; every other run
/// of non-alphanumeric characters collapses into a single `-`. Leading and
/// trailing separators are dropped. Applying `slugify` to its own output
/// returns it unchanged.
pub fn slugify(topic: &str) -> String {
    let decoded = decode_entities(topic);
    let ascii = deunicode::deunicode(&decoded).to_lowercase();
    let joined = strip_digit_commas(&ascii);
    separator_regex()
        .replace_all(&joined, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accented_topic() {
        assert_eq!(slugify("Le café"), "le-cafe");
    }

    #[test]
    fn test_separator_normalization() {
        assert_eq!(slugify("  Black   Holes: A Primer!! "), "black-holes-a-primer");
        assert_eq!(slugify("C'est la vie"), "c-est-la-vie");
        assert_eq!(slugify("under_score/and.dot"), "under-score-and-dot");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(slugify("Straße in München"), "strasse-in-munchen");
        assert_eq!(slugify("Ærøskøbing"), "aeroskobing");
    }

    #[test]
    fn test_thousands_separator_removed() {
        assert_eq!(slugify("Top 1,000 facts"), "top-1000-facts");
        assert_eq!(slugify("1,2,3 go"), "123-go");
        assert_eq!(slugify("Paris, 1889"), "paris-1889");
        assert_eq!(slugify("a,1"), "a-1");
    }

    #[test]
    fn test_html_entities_decoded() {
        assert_eq!(slugify("Tom &amp; Jerry"), "tom-jerry");
        assert_eq!(slugify("Caf&eacute; culture"), "cafe-culture");
        assert_eq!(slugify("Caf&#233; &#x26; cr&#xE8;me"), "cafe-creme");
        assert_eq!(slugify("&bogus; name"), "bogus-name");
    }

    #[test]
    fn test_no_alphanumerics_yields_empty() {
        assert_eq!(slugify("!!! ---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let topics = [
            "Le café",
            "The History of the Eiffel Tower (1889)",
            "  ¿Qué es la física cuántica?  ",
            "already-a-slug",
        ];

        for topic in topics {
            let once = slugify(topic);
            assert_eq!(once, slugify(topic));
            assert_eq!(slugify(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
