//! Locale-aware string ordering for column sorts.
//!
//! Approximates the default collation of a Latin-script locale: base letters
//! first, then accents, then case (lowercase before uppercase), then code
//! points so that only identical strings compare equal.

use std::cmp::Ordering;

/// Compare two strings the way a user expects a sorted column to read.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| uppercase_marks(a).cmp(uppercase_marks(b)))
        .then_with(|| a.cmp(b))
}

/// Base letters only: case and accents folded, ligatures expanded.
fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in lowercase(s) {
        match c {
            'æ' => key.push_str("ae"),
            'œ' => key.push_str("oe"),
            'ß' => key.push_str("ss"),
            'þ' => key.push_str("th"),
            'ĳ' => key.push_str("ij"),
            other => key.push(strip_accent(other)),
        }
    }
    key
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn uppercase_marks(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'ď' | 'đ' | 'ð' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ğ' => 'g',
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => 'i',
        'ł' | 'ľ' => 'l',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ř' => 'r',
        'ś' | 'š' | 'ş' => 's',
        'ť' | 'ţ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zed", "alpha"), Ordering::Greater);
    }

    #[test]
    fn test_lowercase_before_uppercase() {
        assert_eq!(locale_cmp("acme", "Acme"), Ordering::Less);
    }

    #[test]
    fn test_accents_sort_with_base_letter() {
        assert_eq!(locale_cmp("Émile", "Fiona"), Ordering::Less);
        assert_eq!(locale_cmp("Emile", "Émile"), Ordering::Less);
    }

    #[test]
    fn test_ligatures_expand() {
        assert_eq!(locale_cmp("Æther", "Beta"), Ordering::Less);
        assert_eq!(locale_cmp("Adam", "Æther"), Ordering::Less);
        assert_eq!(locale_cmp("Œuvre", "Pablo"), Ordering::Less);
        assert_eq!(locale_cmp("Straße", "Strasze"), Ordering::Less);
        assert_eq!(locale_cmp("Þór", "Tyr"), Ordering::Less);
        assert_eq!(locale_cmp("ĳs", "ik"), Ordering::Less);
    }

    #[test]
    fn test_expansion_sorts_after_spelled_out_form() {
        assert_eq!(locale_cmp("Strasse", "Straße"), Ordering::Less);
        assert_eq!(locale_cmp("Straße", "Strasse"), Ordering::Greater);
    }

    #[test]
    fn test_equal_only_when_identical() {
        assert_eq!(locale_cmp("Initech", "Initech"), Ordering::Equal);
        assert_ne!(locale_cmp("Initech", "initech"), Ordering::Equal);
    }
}
