//! Free-text normalization for lookups.

/// Canonical form of a city name: trimmed, lower-cased, then title-cased.
///
/// A letter is upper-cased when the character before it is not a letter, so word breaks
/// include spaces, hyphens and apostrophes (`"new-delhi"` becomes `"New-Delhi"`). Inner
/// whitespace is kept as-is.
pub fn normalize_city(input: &str) -> String {
    title_case(&input.trim().to_lowercase())
}

fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_letter = false;

    for c in input.chars() {
        if !c.is_alphabetic() {
            out.push(c);
        } else if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            // Multi-char uppercase mappings ('ß' -> "SS", 'ᾷ' -> "Α\u{342}Ι") are title-cased
            // as if they had been typed out.
            for (i, upper) in c.to_uppercase().enumerate() {
                if i == 0 || !ends_in_letter(&out) {
                    out.push(upper);
                } else {
                    out.extend(upper.to_lowercase());
                }
            }
        }
        // Word breaks are judged on the emitted text, which may end in a combining mark.
        prev_is_letter = ends_in_letter(&out);
    }

    out
}

fn ends_in_letter(s: &str) -> bool {
    s.chars().next_back().is_some_and(char::is_alphabetic)
}
