//! Title and slug transformations.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Separator used between slug words.
pub const SLUG_SEPARATOR: char = '-';

/// Character approximations applied before parameterizing.
///
/// Ukrainian/Russian Cyrillic plus the common Latin-1 letters.
#[rustfmt::skip]
const TRANSLITERATIONS: &[(char, &str)] = &[
    ('А', "A"), ('а', "a"),
    ('Б', "B"), ('б', "b"),
    ('В', "V"), ('в', "v"),
    ('Г', "G"), ('г', "g"),
    ('Ґ', "G"), ('ґ', "g"),
    ('Д', "D"), ('д', "d"),
    ('Е', "E"), ('е', "e"),
    ('Є', "Je"), ('є', "je"),
    ('Ж', "Zh"), ('ж', "zh"),
    ('З', "Z"), ('з', "z"),
    ('И', "Y"), ('и', "y"),
    ('І', "I"), ('і', "i"),
    ('Ї', "Ji"), ('ї', "ji"),
    ('Й', "J"), ('й', "j"),
    ('К', "K"), ('к', "k"),
    ('Л', "L"), ('л', "l"),
    ('М', "M"), ('м', "m"),
    ('Н', "N"), ('н', "n"),
    ('О', "O"), ('о', "o"),
    ('П', "P"), ('п', "p"),
    ('Р', "R"), ('р', "r"),
    ('С', "S"), ('с', "s"),
    ('Т', "T"), ('т', "t"),
    ('У', "U"), ('у', "u"),
    ('Ф', "F"), ('ф', "f"),
    ('Х', "H"), ('х', "h"),
    ('Ц', "Ts"), ('ц', "ts"),
    ('Ч', "Ch"), ('ч', "ch"),
    ('Ш', "Sh"), ('ш', "sh"),
    ('Щ', "Shch"), ('щ', "shch"),
    ('Ю', "Ju"), ('ю', "ju"),
    ('Я', "Ja"), ('я', "ja"),
    ('Ы', "Y"), ('ы', "y"),
    ('Э', "E"), ('э', "e"),
    ('Ё', "Jo"), ('ё', "jo"),
    ('À', "A"), ('Á', "A"), ('Â', "A"), ('Ã', "A"), ('Ä', "A"), ('Å', "A"),
    ('Æ', "AE"), ('Ç', "C"),
    ('È', "E"), ('É', "E"), ('Ê', "E"), ('Ë', "E"),
    ('Ì', "I"), ('Í', "I"), ('Î', "I"), ('Ï', "I"),
    ('Ð', "D"), ('Ñ', "N"),
    ('Ò', "O"), ('Ó', "O"), ('Ô', "O"), ('Õ', "O"), ('Ö', "O"), ('Ø', "O"),
    ('Ù', "U"), ('Ú', "U"), ('Û', "U"), ('Ü', "U"),
    ('Ý', "Y"), ('Þ', "Th"), ('ß', "ss"),
    ('à', "a"), ('á', "a"), ('â', "a"), ('ã', "a"), ('ä', "a"), ('å', "a"),
    ('æ', "ae"), ('ç', "c"),
    ('è', "e"), ('é', "e"), ('ê', "e"), ('ë', "e"),
    ('ì', "i"), ('í', "i"), ('î', "i"), ('ï', "i"),
    ('ð', "d"), ('ñ', "n"),
    ('ò', "o"), ('ó', "o"), ('ô', "o"), ('õ', "o"), ('ö', "o"), ('ø', "o"),
    ('ù', "u"), ('ú', "u"), ('û', "u"), ('ü', "u"),
    ('ý', "y"), ('þ', "th"), ('ÿ', "y"),
];

static TRANSLITERATION_TABLE: Lazy<HashMap<char, &'static str>> =
    Lazy::new(|| TRANSLITERATIONS.iter().copied().collect());

/// Replace characters with their ASCII approximation.
///
/// ASCII passes through; unmapped characters become `?`.
pub fn transliterate(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii() {
            result.push(ch);
        } else if let Some(replacement) = TRANSLITERATION_TABLE.get(&ch) {
            result.push_str(replacement);
        } else {
            result.push('?');
        }
    }
    result
}

/// Turn an arbitrary string into a lowercase, hyphen-separated slug.
///
/// The result contains only `[a-z0-9-]`, never starts or ends with a
/// separator, never repeats one, and `to_slug(to_slug(x)) == to_slug(x)`.
pub fn to_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in transliterate(input).chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push(SLUG_SEPARATOR);
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Humanize an identifier-like string into a display title.
///
/// `fiscal_year` and `fiscalYear` both become `Fiscal Year`; a trailing
/// `_id` is dropped the way column humanizing usually does.
pub fn to_title(input: &str) -> String {
    let underscored = underscore(input);
    let humanized = underscored.strip_suffix("_id").unwrap_or(&underscored);

    humanized
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase with `_` at camelCase and `-` boundaries.
fn underscore(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut result = String::with_capacity(input.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch == '-' {
            result.push('_');
            continue;
        }
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                result.push('_');
            }
        }
        result.extend(ch.to_lowercase());
    }

    result
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_basic() {
        assert_eq!(to_slug("My Report"), "my-report");
        assert_eq!(to_slug("  --Budget__2024!! "), "budget-2024");
        assert_eq!(to_slug(""), "");
        assert_eq!(to_slug("???"), "");
    }

    #[test]
    fn test_slug_transliterates_cyrillic() {
        assert_eq!(to_slug("Бюджет Київ"), "bjudzhet-kyjiv");
        assert_eq!(to_slug("Щедрість"), "shchedrist");
    }

    #[test]
    fn test_slug_latin_approximations() {
        assert_eq!(to_slug("Straße Café"), "strasse-cafe");
        assert_eq!(to_slug("日本 data"), "data");
    }

    #[test]
    fn test_slug_is_idempotent() {
        for input in ["Data File.csv", "Бюджет 2024", "a--b", "-x-"] {
            let once = to_slug(input);
            assert_eq!(to_slug(&once), once);
        }
    }

    #[test]
    fn test_title() {
        assert_eq!(to_title("fiscal_year"), "Fiscal Year");
        assert_eq!(to_title("fiscalYear"), "Fiscal Year");
        assert_eq!(to_title("budget-line"), "Budget Line");
        assert_eq!(to_title("entity_id"), "Entity");
        assert_eq!(to_title("HTMLParser"), "Html Parser");
        assert_eq!(to_title(""), "");
    }
}
