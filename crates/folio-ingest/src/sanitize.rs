//! Name and path sanitization
//!
//! Maps arbitrary user-supplied folder and file names to identifiers safe for
//! the object store's key space: Hebrew letters are transliterated to Latin,
//! whitespace and parentheses become `_`, anything else outside
//! `[A-Za-z0-9._-]` is dropped, underscore runs are collapsed and trimmed.
//! Pure and deterministic; same input always yields the same output.

use folio_core::constants::DEFAULT_FILE_TOKEN;

/// Fixed Hebrew-to-Latin transliteration table. Final forms (ך ם ן ף ץ) map
/// like their regular counterparts.
fn transliterate(c: char) -> Option<&'static str> {
    match c {
        'א' => Some("a"),
        'ב' => Some("b"),
        'ג' => Some("g"),
        'ד' => Some("d"),
        'ה' => Some("h"),
        'ו' => Some("v"),
        'ז' => Some("z"),
        'ח' => Some("ch"),
        'ט' => Some("t"),
        'י' => Some("y"),
        'כ' | 'ך' => Some("k"),
        'ל' => Some("l"),
        'מ' | 'ם' => Some("m"),
        'נ' | 'ן' => Some("n"),
        'ס' => Some("s"),
        'ע' => Some("a"),
        'פ' | 'ף' => Some("p"),
        'צ' | 'ץ' => Some("ts"),
        'ק' => Some("q"),
        'ר' => Some("r"),
        'ש' => Some("sh"),
        'ת' => Some("t"),
        _ => None,
    }
}

/// Sanitize a single folder or file base name.
///
/// Never returns an empty string: when nothing usable remains the fixed
/// fallback token is returned instead.
pub fn sanitize_name(name: &str) -> String {
    let mut mapped = String::with_capacity(name.len());
    for c in name.chars() {
        if let Some(latin) = transliterate(c) {
            mapped.push_str(latin);
        } else if c.is_whitespace() || c == '(' || c == ')' {
            mapped.push('_');
        } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            mapped.push(c);
        }
        // anything else is dropped
    }

    let mut collapsed = String::with_capacity(mapped.len());
    let mut prev_underscore = false;
    for c in mapped.chars() {
        if c == '_' {
            if !prev_underscore {
                collapsed.push('_');
            }
            prev_underscore = true;
        } else {
            collapsed.push(c);
            prev_underscore = false;
        }
    }

    let trimmed = collapsed.trim_matches('_');
    if trimmed.is_empty() {
        DEFAULT_FILE_TOKEN.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Sanitize a slash-separated path, segment by segment.
///
/// The final segment is treated as a file name: its `.ext` suffix (from the
/// last dot) is preserved byte-for-byte and only the base name is sanitized.
pub fn sanitize_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let last = segments.len().saturating_sub(1);

    segments
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i == last {
                match part.rfind('.') {
                    Some(idx) => {
                        let (base, ext) = part.split_at(idx);
                        format!("{}{}", sanitize_name(base), ext)
                    }
                    None => sanitize_name(part),
                }
            } else {
                sanitize_name(part)
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}
