//! field name casing
//!
//! converts declared member names (`UserID`, `created_at`) into graphql
//! lower camel case (`userID`, `createdAt`).

/// convert a declared name to lower camel case.
///
/// words are split at lower -> upper transitions, at the end of an
/// uppercase run that is followed by a word (`URLPath` -> `URL`, `Path`),
/// and at underscores. acronym runs keep their casing except in the first
/// word, whose leading uppercase run is lowered.
pub fn to_lower_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, word) in split_words(name).iter().enumerate() {
        if index == 0 {
            let mut chars = word.chars().peekable();
            while let Some(c) = chars.next_if(|c| c.is_uppercase()) {
                out.extend(c.to_lowercase());
            }
            out.extend(chars);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.extend(chars);
            }
        }
    }
    out
}

fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for part in name.split('_').filter(|part| !part.is_empty()) {
        let chars: Vec<(usize, char)> = part.char_indices().collect();
        let mut start = 0;
        for i in 0..chars.len() {
            let current = chars[i].1;
            let end_of_word = match (chars.get(i + 1), chars.get(i + 2)) {
                (None, _) => true,
                (Some(&(_, next)), _) if current.is_lowercase() && next.is_uppercase() => true,
                (Some(&(_, next)), Some(&(_, after)))
                    if current.is_uppercase() && next.is_uppercase() && after.is_lowercase() =>
                {
                    // plural of the ID acronym stays one word
                    !(current == 'I' && next == 'D' && after == 's' && chars.len() == i + 3)
                }
                _ => false,
            };
            if end_of_word {
                let end = chars.get(i + 1).map_or(part.len(), |&(offset, _)| offset);
                words.push(&part[start..end]);
                start = end;
            }
        }
    }
    words
}
