//! GitHub-style anchor slugs.

/// Maps heading text to the anchor GitHub generates for it.
///
/// The steps run in a fixed order, which matters for text mixing spaces
/// with punctuation or emoji:
///
/// 1. lowercase
/// 2. every literal space becomes `-`
/// 3. anything outside `[a-z0-9-]` is dropped
/// 4. runs of `-` collapse to one
/// 5. leading and trailing `-` are trimmed
///
/// Never fails. Text without a single eligible character yields `""`.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace(' ', "-");
    let mut slug = String::with_capacity(lowered.len());

    for c in lowered.chars() {
        if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
            continue;
        }
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug.trim_matches('-').to_string()
}
