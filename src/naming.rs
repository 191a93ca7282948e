//! Slug and display-label helpers shared by every record kind.
//!
//! Records carry an optional `slug`; when the content file leaves it out the
//! loader derives one from the title with [`slugify`]. Ids such as
//! `web-design` are shown to humans through [`humanize`].
//!
//! ## Slug rules
//!
//! - ASCII letters are lowercased, digits kept
//! - Every other character becomes a dash
//! - Consecutive dashes collapse, leading/trailing dashes are stripped
//! - Slugs longer than [`MAX_SLUG_LEN`] are cut at the last dash before the limit

/// Longest slug emitted by [`slugify`].
pub const MAX_SLUG_LEN: usize = 80;

/// Turn a title into a URL-safe slug.
///
/// - `"Hello, World!"` → `"hello-world"`
/// - `"  Rust & WebAssembly  "` → `"rust-webassembly"`
/// - `"Café"` → `"caf"`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }
    let trimmed = slug.trim_end_matches('-');

    if trimmed.len() <= MAX_SLUG_LEN {
        return trimmed.to_string();
    }
    let truncated = &trimmed[..MAX_SLUG_LEN];
    match truncated.rfind('-') {
        Some(pos) => truncated[..pos].to_string(),
        None => truncated.to_string(),
    }
}

/// Whether `slug` is safe to use as a single path segment: non-empty ASCII
/// lowercase letters, digits and inner dashes, the alphabet [`slugify`] emits.
pub fn is_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Display label for a dashed identifier: `"full-time"` → `"Full time"`.
pub fn humanize(id: &str) -> String {
    let spaced = id.replace(['-', '_'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
