//! Business slugs.

/// Derive a URL slug from a display name.
///
/// ASCII letters and digits are kept (lowercased). Any run of other
/// characters becomes a single `-`, and leading/trailing dashes are dropped.
/// The result is empty when `name` has no ASCII alphanumerics.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }

            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
