//! Title → slug conversion for output filenames and URLs.
//!
//! The slug is the card's identity on disk and in the returned URL:
//! `{output_dir}/{slug}.png` / `{url_path}/{slug}.png`. Two titles that
//! slug identically overwrite each other's card; that is the caller's
//! problem to avoid (same as any static-site permalink collision).

/// Convert a title into a URL/filename-safe slug.
///
/// Alphanumeric characters are lowercased and kept; every other run of
/// characters collapses into a single dash. Leading and trailing dashes are
/// trimmed.
///
/// - `"Hello, World!"` → `"hello-world"`
/// - `"Rust  &  Friends"` → `"rust-friends"`
///
/// A title with no alphanumeric characters at all slugs to `"untitled"` so
/// the output filename is never empty.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }
    slug
}
