//! URL modeling and filename derivation.
//!
//! The saved filename is the URL's last path segment, taken as-is. There is
//! no collision handling: two URLs ending in the same segment map to the same
//! file, and the later save overwrites the earlier one.

mod path;

pub use path::filename_from_url_path;

/// Default filename when the URL path yields nothing usable.
pub const DEFAULT_FILENAME: &str = "downloaded_image.jpg";

/// Derives the filename for saving the image fetched from `url`, falling back
/// to `fallback` when the URL has no usable last path segment.
///
/// # Examples
///
/// - `derive_filename("https://example.com/img/cat.png", DEFAULT_FILENAME)` → `"cat.png"`
/// - `derive_filename("https://example.com/", DEFAULT_FILENAME)` → `"downloaded_image.jpg"`
pub fn derive_filename(url: &str, fallback: &str) -> String {
    filename_from_url_path(url).unwrap_or_else(|| fallback.to_string())
}
