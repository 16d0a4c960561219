//! Filename extraction from URL path.

/// Returns the text after the final `/` of the URL's path, ignoring query and
/// fragment. A path ending in `/` yields `None` rather than the parent segment,
/// so `https://example.com/gallery/` has no filename.
///
/// Returns `None` if the URL cannot be parsed or the segment is empty, `.` or `..`.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}
