use std::path::Path;

/// Maximum length of a single sanitized filename component (artist or album).
pub const MAX_COMPONENT_LEN: usize = 100;

/// Characters that may not appear in a cover filename.
const ILLEGAL_CHARS: &[char] = &['/', '\\', '*', '?', ':', '"', '<', '>', '|'];

/// Sanitizes one filename component: strips characters illegal in filenames,
/// replaces spaces with underscores and truncates to [`MAX_COMPONENT_LEN`]
/// characters.
pub fn sanitize_component(component: &str) -> String {
    component
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .map(|c| if c == ' ' { '_' } else { c })
        .take(MAX_COMPONENT_LEN)
        .collect()
}

/// Derives the deterministic base filename for a record's cover art from its
/// identifying fields, e.g. `Boards_of_Canada_Music_Has_the_Right_to_Children`.
/// The extension is appended later, once the image type is known.
pub fn cover_basename(artist: &str, album: &str) -> String {
    format!(
        "{}_{}",
        sanitize_component(artist),
        sanitize_component(album)
    )
}

/// Maps a declared image content type to a file extension.
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    // Parameters like "; charset=..." are ignored
    let mime = content_type.split(';').next().unwrap_or("").trim();
    match mime {
        "image/jpeg" | "image/jpg" => Some(".jpg"),
        "image/png" => Some(".png"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// Extracts an image extension from the path portion of a URL, as a fallback
/// when the content type cannot be determined.
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = Path::new(path).extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(format!(".{}", ext)),
        _ => None,
    }
}

/// Best-effort upgrade of a low-resolution artwork URL to a higher-resolution
/// variant. The iTunes API hands out `100x100` thumbnails whose URL pattern
/// also serves `600x600`; the substitution is not guaranteed to work for
/// other providers, in which case the original URL is returned unchanged.
pub fn upgrade_artwork_url(url: &str) -> String {
    if url.contains("100x100") {
        url.replace("100x100", "600x600")
    } else {
        url.to_string()
    }
}

/// Numeric sort key for the free-text `year` field. Non-digit years take the
/// lowest key, so they sort first. This is arbitrary tie-breaking for display
/// purposes, not a semantic guarantee about chronology.
pub fn year_sort_key(year: &str) -> u64 {
    if !year.is_empty() && year.chars().all(|c| c.is_ascii_digit()) {
        year.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Content type for serving a cover file, judged by its extension.
pub fn content_type_for_filename(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Minimal HTML escaping for values interpolated into the web pages.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
