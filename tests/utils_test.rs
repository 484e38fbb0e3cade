use vinylcli::utils::*;

#[test]
fn test_sanitize_component_strips_illegal_chars() {
    let input = r#"AC/DC: Back*In?Black"<>|\"#;
    let sanitized = sanitize_component(input);

    for c in ['/', '\\', '*', '?', ':', '"', '<', '>', '|'] {
        assert!(
            !sanitized.contains(c),
            "sanitized name still contains {:?}: {}",
            c,
            sanitized
        );
    }
    assert_eq!(sanitized, "ACDC_BackInBlack");
}

#[test]
fn test_sanitize_component_replaces_spaces() {
    assert_eq!(
        sanitize_component("Boards of Canada"),
        "Boards_of_Canada"
    );
}

#[test]
fn test_sanitize_component_truncates_exactly() {
    let long = "a".repeat(MAX_COMPONENT_LEN + 50);
    let sanitized = sanitize_component(&long);
    assert_eq!(sanitized.chars().count(), MAX_COMPONENT_LEN);

    // At the limit nothing is cut
    let exact = "b".repeat(MAX_COMPONENT_LEN);
    assert_eq!(sanitize_component(&exact), exact);
}

#[test]
fn test_cover_basename() {
    assert_eq!(
        cover_basename("Boards of Canada", "Music Has the Right to Children"),
        "Boards_of_Canada_Music_Has_the_Right_to_Children"
    );
}

#[test]
fn test_extension_from_content_type() {
    assert_eq!(extension_from_content_type("image/jpeg"), Some(".jpg"));
    assert_eq!(extension_from_content_type("image/png"), Some(".png"));
    assert_eq!(extension_from_content_type("image/gif"), Some(".gif"));
    assert_eq!(extension_from_content_type("image/webp"), Some(".webp"));

    // Parameters are ignored
    assert_eq!(
        extension_from_content_type("image/jpeg; charset=binary"),
        Some(".jpg")
    );

    assert_eq!(extension_from_content_type("text/html"), None);
    assert_eq!(extension_from_content_type(""), None);
}

#[test]
fn test_extension_from_url() {
    assert_eq!(
        extension_from_url("https://example.com/art/cover.jpg"),
        Some(".jpg".to_string())
    );
    assert_eq!(
        extension_from_url("https://example.com/cover.PNG?size=600"),
        Some(".png".to_string())
    );
    assert_eq!(extension_from_url("https://example.com/cover"), None);
    assert_eq!(extension_from_url("https://example.com/page.html"), None);
}

#[test]
fn test_upgrade_artwork_url() {
    assert_eq!(
        upgrade_artwork_url("https://example.com/art/100x100bb.jpg"),
        "https://example.com/art/600x600bb.jpg"
    );

    // No marker means the URL passes through unchanged
    let plain = "https://example.com/art/cover.jpg";
    assert_eq!(upgrade_artwork_url(plain), plain);
}

#[test]
fn test_year_sort_key() {
    assert_eq!(year_sort_key("1998"), 1998);
    assert_eq!(year_sort_key("2023"), 2023);

    // Non-digit years take the lowest key
    assert_eq!(year_sort_key(""), 0);
    assert_eq!(year_sort_key("unknown"), 0);
    assert_eq!(year_sort_key("circa 1970"), 0);
    assert_eq!(year_sort_key("-1990"), 0);

    assert!(year_sort_key("1970") > year_sort_key("n/a"));
}

#[test]
fn test_content_type_for_filename() {
    assert_eq!(content_type_for_filename("cover.jpg"), "image/jpeg");
    assert_eq!(content_type_for_filename("cover.JPEG"), "image/jpeg");
    assert_eq!(content_type_for_filename("cover.png"), "image/png");
    assert_eq!(content_type_for_filename("cover"), "application/octet-stream");
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<b>"Tom & Jerry's"</b>"#),
        "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
    );
    assert_eq!(escape_html("plain text"), "plain text");
}
