use url::Url;

/// Render an address as a single line: `"<lines> City, State Postal"`.
///
/// Each part is emitted only when present and non-empty, and the result is
/// trimmed, so an empty address renders as `""`.
pub fn location_to_text(
    line: &[String],
    city: Option<&str>,
    state: Option<&str>,
    postal_code: Option<&str>,
) -> String {
    let mut text = String::new();

    if !line.is_empty() {
        text.push_str(&line.join(" "));
        text.push(' ');
    }
    if let Some(city) = present(city) {
        text.push_str(city);
        text.push_str(", ");
    }
    if let Some(state) = present(state) {
        text.push_str(state);
        text.push(' ');
    }
    if let Some(postal_code) = present(postal_code) {
        text.push_str(postal_code);
    }

    text.trim().to_string()
}

fn present(part: Option<&str>) -> Option<&str> {
    part.filter(|p| !p.is_empty())
}

/// Derive a normalized identifier from a website URL: its origin, with a
/// leading `https://www.` collapsed to `https://`.
///
/// Returns `None` for anything that is not an absolute URL with a tuple
/// origin (malformed input, `mailto:` and similar).
pub fn identifier_from_url(url: Option<&str>) -> Option<String> {
    let parsed = Url::parse(url?).ok()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }

    let origin = origin.ascii_serialization();
    match origin.strip_prefix("https://www.") {
        Some(rest) => Some(format!("https://{}", rest)),
        None => Some(origin),
    }
}
