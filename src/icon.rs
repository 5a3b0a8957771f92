//! Weather-condition icon handling.

const ICON_DIR: &str = "assets/icons";

/// Normalize an icon identifier: lowercase, with every character outside
/// `[A-Za-z0-9_-]` replaced by `-`. Idempotent.
pub fn sanitize(icon: &str) -> String {
    icon.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Resolve an icon identifier to its SVG asset path.
pub fn asset_path(icon: &str) -> String {
    format!("{ICON_DIR}/{}.svg", sanitize(icon))
}

/// Terminal glyph for an icon identifier, `"·"` when unrecognized.
pub fn glyph(icon: &str) -> &'static str {
    let name = sanitize(icon);
    match name.as_str() {
        "clear-day" => "☀",
        "clear-night" => "☾",
        s if s.starts_with("partly-cloudy") => "⛅",
        "cloudy" | "fog" | "wind" => "☁",
        s if s.contains("thunder") => "☈",
        s if s.contains("snow") || s.contains("sleet") => "❄",
        s if s.contains("rain") || s.contains("showers") => "☔",
        _ => "·",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_hyphenates() {
        assert_eq!(sanitize("Partly Cloudy Day"), "partly-cloudy-day");
        assert_eq!(sanitize("thunder_rain"), "thunder_rain");
        assert_eq!(sanitize("Rain, Overcast!"), "rain--overcast-");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for raw in ["Clear Day", "snow-showers-night", "FOG?", "Éclair"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once);
        }
    }

    #[test]
    fn asset_paths_land_in_the_icon_directory() {
        assert_eq!(asset_path("clear-day"), "assets/icons/clear-day.svg");
        assert_eq!(asset_path("Partly Cloudy Day"), "assets/icons/partly-cloudy-day.svg");
    }

    #[test]
    fn glyph_covers_the_common_conditions() {
        assert_eq!(glyph("clear-day"), "☀");
        assert_eq!(glyph("Rain"), "☔");
        assert_eq!(glyph("snow-showers-day"), "❄");
        assert_eq!(glyph("partly-cloudy-night"), "⛅");
        assert_eq!(glyph("mystery"), "·");
    }
}
