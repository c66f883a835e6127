//! Curated tag sets for each named travel style.

/// Travel styles that carry a bonus tag set
pub const TRAVEL_STYLES: &[&str] = &[
    "family",
    "nightlife",
    "relaxed",
    "adventurous",
    "foodie",
    "cultural",
];

/// Tags associated with a travel style, if the style is known.
/// Expects an already normalized (lower-case, trimmed) style key.
pub fn style_tags(style: &str) -> Option<&'static [&'static str]> {
    let tags: &'static [&'static str] = match style {
        "family" => &["family", "kids", "playground", "easy"],
        "nightlife" => &["nightlife", "bar", "club", "music"],
        "relaxed" => &["relax", "chill", "spa", "beach"],
        "adventurous" => &["hiking", "cliff", "dive", "adventure"],
        "foodie" => &["food", "restaurants", "seafood", "market", "wine"],
        "cultural" => &["history", "museum", "architecture", "church", "culture"],
        _ => return None,
    };
    Some(tags)
}
