//! Interpretation of OpenStreetMap tags.
//!
//! Pure functions over a place's tag map: which explore category a place
//! belongs to, a human-readable kind, a postal address line, and contact
//! details.

use std::collections::BTreeMap;

use crate::models::{ExploreCategory, PlaceType, UsefulInfo};

pub type Tags = BTreeMap<String, String>;

/// Tags consulted, in order, for the generic place label.
const TITLE_KEYS: [&str; 11] = [
    "tourism", "amenity", "historic", "leisure", "natural", "shop", "man_made", "place",
    "building", "office", "sport",
];

/// `(key, value)` filters requested from the explore service per category.
pub fn category_filters(category: ExploreCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        ExploreCategory::Cafes => &[("amenity", "cafe"), ("amenity", "coffee_shop")],
        ExploreCategory::Restaurants => &[("amenity", "restaurant"), ("amenity", "fast_food")],
        ExploreCategory::Hotels => &[
            ("tourism", "hotel"),
            ("tourism", "hostel"),
            ("tourism", "guest_house"),
        ],
        ExploreCategory::Nature => &[
            ("leisure", "park"),
            ("boundary", "national_park"),
            ("natural", "wood"),
            ("natural", "peak"),
            ("waterway", "waterfall"),
            ("natural", "beach"),
            ("natural", "spring"),
        ],
        ExploreCategory::Sights => SIGHT_FILTERS,
    }
}

const SIGHT_FILTERS: &[(&str, &str)] = &[
    ("tourism", "attraction"),
    ("tourism", "museum"),
    ("tourism", "viewpoint"),
    ("tourism", "gallery"),
    ("historic", "castle"),
    ("historic", "ruins"),
    ("historic", "monument"),
    ("historic", "memorial"),
    ("man_made", "tower"),
];

fn tag<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str)
}

fn has_any(tags: &Tags, filters: &[(&str, &str)]) -> bool {
    filters.iter().any(|(k, v)| tag(tags, k) == Some(*v))
}

/// Category a place belongs to. Anything unrecognized counts as a sight.
pub fn infer_category(tags: &Tags) -> ExploreCategory {
    if has_any(tags, category_filters(ExploreCategory::Cafes)) {
        ExploreCategory::Cafes
    } else if has_any(tags, category_filters(ExploreCategory::Restaurants)) {
        ExploreCategory::Restaurants
    } else if has_any(tags, category_filters(ExploreCategory::Hotels)) {
        ExploreCategory::Hotels
    } else if tag(tags, "leisure") == Some("park")
        || tag(tags, "boundary") == Some("national_park")
        || tags.contains_key("natural")
    {
        ExploreCategory::Nature
    } else {
        ExploreCategory::Sights
    }
}

/// Whether a place inferred as a sight carries one of the sight tags
/// explicitly, rather than just falling through to the default.
pub fn is_explicit_sight(tags: &Tags) -> bool {
    has_any(tags, SIGHT_FILTERS)
}

/// First non-empty of `name`, `name:en`, `name:nl`, trimmed.
pub fn best_name(tags: &Tags) -> Option<String> {
    ["name", "name:en", "name:nl"]
        .into_iter()
        .filter_map(|k| tag(tags, k))
        .find(|v| !v.is_empty())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// `"guest_house"` → `"Guest house"`.
fn humanize(value: &str) -> String {
    let spaced = value.replace('_', " ");
    let trimmed = spaced.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => value.to_string(),
    }
}

fn non_empty<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tag(tags, key).filter(|v| !v.is_empty())
}

fn place_type(label: String, source_key: &str) -> PlaceType {
    PlaceType {
        label,
        source_key: source_key.to_string(),
    }
}

/// Human-readable kind of a place, e.g. `"Italian restaurant"` or
/// `"Museum"`.
pub fn describe_place_type(tags: &Tags) -> PlaceType {
    let amenity = tag(tags, "amenity");

    if let Some(cuisine) = non_empty(tags, "cuisine") {
        match amenity {
            Some("restaurant") => {
                return place_type(format!("{} restaurant", humanize(cuisine)), "amenity")
            }
            Some("cafe") => return place_type(format!("{} café", humanize(cuisine)), "amenity"),
            _ => {}
        }
    }
    if let Some(shop) = non_empty(tags, "shop") {
        return place_type(format!("{} shop", humanize(shop)), "shop");
    }
    if tag(tags, "leisure") == Some("sports_centre") {
        if let Some(sport) = non_empty(tags, "sport") {
            return place_type(format!("{} sports centre", humanize(sport)), "leisure");
        }
    }

    let base = TITLE_KEYS.iter().find_map(|key| {
        tag(tags, key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| (*key, v))
    });
    if let Some((key, value)) = base {
        return place_type(humanize(value), key);
    }

    if let Some(highway) = non_empty(tags, "highway") {
        return place_type(format!("Road feature ({})", humanize(highway)), "highway");
    }
    if let Some(waterway) = non_empty(tags, "waterway") {
        return place_type(format!("Waterway ({})", humanize(waterway)), "waterway");
    }

    place_type("Unknown".to_string(), "")
}

/// One-line postal address from the `addr:*` tags, empty when none apply.
pub fn format_address(tags: &Tags) -> String {
    let street = non_empty(tags, "addr:street");
    let number = non_empty(tags, "addr:housenumber");
    let city = non_empty(tags, "addr:city");
    let postcode = non_empty(tags, "addr:postcode");

    let line1 = match (street, number) {
        (Some(s), Some(n)) => format!("{s} {n}"),
        (Some(s), None) => s.to_string(),
        _ => String::new(),
    };
    let line2 = match (postcode, city) {
        (Some(p), Some(c)) => format!("{p} {c}"),
        (None, Some(c)) => c.to_string(),
        _ => String::new(),
    };

    [line1, line2]
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Contact details, preferring the plain keys over `contact:*`.
pub fn pick_useful_info(tags: &Tags) -> UsefulInfo {
    let first = |keys: &[&str]| {
        keys.iter()
            .find_map(|k| non_empty(tags, k))
            .unwrap_or_default()
            .to_string()
    };

    UsefulInfo {
        website: first(&["website", "contact:website"]),
        phone: first(&["phone", "contact:phone"]),
        opening_hours: first(&["opening_hours"]),
        cuisine: first(&["cuisine"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> Tags {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category(&tags(&[("amenity", "cafe")])), ExploreCategory::Cafes);
        assert_eq!(
            infer_category(&tags(&[("amenity", "fast_food")])),
            ExploreCategory::Restaurants
        );
        assert_eq!(
            infer_category(&tags(&[("tourism", "guest_house")])),
            ExploreCategory::Hotels
        );
        assert_eq!(infer_category(&tags(&[("natural", "tree")])), ExploreCategory::Nature);
        assert_eq!(
            infer_category(&tags(&[("historic", "wayside_cross")])),
            ExploreCategory::Sights
        );
        assert_eq!(infer_category(&Tags::new()), ExploreCategory::Sights);
    }

    #[test]
    fn test_explicit_sight() {
        assert!(is_explicit_sight(&tags(&[("historic", "castle")])));
        assert!(!is_explicit_sight(&tags(&[("historic", "wayside_cross")])));
        assert!(!is_explicit_sight(&Tags::new()));
    }

    #[test]
    fn test_best_name() {
        assert_eq!(
            best_name(&tags(&[("name:en", " Grand Place "), ("name:nl", "Grote Markt")])),
            Some("Grand Place".to_string())
        );
        assert_eq!(best_name(&tags(&[("name", "   ")])), None);
        assert_eq!(best_name(&tags(&[("amenity", "cafe")])), None);
    }

    #[test]
    fn test_describe_place_type() {
        let italian = describe_place_type(&tags(&[
            ("amenity", "restaurant"),
            ("cuisine", "italian"),
        ]));
        assert_eq!(italian.label, "Italian restaurant");
        assert_eq!(italian.source_key, "amenity");

        let shop = describe_place_type(&tags(&[("shop", "second_hand")]));
        assert_eq!(shop.label, "Second hand shop");

        let hostel = describe_place_type(&tags(&[("tourism", "guest_house")]));
        assert_eq!(hostel.label, "Guest house");
        assert_eq!(hostel.source_key, "tourism");

        let road = describe_place_type(&tags(&[("highway", "bus_stop")]));
        assert_eq!(road.label, "Road feature (Bus stop)");

        let unknown = describe_place_type(&Tags::new());
        assert_eq!(unknown.label, "Unknown");
        assert_eq!(unknown.source_key, "");
    }

    #[test]
    fn test_format_address() {
        assert_eq!(
            format_address(&tags(&[
                ("addr:street", "Rue Neuve"),
                ("addr:housenumber", "12"),
                ("addr:postcode", "1000"),
                ("addr:city", "Brussels"),
            ])),
            "Rue Neuve 12, 1000 Brussels"
        );
        assert_eq!(format_address(&tags(&[("addr:city", "Ghent")])), "Ghent");
        assert_eq!(format_address(&tags(&[("addr:postcode", "9000")])), "");
    }

    #[test]
    fn test_pick_useful_info() {
        let info = pick_useful_info(&tags(&[
            ("contact:website", "https://example.org"),
            ("phone", "+32 2 000 00 00"),
            ("contact:phone", "ignored"),
            ("opening_hours", "Mo-Fr 09:00-17:00"),
        ]));
        assert_eq!(info.website, "https://example.org");
        assert_eq!(info.phone, "+32 2 000 00 00");
        assert_eq!(info.opening_hours, "Mo-Fr 09:00-17:00");
        assert_eq!(info.cuisine, "");
    }
}
