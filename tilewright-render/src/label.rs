//! Human-readable labels for `aria-label` attributes and hover titles.
//!
//! A label combines the feature's `name` tag with a noun phrase derived from
//! the first descriptive tag present. Keys are consulted in a fixed order and
//! each key carries its own table of irregular phrases; values without an
//! entry have their underscores replaced by spaces.

use tilewright_core::Tags;

/// Label used when a feature has neither a name nor a descriptive tag.
pub const FALLBACK_LABEL: &str = "Map feature";

/// What to say for a value missing from a key's phrase table.
#[derive(Clone, Copy)]
enum Otherwise {
    /// Replace underscores with spaces.
    Spaced,
    /// Use a fixed phrase regardless of the value.
    Fixed(&'static str),
    /// Prefix the spaced value with a word.
    Prefixed(&'static str),
    /// Ignore the key and try the next one.
    Skip,
}

struct PhraseRule {
    key: &'static str,
    phrases: &'static [(&'static str, &'static str)],
    otherwise: Otherwise,
}

impl PhraseRule {
    const fn spaced(key: &'static str, phrases: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            key,
            phrases,
            otherwise: Otherwise::Spaced,
        }
    }

    fn phrase(&self, value: &str) -> Option<String> {
        if let Some((_, phrase)) = self.phrases.iter().find(|(known, _)| *known == value) {
            return Some((*phrase).to_owned());
        }
        match self.otherwise {
            Otherwise::Spaced => Some(spaced(value)),
            Otherwise::Fixed(phrase) => Some(phrase.to_owned()),
            Otherwise::Prefixed(prefix) => Some(format!("{prefix} {}", spaced(value))),
            Otherwise::Skip => None,
        }
    }
}

static PHRASE_RULES: [PhraseRule; 20] = [
    PhraseRule::spaced("building", &[("yes", "building")]),
    PhraseRule {
        key: "highway",
        phrases: &[("bus_stop", "bus stop"), ("bus_guideway", "bus guideway")],
        otherwise: Otherwise::Fixed("road"),
    },
    PhraseRule::spaced("amenity", &[]),
    PhraseRule::spaced(
        "shop",
        &[
            ("convenience", "convenience store"),
            ("mobile_phone", "mobile phone store"),
            ("second_hand", "second hand store"),
        ],
    ),
    PhraseRule::spaced("healthcare", &[]),
    PhraseRule::spaced("railway", &[("narrow_gauge", "narrow gauge railway")]),
    PhraseRule::spaced("public_transport", &[("stop_position", "transit stop")]),
    PhraseRule::spaced("aerialway", &[]),
    PhraseRule::spaced("aeroway", &[]),
    PhraseRule::spaced("man_made", &[("water_works", "water treatment plant")]),
    PhraseRule::spaced("waterway", &[]),
    PhraseRule::spaced("leisure", &[("boat_sharing", "boat sharing station")]),
    PhraseRule::spaced("natural", &[]),
    PhraseRule::spaced("landuse", &[]),
    PhraseRule::spaced(
        "historic",
        &[
            ("highwater_mark", "high water mark"),
            ("pa_system", "PA system"),
            ("railway_car", "historic railway car"),
        ],
    ),
    PhraseRule {
        key: "tourism",
        phrases: &[
            ("museum", "museum"),
            ("gallery", "gallery"),
            ("artwork", "artwork"),
            ("attraction", "attraction"),
            ("theme_park", "theme park"),
        ],
        otherwise: Otherwise::Skip,
    },
    PhraseRule::spaced("cultural", &[]),
    PhraseRule::spaced("emergency", &[("phone", "emergency phone")]),
    PhraseRule::spaced("barrier", &[]),
    PhraseRule {
        key: "information",
        phrases: &[("guidepost", "guidepost"), ("map", "information map")],
        otherwise: Otherwise::Prefixed("information"),
    },
];

/// Noun phrase describing a feature, or `None` when no descriptive tag is
/// present.
///
/// # Examples
/// ```
/// use tilewright_core::Tags;
/// use tilewright_render::noun_phrase;
///
/// let tags = Tags::from([("railway".to_owned(), "subway_entrance".to_owned())]);
/// assert_eq!(noun_phrase(&tags).as_deref(), Some("subway entrance"));
/// ```
#[must_use]
pub fn noun_phrase(tags: &Tags) -> Option<String> {
    PHRASE_RULES.iter().find_map(|rule| {
        tags.get(rule.key)
            .filter(|value| !value.is_empty())
            .and_then(|value| rule.phrase(value))
    })
}

/// Accessible label for a feature.
///
/// Produces `"<name>, <phrase>"` when both parts exist, the bare name, the
/// phrase in title case, or [`FALLBACK_LABEL`].
///
/// # Examples
/// ```
/// use tilewright_core::Tags;
/// use tilewright_render::feature_label;
///
/// let tags = Tags::from([
///     ("amenity".to_owned(), "hospital".to_owned()),
///     ("name".to_owned(), "St. X".to_owned()),
/// ]);
/// assert_eq!(feature_label(&tags), "St. X, hospital");
/// ```
#[must_use]
pub fn feature_label(tags: &Tags) -> String {
    let name = tags.get("name").filter(|name| !name.is_empty());
    match (name, noun_phrase(tags)) {
        (Some(name), Some(phrase)) => format!("{name}, {phrase}"),
        (Some(name), None) => name.clone(),
        (None, Some(phrase)) => title_case(&phrase),
        (None, None) => FALLBACK_LABEL.to_owned(),
    }
}

fn spaced(value: &str) -> String {
    value.replace('_', " ")
}

/// Upper-case the first letter of every word. The rest of each word is kept
/// as written so acronyms such as `PA` survive.
fn title_case(phrase: &str) -> String {
    phrase
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
