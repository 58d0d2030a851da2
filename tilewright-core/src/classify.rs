//! Tag-driven feature classification.
//!
//! Classification is an ordered rule table. Each rule pairs a category with a
//! membership predicate and a subtype rule. Rules are evaluated in
//! [`Category::PRIORITY`] order and the first member wins. A matching rule
//! always yields a subtype; subtype rules fall back to the catalog's
//! `default` (or a category-specific fallback) when nothing more specific
//! fires.

use crate::category::Category;
use crate::feature::Tags;

/// The `(category, subtype)` pair derived from a tag set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Classification {
    /// Category the feature is bucketed under.
    pub category: Category,
    /// Style subtype within the category.
    pub subtype: String,
}

impl Classification {
    /// Construct a classification from borrowed parts.
    pub fn new(category: Category, subtype: &str) -> Self {
        Self {
            category,
            subtype: subtype.to_owned(),
        }
    }

    /// Whether features of this class draw as stroked lines rather than
    /// filled areas. Closed ways of a linear class stay lines.
    pub fn is_linear(&self) -> bool {
        crate::style::style_for(self.category, &self.subtype).is_line()
    }
}

/// Classify a tag set. Returns `None` when no category claims the tags.
///
/// The function is total and pure: any tag map, including an empty one,
/// yields a result without side effects.
///
/// # Examples
/// ```
/// use tilewright_core::{Category, Tags, classify};
///
/// let tags = Tags::from([
///     ("amenity".to_owned(), "hospital".to_owned()),
///     ("name".to_owned(), "St. X".to_owned()),
/// ]);
/// let class = classify(&tags).expect("hospitals are healthcare");
/// assert_eq!(class.category, Category::Healthcare);
/// assert_eq!(class.subtype, "hospital");
///
/// assert!(classify(&Tags::new()).is_none());
/// ```
pub fn classify(tags: &Tags) -> Option<Classification> {
    RULES
        .iter()
        .find(|rule| (rule.is_member)(tags))
        .map(|rule| Classification {
            category: rule.category,
            subtype: (rule.subtype)(tags),
        })
}

struct CategoryRule {
    category: Category,
    is_member: fn(&Tags) -> bool,
    subtype: fn(&Tags) -> String,
}

/// Rules in priority order. Keep in sync with [`Category::PRIORITY`].
static RULES: [CategoryRule; 11] = [
    CategoryRule {
        category: Category::Healthcare,
        is_member: is_healthcare,
        subtype: healthcare_subtype,
    },
    CategoryRule {
        category: Category::FoodSustenance,
        is_member: is_food,
        subtype: food_subtype,
    },
    CategoryRule {
        category: Category::FinancialServices,
        is_member: is_financial,
        subtype: financial_subtype,
    },
    CategoryRule {
        category: Category::ShoppingRetail,
        is_member: is_retail,
        subtype: retail_subtype,
    },
    CategoryRule {
        category: Category::PublicFacilities,
        is_member: is_public_facility,
        subtype: public_facility_subtype,
    },
    CategoryRule {
        category: Category::Accessibility,
        is_member: is_accessibility,
        subtype: accessibility_subtype,
    },
    CategoryRule {
        category: Category::Transit,
        is_member: is_transit,
        subtype: transit_subtype,
    },
    CategoryRule {
        category: Category::Buildings,
        is_member: is_building,
        subtype: building_subtype,
    },
    CategoryRule {
        category: Category::Roads,
        is_member: is_road,
        subtype: road_subtype,
    },
    CategoryRule {
        category: Category::Water,
        is_member: is_water,
        subtype: water_subtype,
    },
    CategoryRule {
        category: Category::Parks,
        is_member: is_park,
        subtype: park_subtype,
    },
];

const DEFAULT_SUBTYPE: &str = "default";

const HEALTHCARE_AMENITIES: &[&str] = &[
    "hospital",
    "clinic",
    "doctors",
    "dentist",
    "pharmacy",
    "veterinary",
];
const HEALTHCARE_VALUES: &[&str] = &[
    "alternative",
    "audiologist",
    "birthing_centre",
    "blood_bank",
    "blood_donation",
    "centre",
    "clinic",
    "counselling",
    "dentist",
    "dialysis",
    "doctor",
    "hospice",
    "hospital",
    "laboratory",
    "midwife",
    "nurse",
    "occupational_therapist",
    "optometrist",
    "pharmacy",
    "physiotherapist",
    "podiatrist",
    "psychotherapist",
    "rehabilitation",
    "sample_collection",
    "speech_therapist",
    "vaccination_centre",
];

const FOOD_AMENITIES: &[&str] = &[
    "restaurant",
    "cafe",
    "fast_food",
    "bar",
    "pub",
    "food_court",
    "ice_cream",
    "biergarten",
    "nightclub",
];
const FOOD_SHOPS: &[&str] = &[
    "alcohol",
    "bakery",
    "beverages",
    "butcher",
    "cheese",
    "chocolate",
    "coffee",
    "confectionery",
    "convenience",
    "deli",
    "farm",
    "frozen_food",
    "greengrocer",
    "health_food",
    "nuts",
    "pastry",
    "seafood",
    "tea",
    "wine",
    "supermarket",
];

const FINANCIAL_AMENITIES: &[&str] = &[
    "bank",
    "atm",
    "post_office",
    "bureau_de_change",
    "money_transfer",
    "payment_centre",
];

const RETAIL_SHOPS: &[&str] = &[
    "department_store",
    "general",
    "kiosk",
    "mall",
    "supermarket",
    "wholesale",
    "variety_store",
    "second_hand",
    "charity",
    "clothes",
    "shoes",
    "bag",
    "boutique",
    "fabric",
    "jewelry",
    "leather",
    "watches",
    "tailor",
    "computer",
    "electronics",
    "mobile_phone",
    "hifi",
    "telecommunication",
    "beauty",
    "chemist",
    "cosmetics",
    "hairdresser",
    "massage",
    "optician",
    "perfumery",
    "tattoo",
    "furniture",
    "garden_centre",
    "hardware",
    "doityourself",
    "florist",
    "appliance",
];
const RETAIL_AMENITIES: &[&str] = &["marketplace", "vending_machine"];

const PUBLIC_FACILITY_AMENITIES: &[&str] = &[
    "toilets",
    "shower",
    "drinking_water",
    "bench",
    "shelter",
    "bicycle_repair_station",
    "charging_station",
    "waste_basket",
    "recycling",
];

const TRANSIT_HIGHWAYS: &[&str] = &["bus_stop", "platform", "bus_guideway"];
const TRANSIT_RAILWAYS: &[&str] = &[
    "station",
    "halt",
    "platform",
    "subway",
    "tram",
    "tram_stop",
    "stop",
    "subway_entrance",
    "rail",
    "light_rail",
    "narrow_gauge",
    "funicular",
    "monorail",
];
const TRANSIT_PUBLIC_TRANSPORT: &[&str] = &["platform", "stop_position", "station"];
const TRANSIT_AMENITIES: &[&str] = &["bus_station", "ferry_terminal"];
const TRANSIT_AERIALWAYS: &[&str] = &[
    "station",
    "loading_point",
    "cable_car",
    "gondola",
    "chair_lift",
    "drag_lift",
    "rope_tow",
    "zip_line",
];
const TRANSIT_AEROWAYS: &[&str] = &["terminal", "gate", "runway", "taxiway", "aerodrome"];

/// Transit subtype checks as `(key, value, subtype)` in priority order: bus,
/// rail, public transport, ferry, aerial, airport.
const TRANSIT_SUBTYPES: &[(&str, &str, &str)] = &[
    ("highway", "bus_stop", "bus_stop"),
    ("amenity", "bus_station", "bus_station"),
    ("highway", "bus_guideway", "bus_guideway"),
    ("railway", "station", "station"),
    ("railway", "halt", "halt"),
    ("railway", "subway_entrance", "subway_entrance"),
    ("railway", "tram_stop", "tram_stop"),
    ("railway", "rail", "rail"),
    ("railway", "subway", "subway"),
    ("railway", "tram", "tram"),
    ("railway", "light_rail", "light_rail"),
    ("railway", "narrow_gauge", "narrow_gauge"),
    ("railway", "funicular", "funicular"),
    ("railway", "monorail", "monorail"),
    ("public_transport", "platform", "platform"),
    ("public_transport", "stop_position", "stop_position"),
    ("public_transport", "station", "station"),
    ("amenity", "ferry_terminal", "ferry_terminal"),
    ("aerialway", "cable_car", "cable_car"),
    ("aerialway", "gondola", "gondola"),
    ("aerialway", "chair_lift", "chair_lift"),
    ("aerialway", "drag_lift", "drag_lift"),
    ("aerialway", "rope_tow", "rope_tow"),
    ("aerialway", "zip_line", "zip_line"),
    ("aerialway", "station", "aerialway_station"),
    ("aerialway", "loading_point", "loading_point"),
    ("aeroway", "terminal", "terminal"),
    ("aeroway", "gate", "gate"),
    ("aeroway", "runway", "runway"),
    ("aeroway", "taxiway", "taxiway"),
    ("aeroway", "aerodrome", "aerodrome"),
];

const ROAD_HIGHWAYS: &[&str] = &[
    "motorway",
    "trunk",
    "primary",
    "secondary",
    "tertiary",
    "residential",
    "service",
    "unclassified",
    "pedestrian",
    "footway",
    "cycleway",
    "path",
    "living_street",
    "track",
    "bus_guideway",
    "escape",
    "raceway",
    "road",
    "busway",
    "motorway_link",
    "trunk_link",
    "primary_link",
    "secondary_link",
    "tertiary_link",
    "bridleway",
    "steps",
    "corridor",
    "sidewalk",
];

const WATER_NATURAL: &[&str] = &[
    "water",
    "bay",
    "strait",
    "coastline",
    "beach",
    "shoal",
    "reef",
    "wetland",
    "spring",
    "hot_spring",
    "geyser",
];
const WATER_WATERWAYS: &[&str] = &[
    "river",
    "stream",
    "canal",
    "drain",
    "ditch",
    "rapids",
    "waterfall",
    "dam",
    "weir",
    "lock_gate",
    "dock",
    "boatyard",
    "fuel",
];
const WATER_AMENITIES: &[&str] = &["fountain", "swimming_pool"];
const WATER_MAN_MADE: &[&str] = &[
    "reservoir",
    "water_tower",
    "water_well",
    "water_works",
    "pier",
    "breakwater",
    "groyne",
    "lighthouse",
    "floating_dock",
];
const WATER_LEISURE: &[&str] = &[
    "swimming_pool",
    "water_park",
    "marina",
    "slipway",
    "boat_sharing",
];
const WATER_LANDUSE: &[&str] = &["reservoir", "salt_pond", "aquaculture", "basin"];

const PARK_LEISURE: &[&str] = &["park", "garden", "playground", "dog_park", "nature_reserve"];
const PARK_LANDUSE: &[&str] = &["grass", "recreation_ground", "village_green"];

fn tag<'a>(tags: &'a Tags, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str)
}

fn tag_is(tags: &Tags, key: &str, value: &str) -> bool {
    tag(tags, key) == Some(value)
}

/// The value of `key` when it is one of `values`.
fn tag_in<'a>(tags: &'a Tags, key: &str, values: &[&str]) -> Option<&'a str> {
    tag(tags, key).filter(|value| values.contains(value))
}

fn first_listed(tags: &Tags, lists: &[(&str, &[&str])]) -> Option<String> {
    lists
        .iter()
        .find_map(|(key, values)| tag_in(tags, key, values))
        .map(str::to_owned)
}

fn is_healthcare(tags: &Tags) -> bool {
    tag_in(tags, "amenity", HEALTHCARE_AMENITIES).is_some()
        || tag_in(tags, "healthcare", HEALTHCARE_VALUES).is_some()
}

fn healthcare_subtype(tags: &Tags) -> String {
    tag_in(tags, "amenity", HEALTHCARE_AMENITIES)
        .or_else(|| tag(tags, "healthcare"))
        .unwrap_or(DEFAULT_SUBTYPE)
        .to_owned()
}

fn is_food(tags: &Tags) -> bool {
    tag_in(tags, "amenity", FOOD_AMENITIES).is_some() || tag_in(tags, "shop", FOOD_SHOPS).is_some()
}

fn food_subtype(tags: &Tags) -> String {
    first_listed(tags, &[("amenity", FOOD_AMENITIES), ("shop", FOOD_SHOPS)])
        .unwrap_or_else(|| DEFAULT_SUBTYPE.to_owned())
}

fn is_financial(tags: &Tags) -> bool {
    tag_in(tags, "amenity", FINANCIAL_AMENITIES).is_some()
}

fn financial_subtype(tags: &Tags) -> String {
    first_listed(tags, &[("amenity", FINANCIAL_AMENITIES)])
        .unwrap_or_else(|| DEFAULT_SUBTYPE.to_owned())
}

fn is_retail(tags: &Tags) -> bool {
    tag_in(tags, "shop", RETAIL_SHOPS).is_some()
        || tag_in(tags, "amenity", RETAIL_AMENITIES).is_some()
}

fn retail_subtype(tags: &Tags) -> String {
    first_listed(tags, &[("shop", RETAIL_SHOPS), ("amenity", RETAIL_AMENITIES)])
        .unwrap_or_else(|| DEFAULT_SUBTYPE.to_owned())
}

fn is_public_facility(tags: &Tags) -> bool {
    tag_in(tags, "amenity", PUBLIC_FACILITY_AMENITIES).is_some()
}

fn public_facility_subtype(tags: &Tags) -> String {
    first_listed(tags, &[("amenity", PUBLIC_FACILITY_AMENITIES)])
        .unwrap_or_else(|| DEFAULT_SUBTYPE.to_owned())
}

fn is_wheelchair_parking(tags: &Tags) -> bool {
    tag_is(tags, "amenity", "parking") && tag_is(tags, "wheelchair", "yes")
}

fn is_accessibility(tags: &Tags) -> bool {
    is_wheelchair_parking(tags)
        || tag_is(tags, "access", "disabled")
        || (tag_is(tags, "amenity", "parking_space") && tag_is(tags, "parking_space", "disabled"))
}

fn accessibility_subtype(tags: &Tags) -> String {
    let subtype = if is_wheelchair_parking(tags) {
        "wheelchair_parking"
    } else if tag_is(tags, "access", "disabled") {
        "disabled_access"
    } else {
        DEFAULT_SUBTYPE
    };
    subtype.to_owned()
}

fn is_transit(tags: &Tags) -> bool {
    [
        ("highway", TRANSIT_HIGHWAYS),
        ("railway", TRANSIT_RAILWAYS),
        ("public_transport", TRANSIT_PUBLIC_TRANSPORT),
        ("amenity", TRANSIT_AMENITIES),
        ("aerialway", TRANSIT_AERIALWAYS),
        ("aeroway", TRANSIT_AEROWAYS),
    ]
    .iter()
    .any(|(key, values)| tag_in(tags, key, values).is_some())
}

fn transit_subtype(tags: &Tags) -> String {
    TRANSIT_SUBTYPES
        .iter()
        .find(|(key, value, _)| tag_is(tags, key, value))
        .map_or(DEFAULT_SUBTYPE, |(_, _, subtype)| *subtype)
        .to_owned()
}

fn is_building(tags: &Tags) -> bool {
    tag(tags, "building").is_some_and(|value| value != "no")
}

fn building_subtype(tags: &Tags) -> String {
    tag(tags, "building").unwrap_or("yes").to_owned()
}

fn is_road(tags: &Tags) -> bool {
    tag_in(tags, "highway", ROAD_HIGHWAYS).is_some()
}

fn road_subtype(tags: &Tags) -> String {
    tag(tags, "highway").unwrap_or("road").to_owned()
}

fn is_water(tags: &Tags) -> bool {
    [
        ("natural", WATER_NATURAL),
        ("waterway", WATER_WATERWAYS),
        ("amenity", WATER_AMENITIES),
        ("man_made", WATER_MAN_MADE),
        ("leisure", WATER_LEISURE),
        ("landuse", WATER_LANDUSE),
    ]
    .iter()
    .any(|(key, values)| tag_in(tags, key, values).is_some())
}

fn water_subtype(tags: &Tags) -> String {
    if let Some(waterway) = tag(tags, "waterway").filter(|value| !value.is_empty()) {
        return waterway.to_owned();
    }
    first_listed(
        tags,
        &[
            ("natural", WATER_NATURAL),
            ("man_made", WATER_MAN_MADE),
            ("amenity", WATER_AMENITIES),
            ("leisure", WATER_LEISURE),
            ("landuse", WATER_LANDUSE),
        ],
    )
    .unwrap_or_else(|| "water".to_owned())
}

fn is_park(tags: &Tags) -> bool {
    tag_in(tags, "leisure", PARK_LEISURE).is_some()
        || tag_in(tags, "landuse", PARK_LANDUSE).is_some()
}

fn park_subtype(tags: &Tags) -> String {
    tag(tags, "leisure")
        .or_else(|| tag(tags, "landuse"))
        .unwrap_or("park")
        .to_owned()
}
