//! Static style catalog keyed by category and subtype.
//!
//! Every category has a default rule, so lookups never fail. Rules with no
//! fill are stroked lines; rules with a radius are point markers.

use crate::category::Category;

/// Outline drawn beneath a road stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Casing {
    /// Casing colour.
    pub color: &'static str,
    /// Casing stroke width.
    pub width: f64,
}

/// Visual attributes for one `(category, subtype)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRule {
    /// Fill colour. `None` marks a line style.
    pub fill: Option<&'static str>,
    /// Stroke colour.
    pub stroke: Option<&'static str>,
    /// Stroke width in image units.
    pub stroke_width: Option<f64>,
    /// SVG dash pattern such as `"2,3"`.
    pub dasharray: Option<&'static str>,
    /// Marker radius for point features.
    pub radius: Option<f64>,
    /// Road casing.
    pub casing: Option<Casing>,
    /// Element opacity.
    pub opacity: Option<f64>,
}

impl StyleRule {
    const EMPTY: Self = Self {
        fill: None,
        stroke: None,
        stroke_width: None,
        dasharray: None,
        radius: None,
        casing: None,
        opacity: None,
    };

    /// Whether this rule strokes a line instead of filling an area.
    pub const fn is_line(&self) -> bool {
        self.fill.is_none()
    }

    const fn dashed(self, pattern: &'static str) -> Self {
        Self {
            dasharray: Some(pattern),
            ..self
        }
    }

    const fn with_opacity(self, opacity: f64) -> Self {
        Self {
            opacity: Some(opacity),
            ..self
        }
    }
}

struct CategoryStyles {
    default: StyleRule,
    subtypes: &'static [(&'static str, StyleRule)],
}

/// Look up the rule for `subtype`, falling back to the category default.
///
/// # Examples
/// ```
/// use tilewright_core::{Category, style_for};
///
/// let hospital = style_for(Category::Healthcare, "hospital");
/// assert_eq!(hospital.fill, Some("#ffccdd"));
/// let unknown = style_for(Category::Healthcare, "no-such-subtype");
/// assert_eq!(unknown, style_for(Category::Healthcare, "default"));
/// ```
pub fn style_for(category: Category, subtype: &str) -> &'static StyleRule {
    let styles = category_styles(category);
    styles
        .subtypes
        .iter()
        .find(|(name, _)| *name == subtype)
        .map_or(&styles.default, |(_, rule)| rule)
}

const fn category_styles(category: Category) -> &'static CategoryStyles {
    match category {
        Category::Parks => &PARKS,
        Category::Water => &WATER,
        Category::Buildings => &BUILDINGS,
        Category::Roads => &ROADS,
        Category::Transit => &TRANSIT,
        Category::Accessibility => &ACCESSIBILITY,
        Category::PublicFacilities => &PUBLIC_FACILITIES,
        Category::ShoppingRetail => &SHOPPING_RETAIL,
        Category::FoodSustenance => &FOOD_SUSTENANCE,
        Category::FinancialServices => &FINANCIAL_SERVICES,
        Category::Healthcare => &HEALTHCARE,
    }
}

const fn area(fill: &'static str, stroke: &'static str, width: f64) -> StyleRule {
    StyleRule {
        fill: Some(fill),
        stroke: Some(stroke),
        stroke_width: Some(width),
        ..StyleRule::EMPTY
    }
}

const fn marker(fill: &'static str, stroke: &'static str, width: f64, radius: f64) -> StyleRule {
    StyleRule {
        radius: Some(radius),
        ..area(fill, stroke, width)
    }
}

const fn line(color: &'static str, width: f64) -> StyleRule {
    StyleRule {
        stroke: Some(color),
        stroke_width: Some(width),
        ..StyleRule::EMPTY
    }
}

const fn road(color: &'static str, width: f64, casing: &'static str, casing_width: f64) -> StyleRule {
    StyleRule {
        casing: Some(Casing {
            color: casing,
            width: casing_width,
        }),
        ..line(color, width)
    }
}

const PARKS: CategoryStyles = CategoryStyles {
    default: area("#c8e6c9", "#4caf50", 1.0),
    subtypes: &[
        ("park", area("#c8e6c9", "#4caf50", 1.0)),
        ("garden", area("#dcedc8", "#689f38", 1.0)),
        ("playground", area("#ffecb3", "#ffa000", 1.5)),
        ("dog_park", area("#fff3e0", "#f57c00", 1.0)),
        ("nature_reserve", area("#e8f5e8", "#2e7d32", 1.5)),
        ("grass", area("#e8f5e8", "#81c784", 0.5)),
    ],
};

const WATER: CategoryStyles = CategoryStyles {
    default: area("#aad3df", "#4a80aa", 1.0),
    subtypes: &[
        ("water", area("#aad3df", "#4a80aa", 1.0)),
        ("bay", area("#87ceeb", "#4682b4", 1.5)),
        ("strait", area("#87ceeb", "#4682b4", 1.5)),
        ("coastline", line("#2e5984", 2.0)),
        ("beach", area("#fff8dc", "#daa520", 1.0)),
        ("shoal", area("#e6f3ff", "#87ceeb", 1.0).with_opacity(0.7)),
        ("reef", area("#ffcccb", "#ff6347", 1.5)),
        ("wetland", area("#b8e6b8", "#228b22", 1.0)),
        ("spring", marker("#00ffff", "#0080ff", 2.0, 4.0)),
        ("hot_spring", marker("#ff6b6b", "#ff3333", 2.0, 5.0)),
        ("geyser", marker("#ffa500", "#ff8c00", 2.5, 6.0)),
        ("river", line("#4a80aa", 4.0)),
        ("stream", line("#6a90ba", 2.0)),
        ("canal", line("#4a80aa", 3.0)),
        ("drain", line("#708090", 1.5).dashed("4,2")),
        ("ditch", line("#708090", 1.0).dashed("2,2")),
        ("rapids", line("#ffffff", 3.0).dashed("2,1")),
        ("waterfall", marker("#e0f6ff", "#0080ff", 3.0, 8.0)),
        ("dam", area("#696969", "#2f4f4f", 3.0)),
        ("weir", area("#708090", "#2f4f4f", 2.0)),
        ("lock_gate", marker("#8b4513", "#654321", 2.0, 6.0)),
        ("reservoir", area("#b0e0e6", "#4682b4", 1.5)),
        ("water_tower", marker("#c0c0c0", "#808080", 2.0, 10.0)),
        ("water_well", marker("#8b4513", "#654321", 2.0, 4.0)),
        ("water_works", area("#87ceeb", "#4682b4", 2.0)),
        ("dock", area("#8b4513", "#654321", 2.0)),
        ("boatyard", area("#deb887", "#d2691e", 1.5)),
        ("fuel", marker("#ff6347", "#ff4500", 2.0, 6.0)),
        ("pier", area("#8b4513", "#654321", 2.0)),
        ("breakwater", area("#696969", "#2f4f4f", 2.5)),
        ("groyne", area("#708090", "#2f4f4f", 2.0)),
        ("lighthouse", marker("#ff0000", "#8b0000", 2.5, 8.0)),
        ("floating_dock", area("#daa520", "#b8860b", 1.5)),
        ("fountain", marker("#87ceeb", "#4682b4", 2.0, 5.0)),
        ("swimming_pool", area("#00bfff", "#0080ff", 2.0)),
        ("water_park", area("#40e0d0", "#20b2aa", 2.0)),
        ("marina", area("#f0e68c", "#bdb76b", 1.5)),
        ("slipway", area("#bc8f8f", "#a0522d", 2.0)),
        ("boat_sharing", marker("#87ceeb", "#4682b4", 1.5, 6.0)),
        ("salt_pond", area("#ffc0cb", "#ff69b4", 1.0)),
        ("aquaculture", area("#add8e6", "#4682b4", 1.0)),
        ("basin", area("#b0e0e6", "#4682b4", 1.0)),
    ],
};

const BUILDINGS: CategoryStyles = CategoryStyles {
    default: area("#8e9aaf", "#5d6674", 1.0),
    subtypes: &[
        ("house", area("#d4c5b9", "#a69b8c", 1.0)),
        ("residential", area("#d4c5b9", "#a69b8c", 1.0)),
        ("apartments", area("#d4c5b9", "#a69b8c", 1.0)),
        ("detached", area("#d4c5b9", "#a69b8c", 1.0)),
        ("semidetached_house", area("#d4c5b9", "#a69b8c", 1.0)),
        ("terrace", area("#d4c5b9", "#a69b8c", 1.0)),
        ("dormitory", area("#dcc5b9", "#b3a08c", 1.0)),
        ("bungalow", area("#d4c5b9", "#a69b8c", 1.0)),
        ("cabin", area("#c4b5a9", "#96897c", 1.0)),
        ("commercial", area("#e6cccc", "#cc9999", 1.0)),
        ("office", area("#d9d0c9", "#b3a69c", 1.0)),
        ("industrial", area("#dcd5cc", "#b3a999", 1.0)),
        ("retail", area("#e6cccc", "#cc9999", 1.0)),
        ("warehouse", area("#e5ddd5", "#ccbbaa", 1.0)),
        ("supermarket", area("#ffcccc", "#ff9999", 1.5)),
        ("hotel", area("#e6d5cc", "#ccaa99", 1.5)),
        ("kiosk", area("#dcc5b9", "#b3a08c", 1.0)),
        ("civic", area("#d4d5e8", "#a9aac4", 2.0)),
        ("government", area("#d4d5e8", "#a9aac4", 2.0)),
        ("hospital", area("#fdd", "#da8", 2.0)),
        ("school", area("#f0e5d8", "#ccb399", 2.0)),
        ("university", area("#f0e5d8", "#ccb399", 2.0)),
        ("college", area("#f0e5d8", "#ccb399", 2.0)),
        ("kindergarten", area("#ffe5cc", "#ffcc99", 1.5)),
        ("public", area("#d4d5e8", "#a9aac4", 1.5)),
        ("train_station", area("#d4c5e8", "#a99bc4", 2.0)),
        ("transportation", area("#d4c5e8", "#a99bc4", 1.5)),
        ("cathedral", area("#e6d9ff", "#ccb3ff", 2.0)),
        ("chapel", area("#e6d9ff", "#ccb3ff", 1.5)),
        ("church", area("#e6d9ff", "#ccb3ff", 2.0)),
        ("mosque", area("#d9ffe6", "#b3ffcc", 2.0)),
        ("temple", area("#ffe6d9", "#ffccb3", 2.0)),
        ("synagogue", area("#d9e6ff", "#b3ccff", 2.0)),
        ("shrine", area("#ffd9e6", "#ffb3cc", 1.5)),
        ("barn", area("#d4a76a", "#b58652", 1.0)),
        ("bridge", area("#b8b8b8", "#888", 2.0)),
        ("bunker", area("#999", "#666", 2.0)),
        ("carport", area("#ddd", "#aaa", 1.0)),
        ("conservatory", area("#eeffee", "#aaccaa", 1.0)),
        ("construction", area("#ffcc99", "#ff9966", 1.0).dashed("5,3")),
        ("garage", area("#ddd", "#aaa", 1.0)),
        ("garages", area("#ddd", "#aaa", 1.0)),
        ("greenhouse", area("#eeffee", "#aaccaa", 1.0)),
        ("hangar", area("#d5d5e8", "#aaaac4", 1.5)),
        ("hut", area("#c4b5a9", "#96897c", 1.0)),
        ("roof", area("#ddd", "#aaa", 0.5)),
        ("shed", area("#c4b5a9", "#96897c", 1.0)),
        ("yes", area("#8e9aaf", "#5d6674", 1.0)),
    ],
};

const ROADS: CategoryStyles = CategoryStyles {
    default: road("#dddddd", 2.0, "#999", 3.0),
    subtypes: &[
        ("motorway", road("#e892a2", 8.0, "#dc2a67", 10.0)),
        ("trunk", road("#f9b29c", 7.0, "#e06d5f", 9.0)),
        ("primary", road("#fcd6a4", 6.0, "#e5c278", 8.0)),
        ("secondary", road("#f7fabf", 5.0, "#d4d486", 7.0)),
        ("tertiary", road("#ffffff", 4.0, "#bbb", 6.0)),
        ("motorway_link", road("#e892a2", 4.0, "#dc2a67", 5.0)),
        ("trunk_link", road("#f9b29c", 4.0, "#e06d5f", 5.0)),
        ("primary_link", road("#fcd6a4", 4.0, "#e5c278", 5.0)),
        ("secondary_link", road("#f7fabf", 3.0, "#d4d486", 4.0)),
        ("tertiary_link", road("#ffffff", 3.0, "#bbb", 4.0)),
        ("residential", road("#ffffff", 3.0, "#999", 5.0)),
        ("living_street", road("#f0f0f0", 3.0, "#999", 5.0).dashed("10,3")),
        ("service", road("#ffffff", 2.0, "#aaa", 3.0)),
        ("unclassified", road("#ffffff", 3.0, "#999", 5.0)),
        ("road", road("#dddddd", 2.0, "#999", 3.0)),
        ("pedestrian", road("#ededed", 3.0, "#ccc", 4.0)),
        ("footway", road("#faa", 1.5, "#f88", 2.0).dashed("2,3")),
        ("sidewalk", road("#faa", 1.5, "#f88", 2.0)),
        ("cycleway", road("#aaf", 1.5, "#88f", 2.0).dashed("2,3")),
        ("path", road("#ccc", 1.0, "#aaa", 1.5).dashed("2,2")),
        ("bridleway", road("#d4a76a", 2.0, "#b58652", 3.0).dashed("4,2")),
        ("steps", road("#faa", 3.0, "#f88", 4.0).dashed("1,1")),
        ("corridor", road("#ffcccc", 2.0, "#ff9999", 3.0)),
        ("track", road("#dfb", 2.0, "#9d7", 3.0).dashed("3,3")),
        ("bus_guideway", road("#6682ff", 4.0, "#4666ff", 5.0)),
        ("busway", road("#6682ff", 4.0, "#4666ff", 5.0)),
        ("escape", road("#ff9999", 3.0, "#ff6666", 4.0).dashed("5,5")),
        ("raceway", road("#ffcccc", 4.0, "#ff9999", 5.0)),
    ],
};

const TRANSIT: CategoryStyles = CategoryStyles {
    default: marker("#ff9800", "#ff6600", 2.0, 5.0),
    subtypes: &[
        ("bus_stop", marker("#ff9800", "#ff6600", 2.0, 5.0)),
        ("bus_station", marker("#ff5722", "#d84315", 2.5, 12.0)),
        ("bus_guideway", line("#ff7043", 4.0).dashed("8,4")),
        ("station", marker("#9c27b0", "#7b1fa2", 2.5, 10.0)),
        ("halt", marker("#ba68c8", "#9c27b0", 2.0, 6.0)),
        ("subway_entrance", marker("#2196f3", "#1976d2", 2.0, 6.0)),
        ("rail", line("#424242", 3.0)),
        ("subway", line("#1976d2", 4.0).dashed("12,4")),
        ("tram", line("#00bcd4", 2.5)),
        ("tram_stop", marker("#00bcd4", "#0097a7", 2.0, 5.0)),
        ("light_rail", line("#4caf50", 3.0)),
        ("narrow_gauge", line("#795548", 2.0)),
        ("funicular", line("#ff5722", 2.5).dashed("6,2")),
        ("monorail", line("#e91e63", 3.5)),
        ("platform", area("#ffc107", "#ff8f00", 1.5)),
        ("stop_position", marker("#ffeb3b", "#fbc02d", 1.5, 3.0)),
        ("ferry_terminal", marker("#607d8b", "#455a64", 2.0, 8.0)),
        ("cable_car", line("#795548", 2.0).dashed("4,8")),
        ("gondola", line("#8bc34a", 2.0).dashed("4,8")),
        ("chair_lift", line("#cddc39", 1.5).dashed("3,6")),
        ("drag_lift", line("#ffeb3b", 1.5).dashed("2,4")),
        ("rope_tow", line("#ffc107", 1.0).dashed("2,2")),
        ("zip_line", line("#ff9800", 1.5).dashed("6,2")),
        ("aerialway_station", marker("#8bc34a", "#689f38", 2.0, 7.0)),
        ("loading_point", marker("#cddc39", "#9e9d24", 1.5, 4.0)),
        ("terminal", marker("#3f51b5", "#303f9f", 2.5, 15.0)),
        ("gate", marker("#5c6bc0", "#3f51b5", 1.5, 4.0)),
        ("runway", area("#424242", "#212121", 2.0)),
        ("taxiway", area("#616161", "#424242", 1.0)),
        ("aerodrome", area("#e8eaf6", "#3f51b5", 2.0)),
    ],
};

const ACCESSIBILITY: CategoryStyles = CategoryStyles {
    default: area("#f1f8e9", "#689f38", 1.5),
    subtypes: &[
        ("wheelchair_parking", area("#e8f5e8", "#4caf50", 2.0)),
        ("disabled_access", area("#e3f2fd", "#2196f3", 2.0)),
    ],
};

const PUBLIC_FACILITIES: CategoryStyles = CategoryStyles {
    default: marker("#e3f2fd", "#1976d2", 2.0, 6.0),
    subtypes: &[
        ("toilets", marker("#e3f2fd", "#1976d2", 2.5, 8.0)),
        ("shower", marker("#bbdefb", "#1565c0", 2.5, 7.0)),
        ("drinking_water", marker("#e0f2f1", "#00695c", 2.0, 6.0)),
        ("bench", marker("#efebe9", "#5d4037", 2.0, 5.0)),
        ("shelter", marker("#f3e5f5", "#7b1fa2", 2.5, 9.0)),
        ("bicycle_repair_station", marker("#fff3e0", "#ef6c00", 2.5, 7.0)),
        ("charging_station", marker("#fff9c4", "#f9a825", 2.5, 8.0)),
        ("waste_basket", marker("#e8f5e8", "#2e7d32", 2.0, 4.0)),
        ("recycling", marker("#c8e6c9", "#388e3c", 2.5, 7.0)),
    ],
};

const SHOPPING_RETAIL: CategoryStyles = CategoryStyles {
    default: marker("#e3f2fd", "#1976d2", 2.0, 6.0),
    subtypes: &[
        ("department_store", marker("#e3f2fd", "#1976d2", 3.0, 10.0)),
        ("mall", marker("#e8eaf6", "#3f51b5", 3.0, 12.0)),
        ("supermarket", marker("#e0f2f1", "#00796b", 2.5, 8.0)),
        ("general", marker("#f3e5f5", "#7b1fa2", 2.0, 6.0)),
        ("wholesale", marker("#fce4ec", "#c2185b", 2.0, 7.0)),
        ("variety_store", marker("#fff3e0", "#f57c00", 2.0, 6.0)),
        ("kiosk", marker("#ffebee", "#d32f2f", 1.5, 4.0)),
        ("second_hand", marker("#efebe9", "#5d4037", 1.5, 5.0)),
        ("charity", marker("#e8f5e8", "#388e3c", 1.5, 5.0)),
        ("clothes", marker("#f8bbd9", "#e91e63", 2.0, 6.0)),
        ("shoes", marker("#f3e5f5", "#9c27b0", 2.0, 5.0)),
        ("bag", marker("#ede7f6", "#673ab7", 1.5, 4.0)),
        ("boutique", marker("#fce4ec", "#ad1457", 2.5, 6.0)),
        ("fabric", marker("#e1bee7", "#8e24aa", 1.5, 4.0)),
        ("jewelry", marker("#fff59d", "#fbc02d", 2.5, 5.0)),
        ("leather", marker("#d7ccc8", "#6d4c41", 2.0, 5.0)),
        ("watches", marker("#ffecb3", "#ff8f00", 2.0, 4.0)),
        ("tailor", marker("#f8bbd9", "#c2185b", 1.5, 4.0)),
        ("electronics", marker("#ffccbc", "#ff5722", 2.5, 7.0)),
        ("computer", marker("#ffe0b2", "#f57c00", 2.5, 6.0)),
        ("mobile_phone", marker("#fff3e0", "#ef6c00", 2.0, 5.0)),
        ("hifi", marker("#ffccbc", "#d84315", 2.0, 5.0)),
        ("telecommunication", marker("#ffe0b2", "#e65100", 2.0, 6.0)),
        ("beauty", marker("#e0f2f1", "#00796b", 2.0, 5.0)),
        ("chemist", marker("#e8f5e8", "#2e7d32", 2.5, 6.0)),
        ("cosmetics", marker("#f1f8e9", "#558b2f", 2.0, 5.0)),
        ("hairdresser", marker("#e0f7fa", "#0097a7", 2.0, 5.0)),
        ("massage", marker("#e8f5e8", "#388e3c", 1.5, 4.0)),
        ("optician", marker("#f3e5f5", "#7b1fa2", 2.0, 5.0)),
        ("perfumery", marker("#fce4ec", "#ad1457", 1.5, 4.0)),
        ("tattoo", marker("#ffebee", "#c62828", 1.5, 4.0)),
        ("furniture", marker("#efebe9", "#5d4037", 2.5, 7.0)),
        ("garden_centre", marker("#c8e6c9", "#388e3c", 2.5, 7.0)),
        ("hardware", marker("#eceff1", "#455a64", 2.5, 6.0)),
        ("doityourself", marker("#fff8e1", "#f9a825", 2.5, 7.0)),
        ("florist", marker("#f1f8e9", "#689f38", 2.0, 5.0)),
        ("appliance", marker("#e1f5fe", "#0288d1", 2.0, 6.0)),
        ("marketplace", marker("#fff3e0", "#f57c00", 3.0, 10.0)),
        ("vending_machine", marker("#e0e0e0", "#616161", 1.0, 2.0)),
    ],
};

const FOOD_SUSTENANCE: CategoryStyles = CategoryStyles {
    default: marker("#ffcc80", "#ff8a65", 1.5, 5.0),
    subtypes: &[
        ("restaurant", marker("#ffcc80", "#ff8a65", 2.0, 6.0)),
        ("cafe", marker("#d7ccc8", "#8d6e63", 1.5, 5.0)),
        ("fast_food", marker("#ffab91", "#ff5722", 1.5, 5.0)),
        ("bar", marker("#ce93d8", "#9c27b0", 2.0, 5.0)),
        ("pub", marker("#ddbf94", "#8d6e63", 2.0, 6.0)),
        ("food_court", marker("#ffcc80", "#ff8a65", 2.5, 8.0)),
        ("ice_cream", marker("#f8bbd9", "#e91e63", 1.5, 4.0)),
        ("biergarten", marker("#c8e6c9", "#4caf50", 2.0, 7.0)),
        ("nightclub", marker("#b39ddb", "#673ab7", 2.0, 6.0)),
        ("supermarket", marker("#a5d6a7", "#4caf50", 2.5, 8.0)),
        ("convenience", marker("#c5e1a5", "#689f38", 2.0, 6.0)),
        ("greengrocer", marker("#81c784", "#388e3c", 2.0, 5.0)),
        ("farm", marker("#aed581", "#689f38", 2.0, 6.0)),
        ("health_food", marker("#c8e6c9", "#4caf50", 1.5, 5.0)),
        ("frozen_food", marker("#b3e5fc", "#03a9f4", 1.5, 5.0)),
        ("bakery", marker("#fff176", "#fbc02d", 2.0, 5.0)),
        ("pastry", marker("#ffcc02", "#ff8f00", 1.5, 4.0)),
        ("confectionery", marker("#ffcdd2", "#e57373", 1.5, 4.0)),
        ("chocolate", marker("#d7ccc8", "#8d6e63", 1.5, 4.0)),
        ("nuts", marker("#ddbf94", "#a1887f", 1.0, 3.0)),
        ("beverages", marker("#90caf9", "#2196f3", 1.5, 5.0)),
        ("coffee", marker("#d7ccc8", "#6d4c41", 2.0, 5.0)),
        ("tea", marker("#c8e6c9", "#388e3c", 1.5, 4.0)),
        ("wine", marker("#f8bbd9", "#ad1457", 2.0, 5.0)),
        ("alcohol", marker("#ce93d8", "#7b1fa2", 2.0, 5.0)),
        ("butcher", marker("#ef9a9a", "#f44336", 2.0, 5.0)),
        ("seafood", marker("#80deea", "#00acc1", 2.0, 5.0)),
        ("cheese", marker("#fff59d", "#f9a825", 1.5, 4.0)),
        ("deli", marker("#ffccd5", "#e57373", 2.0, 5.0)),
    ],
};

const FINANCIAL_SERVICES: CategoryStyles = CategoryStyles {
    default: marker("#bbdefb", "#1976d2", 2.0, 6.0),
    subtypes: &[
        ("bank", marker("#bbdefb", "#1976d2", 2.5, 8.0)),
        ("atm", marker("#c8e6c9", "#388e3c", 2.0, 4.0)),
        ("post_office", marker("#ffcdd2", "#d32f2f", 2.5, 7.0)),
        ("bureau_de_change", marker("#fff59d", "#f57f17", 2.0, 6.0)),
        ("money_transfer", marker("#ffe082", "#ff8f00", 2.0, 6.0)),
        ("payment_centre", marker("#ffcc80", "#ef6c00", 2.0, 6.0)),
    ],
};

const HEALTHCARE: CategoryStyles = CategoryStyles {
    default: marker("#ffe0e0", "#cc6666", 1.5, 5.0),
    subtypes: &[
        ("hospital", marker("#ffccdd", "#cc5577", 2.5, 8.0)),
        ("clinic", marker("#ffe0e0", "#cc7777", 2.0, 6.0)),
        ("doctors", marker("#ffe8e8", "#cc8888", 1.5, 5.0)),
        ("dentist", marker("#f0e8ff", "#9966cc", 1.5, 5.0)),
        ("pharmacy", marker("#e0ffe0", "#66cc66", 2.0, 6.0)),
        ("veterinary", marker("#fff0e0", "#cc9966", 1.5, 5.0)),
        ("alternative", marker("#f8f0ff", "#aa88cc", 1.0, 4.0)),
        ("audiologist", marker("#fff8f0", "#ccaa88", 1.0, 4.0)),
        ("birthing_centre", marker("#fff0f8", "#cc88aa", 2.0, 6.0)),
        ("blood_bank", marker("#ffe0e0", "#cc6666", 2.0, 6.0)),
        ("blood_donation", marker("#ffe8e8", "#cc7777", 1.5, 5.0)),
        ("centre", marker("#ffe0f0", "#cc7799", 2.0, 6.0)),
        ("counselling", marker("#f0f0ff", "#7799cc", 1.5, 5.0)),
        ("dialysis", marker("#e0f0ff", "#6699cc", 2.0, 6.0)),
        ("hospice", marker("#f8f8f0", "#aaaa88", 2.0, 6.0)),
        ("laboratory", marker("#f0fff0", "#88cc88", 1.5, 5.0)),
        ("midwife", marker("#fff0f8", "#cc88aa", 1.5, 5.0)),
        ("nurse", marker("#f0f8ff", "#88aacc", 1.0, 4.0)),
        ("occupational_therapist", marker("#f8fff0", "#aacc88", 1.0, 4.0)),
        ("optometrist", marker("#fff8f8", "#ccaaaa", 1.5, 5.0)),
        ("physiotherapist", marker("#f0fff8", "#88ccaa", 1.5, 5.0)),
        ("podiatrist", marker("#fff0f0", "#cc8888", 1.0, 4.0)),
        ("psychotherapist", marker("#f8f0ff", "#aa88cc", 1.5, 5.0)),
        ("rehabilitation", marker("#f0f8ff", "#88aacc", 2.0, 6.0)),
        ("sample_collection", marker("#f8fff8", "#aaccaa", 1.0, 4.0)),
        ("speech_therapist", marker("#fff8f0", "#ccaa88", 1.0, 4.0)),
        ("vaccination_centre", marker("#e0ffe0", "#66cc66", 2.0, 6.0)),
    ],
};
