//! Renderable feature categories.
//!
//! The enum order is the render order: earlier categories are drawn first and
//! end up underneath later ones. Classification uses a separate priority
//! order, see [`Category::PRIORITY`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Category a classified feature is bucketed and styled under.
///
/// # Examples
/// ```
/// use tilewright_core::Category;
///
/// assert_eq!(Category::FoodSustenance.as_str(), "food_sustenance");
/// assert_eq!("parks".parse::<Category>(), Ok(Category::Parks));
/// assert!(Category::Parks < Category::Healthcare);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Category {
    /// Parks, gardens and recreational green space.
    Parks,
    /// Water bodies, waterways and marine infrastructure.
    Water,
    /// Building footprints.
    Buildings,
    /// The highway network.
    Roads,
    /// Public transport stops, lines and terminals.
    Transit,
    /// Accessible parking and access points.
    Accessibility,
    /// Toilets, benches, drinking water and similar amenities.
    PublicFacilities,
    /// Shops and markets.
    ShoppingRetail,
    /// Restaurants, cafes and food shops.
    FoodSustenance,
    /// Banks, ATMs and postal services.
    FinancialServices,
    /// Hospitals, clinics and other healthcare providers.
    Healthcare,
}

/// Returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category in render order.
    pub const RENDER_ORDER: [Self; 11] = [
        Self::Parks,
        Self::Water,
        Self::Buildings,
        Self::Roads,
        Self::Transit,
        Self::Accessibility,
        Self::PublicFacilities,
        Self::ShoppingRetail,
        Self::FoodSustenance,
        Self::FinancialServices,
        Self::Healthcare,
    ];

    /// Every category in classification priority order. Tag sets often
    /// satisfy several categories; the first match wins.
    pub const PRIORITY: [Self; 11] = [
        Self::Healthcare,
        Self::FoodSustenance,
        Self::FinancialServices,
        Self::ShoppingRetail,
        Self::PublicFacilities,
        Self::Accessibility,
        Self::Transit,
        Self::Buildings,
        Self::Roads,
        Self::Water,
        Self::Parks,
    ];

    /// Snake-case name used for SVG group ids and JSON.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parks => "parks",
            Self::Water => "water",
            Self::Buildings => "buildings",
            Self::Roads => "roads",
            Self::Transit => "transit",
            Self::Accessibility => "accessibility",
            Self::PublicFacilities => "public_facilities",
            Self::ShoppingRetail => "shopping_retail",
            Self::FoodSustenance => "food_sustenance",
            Self::FinancialServices => "financial_services",
            Self::Healthcare => "healthcare",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::RENDER_ORDER
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}
