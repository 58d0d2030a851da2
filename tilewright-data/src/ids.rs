//! Type-prefixed element identifiers.
//!
//! OSM node, way and relation ids live in separate namespaces. Features mix
//! all three, so the top two bits encode the element type: `00` node, `01`
//! way, `10` relation. The remaining 62 bits carry the raw id.

use std::fmt;

use log::warn;

const WAY_ID_PREFIX: u64 = 1 << 62;
const REL_ID_PREFIX: u64 = 1 << 63;
const TYPE_ID_MASK: u64 = (1 << 62) - 1;

/// The OSM element type an identifier belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// A node.
    Node,
    /// A way.
    Way,
    /// A relation.
    Relation,
}

impl ElementKind {
    /// Lower-case element type name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode a raw OSM id into the shared feature id space.
///
/// Negative ids and ids wider than 62 bits are rejected with a warning.
///
/// # Examples
/// ```
/// use tilewright_data::{ElementKind, decode_element_id, encode_element_id};
///
/// let id = encode_element_id(ElementKind::Way, 42).expect("in range");
/// assert_eq!(decode_element_id(id), (ElementKind::Way, 42));
/// assert!(encode_element_id(ElementKind::Node, -1).is_none());
/// ```
pub fn encode_element_id(kind: ElementKind, raw_id: i64) -> Option<u64> {
    match u64::try_from(raw_id) {
        Ok(base) => {
            if base > TYPE_ID_MASK {
                warn!(
                    "Skipped OSM element: kind={kind}, raw_id={raw_id} (exceeds supported maximum {TYPE_ID_MASK})"
                );
                return None;
            }
            let prefix = match kind {
                ElementKind::Node => 0,
                ElementKind::Way => WAY_ID_PREFIX,
                ElementKind::Relation => REL_ID_PREFIX,
            };
            Some(prefix | base)
        }
        Err(_) => {
            warn!(
                "Skipped OSM element: kind={kind}, raw_id={raw_id} (negative identifiers are unsupported)"
            );
            None
        }
    }
}

/// Split an encoded id back into its element type and raw id.
pub const fn decode_element_id(id: u64) -> (ElementKind, u64) {
    let kind = if id & REL_ID_PREFIX != 0 {
        ElementKind::Relation
    } else if id & WAY_ID_PREFIX != 0 {
        ElementKind::Way
    } else {
        ElementKind::Node
    };
    (kind, id & TYPE_ID_MASK)
}

/// Human-readable `kind/raw` form of an encoded id, e.g. `way/42`.
pub fn describe_element_id(id: u64) -> String {
    let (kind, raw) = decode_element_id(id);
    format!("{kind}/{raw}")
}
