//! Resolution of raw way and relation records into geometry.
//!
//! Both the PBF reader and the in-memory source collect raw records and a
//! node location table, then hand them here. Ways resolve their node
//! references; multipolygon relations join member way segments into closed
//! rings and attach each inner ring to the outer ring containing it.

use std::collections::HashMap;

use geo::{
    BoundingRect, Contains, Coord, Intersects, LineString, MultiPoint, MultiPolygon, Point, Polygon,
    Rect,
};
use log::debug;
use tilewright_core::Tags;

use crate::ids::{ElementKind, describe_element_id};
use crate::model::{ElementSink, MalformedElement, OsmArea, OsmWay};

/// Node locations keyed by encoded node id.
pub(crate) type NodeTable = HashMap<u64, Coord<f64>>;

/// A way before its node references are resolved.
#[derive(Debug, Clone)]
pub(crate) struct RawWay {
    pub(crate) id: u64,
    pub(crate) refs: Vec<u64>,
    pub(crate) tags: Tags,
}

impl RawWay {
    fn is_closed(&self) -> bool {
        self.refs.len() > 2 && self.refs.first() == self.refs.last()
    }
}

/// A multipolygon or boundary relation with its way members.
#[derive(Debug, Clone)]
pub(crate) struct RawRelation {
    pub(crate) id: u64,
    pub(crate) tags: Tags,
    pub(crate) members: Vec<RawMember>,
}

#[derive(Debug, Clone)]
pub(crate) struct RawMember {
    pub(crate) way: u64,
    pub(crate) role: String,
}

/// Relation `type` values assembled into areas.
pub(crate) fn is_area_relation(tags: &Tags) -> bool {
    matches!(
        tags.get("type").map(String::as_str),
        Some("multipolygon" | "boundary")
    ) && tags.keys().any(|key| key != "type")
}

/// Resolve tagged ways and assemble relations, delivering the results to
/// `sink` in the order given.
pub(crate) fn emit_resolved<'a, W>(
    ways: W,
    relations: &[RawRelation],
    way_refs: &HashMap<u64, Vec<u64>>,
    nodes: &NodeTable,
    sink: &mut dyn ElementSink,
) where
    W: IntoIterator<Item = &'a RawWay>,
{
    for way in ways {
        if way.tags.is_empty() {
            continue;
        }
        match resolve_way(way, nodes) {
            Ok(resolved) => sink.way(resolved),
            Err(reason) => sink.malformed(MalformedElement {
                id: way.id,
                kind: ElementKind::Way,
                tags: way.tags.clone(),
                reason,
                extent: partial_extent(way.refs.iter(), nodes),
            }),
        }
    }
    for relation in relations {
        match assemble_area(relation, way_refs, nodes) {
            Ok(area) => sink.area(area),
            Err(reason) => sink.malformed(MalformedElement {
                id: relation.id,
                kind: ElementKind::Relation,
                tags: relation.tags.clone(),
                reason,
                extent: partial_extent(
                    relation
                        .members
                        .iter()
                        .filter_map(|member| way_refs.get(&member.way))
                        .flatten(),
                    nodes,
                ),
            }),
        }
    }
}

/// Bounding box of the references that have a location.
fn partial_extent<'a, I>(refs: I, nodes: &NodeTable) -> Option<Rect<f64>>
where
    I: IntoIterator<Item = &'a u64>,
{
    let coords: Vec<Coord<f64>> = refs
        .into_iter()
        .filter_map(|node| nodes.get(node).copied())
        .collect();
    MultiPoint::from(coords).bounding_rect()
}

fn resolve_way(way: &RawWay, nodes: &NodeTable) -> Result<OsmWay, String> {
    if way.refs.len() < 2 {
        return Err(format!("way has {} node references", way.refs.len()));
    }
    Ok(OsmWay {
        id: way.id,
        coords: resolve_coords(&way.refs, nodes)?,
        tags: way.tags.clone(),
        closed: way.is_closed(),
    })
}

fn resolve_coords(refs: &[u64], nodes: &NodeTable) -> Result<Vec<Coord<f64>>, String> {
    refs.iter()
        .map(|node| {
            nodes
                .get(node)
                .copied()
                .ok_or_else(|| format!("{} has no location", describe_element_id(*node)))
        })
        .collect()
}

fn assemble_area(
    relation: &RawRelation,
    way_refs: &HashMap<u64, Vec<u64>>,
    nodes: &NodeTable,
) -> Result<OsmArea, String> {
    let mut outer_segments = Vec::new();
    let mut inner_segments = Vec::new();
    for member in &relation.members {
        let refs = way_refs
            .get(&member.way)
            .ok_or_else(|| format!("member {} is missing", describe_element_id(member.way)))?;
        match member.role.as_str() {
            "outer" | "" => outer_segments.push(refs.clone()),
            "inner" => inner_segments.push(refs.clone()),
            other => debug!("relation {}: ignored member role {other:?}", relation.id),
        }
    }

    let outers = join_rings(outer_segments)?
        .into_iter()
        .map(|ring| resolve_coords(&ring, nodes).map(LineString::new))
        .collect::<Result<Vec<_>, _>>()?;
    if outers.is_empty() {
        return Err("relation has no outer ring".to_owned());
    }
    let inners = join_rings(inner_segments)?
        .into_iter()
        .map(|ring| resolve_coords(&ring, nodes).map(LineString::new))
        .collect::<Result<Vec<_>, _>>()?;

    let mut polygons: Vec<Polygon<f64>> = outers
        .into_iter()
        .map(|outer| Polygon::new(outer, Vec::new()))
        .collect();
    for inner in inners {
        let Some(probe) = inner.0.first().copied().map(Point::from) else {
            continue;
        };
        let host = polygons
            .iter()
            .position(|polygon| polygon.contains(&probe))
            .or_else(|| {
                polygons
                    .iter()
                    .position(|polygon| polygon.exterior().intersects(&probe))
            });
        match host.and_then(|index| polygons.get_mut(index)) {
            Some(polygon) => polygon.interiors_push(inner),
            None => debug!(
                "relation {}: inner ring lies outside every outer ring",
                relation.id
            ),
        }
    }

    Ok(OsmArea {
        id: relation.id,
        polygons: MultiPolygon::new(polygons),
        tags: relation.tags.clone(),
    })
}

/// Join way segments end to end into closed rings of node references.
fn join_rings(mut segments: Vec<Vec<u64>>) -> Result<Vec<Vec<u64>>, String> {
    segments.retain(|segment| !segment.is_empty());
    segments.reverse();
    let mut rings = Vec::new();
    while let Some(mut ring) = segments.pop() {
        while ring.first() != ring.last() || ring.len() < 2 {
            let Some(&tail) = ring.last() else { break };
            let Some(index) = segments
                .iter()
                .rposition(|segment| segment.first() == Some(&tail) || segment.last() == Some(&tail))
            else {
                return Err(format!("ring ending at node {tail} is not closed"));
            };
            let mut next = segments.remove(index);
            if next.first() != Some(&tail) {
                next.reverse();
            }
            ring.extend(next.into_iter().skip(1));
        }
        if ring.len() < 4 {
            return Err(format!("ring has only {} node references", ring.len()));
        }
        rings.push(ring);
    }
    Ok(rings)
}

/// A coordinate, when the location is finite and within WGS84 ranges.
pub(crate) fn validated_coord(lon: f64, lat: f64) -> Option<Coord<f64>> {
    (lon.is_finite()
        && lat.is_finite()
        && (-180.0..=180.0).contains(&lon)
        && (-90.0..=90.0).contains(&lat))
    .then_some(Coord { x: lon, y: lat })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn joins_split_ring_with_reversed_segment() {
        let rings = join_rings(vec![vec![1, 2, 3], vec![1, 4, 3]]).expect("closable");
        assert_eq!(rings, vec![vec![1, 2, 3, 4, 1]]);
    }

    #[rstest]
    fn keeps_already_closed_rings() {
        let rings =
            join_rings(vec![vec![1, 2, 3, 1], vec![5, 6, 7, 5]]).expect("already closed");
        assert_eq!(rings.len(), 2);
    }

    #[rstest]
    fn reports_open_rings() {
        let outcome = join_rings(vec![vec![1, 2, 3], vec![3, 4]]);
        assert!(outcome.is_err());
    }

    #[rstest]
    fn rejects_degenerate_rings() {
        assert!(join_rings(vec![vec![1, 2, 1]]).is_err());
    }
}
