//! In-memory dataset for tests and small synthetic inputs.
//!
//! Elements are declared with raw OSM ids and fed through the same
//! resolution and ring assembly as the PBF reader.

use std::collections::HashMap;

use tilewright_core::Tags;

use crate::assembler::{
    NodeTable, RawMember, RawRelation, RawWay, emit_resolved, is_area_relation, validated_coord,
};
use crate::ids::{ElementKind, encode_element_id};
use crate::model::{ElementSink, MalformedElement, OsmNode, OsmSource, SourceError};
use crate::tags::collect_tags;

#[derive(Debug, Clone)]
struct MemoryNode {
    id: i64,
    lat: f64,
    lng: f64,
    tags: Tags,
}

/// An [`OsmSource`] backed by vectors of raw elements.
///
/// # Examples
/// ```
/// use tilewright_data::{MemorySource, OsmSource};
///
/// let source = MemorySource::new()
///     .node(1, 43.6405, -79.3795, &[("amenity", "hospital"), ("name", "St. X")])
///     .node(2, 43.6401, -79.3799, &[])
///     .node(3, 43.6401, -79.3791, &[])
///     .way(10, &[2, 3], &[("highway", "footway")]);
/// assert_eq!(source.describe(), "memory dataset (3 nodes, 1 ways, 0 relations)");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    nodes: Vec<MemoryNode>,
    ways: Vec<(i64, Vec<i64>, Tags)>,
    relations: Vec<(i64, Tags, Vec<(i64, String)>)>,
}

impl MemorySource {
    /// An empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Untagged nodes only serve as way vertices.
    #[must_use]
    pub fn node(mut self, id: i64, lat: f64, lng: f64, tags: &[(&str, &str)]) -> Self {
        self.nodes.push(MemoryNode {
            id,
            lat,
            lng,
            tags: collect_tags(tags.iter().copied()),
        });
        self
    }

    /// Add a way referencing node ids in order.
    #[must_use]
    pub fn way(mut self, id: i64, refs: &[i64], tags: &[(&str, &str)]) -> Self {
        self.ways
            .push((id, refs.to_vec(), collect_tags(tags.iter().copied())));
        self
    }

    /// Add a relation with `(way id, role)` members.
    #[must_use]
    pub fn relation(mut self, id: i64, tags: &[(&str, &str)], members: &[(i64, &str)]) -> Self {
        let members = members
            .iter()
            .map(|&(way, role)| (way, role.to_owned()))
            .collect();
        self.relations
            .push((id, collect_tags(tags.iter().copied()), members));
        self
    }

    fn raw_ways(&self) -> Vec<RawWay> {
        self.ways
            .iter()
            .filter_map(|(id, refs, tags)| {
                Some(RawWay {
                    id: encode_element_id(ElementKind::Way, *id)?,
                    refs: refs
                        .iter()
                        .filter_map(|node| encode_element_id(ElementKind::Node, *node))
                        .collect(),
                    tags: tags.clone(),
                })
            })
            .collect()
    }

    fn raw_relations(&self) -> Vec<RawRelation> {
        self.relations
            .iter()
            .filter(|(_, tags, _)| is_area_relation(tags))
            .filter_map(|(id, tags, members)| {
                Some(RawRelation {
                    id: encode_element_id(ElementKind::Relation, *id)?,
                    tags: tags.clone(),
                    members: members
                        .iter()
                        .filter_map(|(way, role)| {
                            Some(RawMember {
                                way: encode_element_id(ElementKind::Way, *way)?,
                                role: role.clone(),
                            })
                        })
                        .collect(),
                })
            })
            .collect()
    }
}

impl OsmSource for MemorySource {
    fn describe(&self) -> String {
        format!(
            "memory dataset ({} nodes, {} ways, {} relations)",
            self.nodes.len(),
            self.ways.len(),
            self.relations.len()
        )
    }

    fn scan(&self, sink: &mut dyn ElementSink) -> Result<(), SourceError> {
        let mut table = NodeTable::new();
        for node in &self.nodes {
            let Some(id) = encode_element_id(ElementKind::Node, node.id) else {
                continue;
            };
            let location = validated_coord(node.lng, node.lat);
            if let Some(location) = location {
                table.insert(id, location);
            }
            if node.tags.is_empty() {
                continue;
            }
            match location {
                Some(location) => sink.node(OsmNode {
                    id,
                    location,
                    tags: node.tags.clone(),
                }),
                None => sink.malformed(MalformedElement {
                    id,
                    kind: ElementKind::Node,
                    tags: node.tags.clone(),
                    reason: format!("invalid location ({}, {})", node.lat, node.lng),
                    extent: None,
                }),
            }
        }

        let ways = self.raw_ways();
        let relations = self.raw_relations();
        let way_refs: HashMap<u64, Vec<u64>> = ways
            .iter()
            .map(|way| (way.id, way.refs.clone()))
            .collect();
        emit_resolved(&ways, &relations, &way_refs, &table, sink);
        Ok(())
    }
}
