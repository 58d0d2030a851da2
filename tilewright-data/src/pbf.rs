//! OSM PBF dataset reader.
//!
//! A scan makes three passes over the file: relations first (to learn which
//! ways are multipolygon members), then ways (keeping tagged and member ways
//! and noting the nodes they need), then nodes (streaming tagged nodes to the
//! sink and recording the locations the ways need).

use std::collections::{HashMap, HashSet};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use osmpbf::{Element, ElementReader, RelMemberType};

use crate::assembler::{
    NodeTable, RawMember, RawRelation, RawWay, emit_resolved, is_area_relation, validated_coord,
};
use crate::ids::{ElementKind, encode_element_id};
use crate::model::{ElementSink, MalformedElement, OsmNode, OsmSource, SourceError};
use crate::tags::{collect_tags, has_any};

/// An `.osm.pbf` file on disk.
///
/// # Examples
/// ```no_run
/// use tilewright_data::{OsmSource, PbfSource};
///
/// let source = PbfSource::new("toronto-filtered.osm.pbf");
/// assert!(source.describe().ends_with(".osm.pbf"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbfSource {
    path: Utf8PathBuf,
}

impl PbfSource {
    /// Reference a dataset at `path`. The file is opened on each scan.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Dataset path.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn reader(&self) -> Result<ElementReader<std::io::BufReader<std::fs::File>>, SourceError> {
        ElementReader::from_path(self.path.as_std_path()).map_err(|source| SourceError::Open {
            path: self.path.clone(),
            source,
        })
    }

    fn decode_error(&self, source: osmpbf::Error) -> SourceError {
        SourceError::Decode {
            path: self.path.clone(),
            source,
        }
    }

    fn collect_relations(&self) -> Result<Vec<RawRelation>, SourceError> {
        let mut relations = Vec::new();
        self.reader()?
            .for_each(|element| {
                if let Element::Relation(relation) = element {
                    if let Some(raw) = raw_relation(&relation) {
                        relations.push(raw);
                    }
                }
            })
            .map_err(|source| self.decode_error(source))?;
        Ok(relations)
    }

    fn collect_ways(&self, members: &HashSet<u64>) -> Result<WayAccumulator, SourceError> {
        let mut accumulator = self
            .reader()?
            .par_map_reduce(
                |element| {
                    let mut accumulator = WayAccumulator::default();
                    if let Element::Way(way) = element {
                        accumulator.process_way(&way, members);
                    }
                    accumulator
                },
                WayAccumulator::default,
                WayAccumulator::combine,
            )
            .map_err(|source| self.decode_error(source))?;
        accumulator.ways.sort_by_key(|way| way.id);
        Ok(accumulator)
    }

    fn stream_nodes(
        &self,
        needed: &HashSet<u64>,
        sink: &mut dyn ElementSink,
    ) -> Result<NodeTable, SourceError> {
        let mut table = NodeTable::with_capacity(needed.len());
        self.reader()?
            .for_each(|element| match element {
                Element::Node(node) => visit_node(
                    node.id(),
                    node.lon(),
                    node.lat(),
                    node.tags(),
                    needed,
                    &mut table,
                    sink,
                ),
                Element::DenseNode(node) => visit_node(
                    node.id(),
                    node.lon(),
                    node.lat(),
                    node.tags(),
                    needed,
                    &mut table,
                    sink,
                ),
                Element::Way(_) | Element::Relation(_) => {}
            })
            .map_err(|source| self.decode_error(source))?;
        Ok(table)
    }
}

impl OsmSource for PbfSource {
    fn describe(&self) -> String {
        self.path.to_string()
    }

    fn scan(&self, sink: &mut dyn ElementSink) -> Result<(), SourceError> {
        let relations = self.collect_relations()?;
        let members: HashSet<u64> = relations
            .iter()
            .flat_map(|relation| relation.members.iter().map(|member| member.way))
            .collect();

        let WayAccumulator { ways, needed } = self.collect_ways(&members)?;
        let nodes = self.stream_nodes(&needed, sink)?;
        let way_refs: HashMap<u64, Vec<u64>> = ways
            .iter()
            .filter(|way| members.contains(&way.id))
            .map(|way| (way.id, way.refs.clone()))
            .collect();
        debug!(
            "{}: resolved {} ways, {} relations, {} node locations",
            self.path,
            ways.len(),
            relations.len(),
            nodes.len()
        );
        emit_resolved(&ways, &relations, &way_refs, &nodes, sink);
        Ok(())
    }
}

fn raw_relation(relation: &osmpbf::Relation<'_>) -> Option<RawRelation> {
    let tags = collect_tags(relation.tags());
    if !is_area_relation(&tags) {
        return None;
    }
    let id = encode_element_id(ElementKind::Relation, relation.id())?;
    let members = relation
        .members()
        .filter(|member| member.member_type == RelMemberType::Way)
        .filter_map(|member| {
            let way = encode_element_id(ElementKind::Way, member.member_id)?;
            let role = member.role().unwrap_or_default().to_owned();
            Some(RawMember { way, role })
        })
        .collect();
    Some(RawRelation { id, tags, members })
}

fn visit_node<'a, T>(
    raw_id: i64,
    lon: f64,
    lat: f64,
    tags: T,
    needed: &HashSet<u64>,
    table: &mut NodeTable,
    sink: &mut dyn ElementSink,
) where
    T: IntoIterator<Item = (&'a str, &'a str)>,
{
    let Some(id) = encode_element_id(ElementKind::Node, raw_id) else {
        return;
    };
    let location = validated_coord(lon, lat);
    if let Some(location) = location {
        if needed.contains(&id) {
            table.insert(id, location);
        }
    }
    let tags = collect_tags(tags);
    if tags.is_empty() {
        return;
    }
    match location {
        Some(location) => sink.node(OsmNode { id, location, tags }),
        None => sink.malformed(MalformedElement {
            id,
            kind: ElementKind::Node,
            tags,
            reason: format!("invalid location ({lat}, {lon})"),
            extent: None,
        }),
    }
}

#[derive(Debug, Default)]
struct WayAccumulator {
    ways: Vec<RawWay>,
    needed: HashSet<u64>,
}

impl WayAccumulator {
    fn process_way(&mut self, way: &osmpbf::Way<'_>, members: &HashSet<u64>) {
        let Some(id) = encode_element_id(ElementKind::Way, way.id()) else {
            return;
        };
        let tagged = has_any(way.tags());
        if !tagged && !members.contains(&id) {
            return;
        }
        let refs: Vec<u64> = way
            .refs()
            .filter_map(|node| encode_element_id(ElementKind::Node, node))
            .collect();
        self.needed.extend(refs.iter().copied());
        let tags = if tagged {
            collect_tags(way.tags())
        } else {
            tilewright_core::Tags::new()
        };
        self.ways.push(RawWay { id, refs, tags });
    }

    fn combine(mut self, other: Self) -> Self {
        self.ways.extend(other.ways);
        self.needed.extend(other.needed);
        self
    }
}
