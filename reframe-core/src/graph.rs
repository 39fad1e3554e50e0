//! Directed graph of reference frames
//!
//! Nodes are frame identifiers, edges carry the [`TransformChain`] converting
//! coordinates from one frame to another. Every declared conversion adds two
//! edges: the declared chain, and its inverse (each transformation inverted,
//! order reversed) in the opposite direction.
//!
//! A conversion between two frames is only resolved when exactly one simple
//! path connects them; several candidate paths are reported as an error
//! rather than silently picking one.

use crate::config::ReferenceFrameConfig;
use crate::error::{Error, Result};
use crate::frame::ReferenceFrame;
use crate::transform::TransformChain;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Adjacency map: frame id -> (target frame id -> chain)
type Adjacency = HashMap<String, BTreeMap<String, TransformChain>>;

/// Builder for [`ReferenceFrameGraph`]
///
/// Frames must be added before any conversion referencing them.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    frames: Vec<ReferenceFrame>,
    adjacency: Adjacency,
    strict_conversions: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject conversions whose edges already exist instead of overwriting them
    pub fn strict_conversions(mut self, strict: bool) -> Self {
        self.strict_conversions = strict;
        self
    }

    /// Declare a reference frame
    pub fn add_frame(&mut self, id: impl Into<String>, name: impl Into<String>) -> Result<()> {
        let frame = ReferenceFrame::new(id, name);
        if self.adjacency.contains_key(&frame.id) {
            return Err(Error::DuplicateFrame(frame.id));
        }
        self.adjacency.insert(frame.id.clone(), BTreeMap::new());
        self.frames.push(frame);
        Ok(())
    }

    /// Declare a conversion and derive its reverse
    pub fn add_conversion(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        chain: TransformChain,
    ) -> Result<()> {
        let from = from.into();
        let to = to.into();

        for id in [&from, &to] {
            if !self.adjacency.contains_key(id) {
                return Err(Error::UnknownFrame(id.clone()));
            }
        }

        let reverse = chain.inverse()?;

        if self.has_edge(&from, &to) || self.has_edge(&to, &from) {
            if self.strict_conversions {
                return Err(Error::DuplicateConversion { from, to });
            }
            log::warn!(
                "Conversion '{}' -> '{}' replaces a previous declaration between these frames",
                from,
                to
            );
        }

        self.insert_edge(&from, &to, chain);
        self.insert_edge(&to, &from, reverse);
        Ok(())
    }

    /// Add every frame, then every conversion, of a configuration
    pub fn add_config(&mut self, config: &ReferenceFrameConfig) -> Result<()> {
        for frame in &config.frames {
            self.add_frame(frame.id.as_str(), frame.name.as_str())?;
        }

        for conversion in &config.conversions {
            let label = conversion.label();
            let chain = conversion
                .transforms
                .iter()
                .map(|decl| decl.to_transform(&label))
                .collect::<Result<TransformChain>>()?;
            self.add_conversion(conversion.from.as_str(), conversion.to.as_str(), chain)?;
        }

        Ok(())
    }

    pub fn build(self) -> ReferenceFrameGraph {
        ReferenceFrameGraph {
            frames: self.frames,
            adjacency: self.adjacency,
        }
    }

    fn has_edge(&self, from: &str, to: &str) -> bool {
        self.adjacency
            .get(from)
            .is_some_and(|targets| targets.contains_key(to))
    }

    fn insert_edge(&mut self, from: &str, to: &str, chain: TransformChain) {
        if let Some(targets) = self.adjacency.get_mut(from) {
            targets.insert(to.to_string(), chain);
        }
    }
}

/// One edge of a resolved path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStep {
    pub from: String,
    pub to: String,
    pub chain: TransformChain,
}

/// The unique conversion path between two frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPath {
    /// Frame ids from source to target, both included
    pub frames: Vec<String>,
    /// Edges along the path, in traversal order
    pub steps: Vec<PathStep>,
}

impl ResolvedPath {
    /// Concatenation of every step's chain, in traversal order
    pub fn chain(&self) -> TransformChain {
        self.steps
            .iter()
            .fold(TransformChain::new(), |chain, step| chain.then(&step.chain))
    }

    pub fn source(&self) -> &str {
        &self.frames[0]
    }

    pub fn target(&self) -> &str {
        &self.frames[self.frames.len() - 1]
    }
}

/// Immutable graph of reference frames and conversions between them
#[derive(Debug, Clone)]
pub struct ReferenceFrameGraph {
    frames: Vec<ReferenceFrame>,
    adjacency: Adjacency,
}

impl ReferenceFrameGraph {
    /// Build a graph from a configuration, overwriting duplicate conversions
    pub fn build(config: &ReferenceFrameConfig) -> Result<Self> {
        let mut builder = GraphBuilder::new();
        builder.add_config(config)?;
        Ok(builder.build())
    }

    /// Frames in declaration order
    pub fn frames(&self) -> &[ReferenceFrame] {
        &self.frames
    }

    pub fn frame(&self, id: &str) -> Option<&ReferenceFrame> {
        self.frames.iter().find(|frame| frame.id == id)
    }

    pub fn contains_frame(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Chain of the direct edge `from -> to`, if any
    pub fn edge(&self, from: &str, to: &str) -> Option<&TransformChain> {
        self.adjacency.get(from).and_then(|targets| targets.get(to))
    }

    /// Every edge, grouped by source frame in declaration order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &TransformChain)> {
        self.frames.iter().flat_map(move |frame| {
            self.adjacency
                .get(&frame.id)
                .into_iter()
                .flatten()
                .map(move |(to, chain)| (frame.id.as_str(), to.as_str(), chain))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }

    /// Every simple path (no repeated frame) from `source` to `target`
    pub fn all_simple_paths(&self, source: &str, target: &str) -> Result<Vec<Vec<String>>> {
        self.check_frame(source)?;
        self.check_frame(target)?;

        if source == target {
            return Ok(vec![vec![source.to_string()]]);
        }

        let mut paths = Vec::new();
        let mut current = vec![source];
        let mut visited = HashSet::from([source]);
        self.collect_paths(target, &mut current, &mut visited, &mut paths);
        Ok(paths)
    }

    fn collect_paths<'a>(
        &'a self,
        target: &str,
        current: &mut Vec<&'a str>,
        visited: &mut HashSet<&'a str>,
        paths: &mut Vec<Vec<String>>,
    ) {
        let Some(&node) = current.last() else {
            return;
        };
        let Some(targets) = self.adjacency.get(node) else {
            return;
        };

        for next in targets.keys() {
            let next = next.as_str();
            if visited.contains(next) {
                continue;
            }
            if next == target {
                let mut path: Vec<String> = current.iter().map(|id| id.to_string()).collect();
                path.push(next.to_string());
                paths.push(path);
                continue;
            }

            visited.insert(next);
            current.push(next);
            self.collect_paths(target, current, visited, paths);
            current.pop();
            visited.remove(next);
        }
    }

    /// Resolve the unique conversion path from `source` to `target`
    pub fn resolve(&self, source: &str, target: &str) -> Result<ResolvedPath> {
        let mut paths = self.all_simple_paths(source, target)?;

        match paths.len() {
            0 => Err(Error::NoPathFound {
                from: source.to_string(),
                to: target.to_string(),
            }),
            1 => {
                let frames = paths.remove(0);
                let steps = frames
                    .windows(2)
                    .map(|pair| PathStep {
                        from: pair[0].clone(),
                        to: pair[1].clone(),
                        chain: self.edge(&pair[0], &pair[1]).cloned().unwrap_or_default(),
                    })
                    .collect();
                log::debug!("Conversion path {}", frames.join(" -> "));
                Ok(ResolvedPath { frames, steps })
            }
            _ => Err(Error::AmbiguousPath {
                from: source.to_string(),
                to: target.to_string(),
                paths,
            }),
        }
    }

    /// Resolve and return the concatenated chain directly
    pub fn conversion(&self, source: &str, target: &str) -> Result<TransformChain> {
        self.resolve(source, target).map(|path| path.chain())
    }

    fn check_frame(&self, id: &str) -> Result<()> {
        if self.contains_frame(id) {
            Ok(())
        } else {
            Err(Error::UnknownFrame(id.to_string()))
        }
    }
}
