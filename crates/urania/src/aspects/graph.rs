use crate::aspects::types::{Aspect, AspectKind};
use std::collections::BTreeMap;

/// Points as nodes, aspects as edges, keyed by point id.
///
/// Neighbour iteration is in id order so that everything built on top of
/// the graph is deterministic. Each unordered pair carries at most one
/// edge; when the input repeats a pair the first aspect wins.
#[derive(Debug, Clone)]
pub struct AspectGraph<'a> {
    aspects: &'a [Aspect],
    adjacency: BTreeMap<&'a str, BTreeMap<&'a str, usize>>,
}

impl<'a> AspectGraph<'a> {
    pub fn new(aspects: &'a [Aspect]) -> Self {
        let mut adjacency: BTreeMap<&'a str, BTreeMap<&'a str, usize>> = BTreeMap::new();
        for (index, aspect) in aspects.iter().enumerate() {
            let (a, b) = (aspect.first.id.as_str(), aspect.second.id.as_str());
            if a == b {
                continue;
            }
            adjacency.entry(a).or_default().entry(b).or_insert(index);
            adjacency.entry(b).or_default().entry(a).or_insert(index);
        }
        Self { aspects, adjacency }
    }

    pub fn aspects(&self) -> &'a [Aspect] {
        self.aspects
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.adjacency.keys().copied()
    }

    /// The aspect joining `a` and `b`, in either direction.
    pub fn edge(&self, a: &str, b: &str) -> Option<&'a Aspect> {
        let index = *self.adjacency.get(a)?.get(b)?;
        self.aspects.get(index)
    }

    /// The aspect joining `a` and `b` if it is of `kind`.
    pub fn edge_of_kind(&self, a: &str, b: &str, kind: AspectKind) -> Option<&'a Aspect> {
        self.edge(a, b).filter(|aspect| aspect.kind() == kind)
    }

    pub fn degree(&self, id: &str) -> usize {
        self.adjacency.get(id).map_or(0, |n| n.len())
    }

    /// Points joined to `id` by an aspect of `kind`, in id order.
    pub fn neighbors(&self, id: &str, kind: AspectKind) -> Vec<&'a str> {
        let aspects = self.aspects;
        self.adjacency
            .get(id)
            .map(|n| {
                n.iter()
                    .filter(|(_, &index)| aspects[index].kind() == kind)
                    .map(|(other, _)| *other)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every edge of `kind` as `(a, b, aspect)` with `a < b`.
    pub fn edges_of_kind(&self, kind: AspectKind) -> Vec<(&'a str, &'a str, &'a Aspect)> {
        let mut edges = Vec::new();
        for (&a, neighbours) in &self.adjacency {
            for (&b, &index) in neighbours {
                if a < b && self.aspects[index].kind() == kind {
                    edges.push((a, b, &self.aspects[index]));
                }
            }
        }
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::{AspectCatalog, AspectDetector, AspectFilter, OrbSettings};
    use crate::points::{CelestialPoint, PointKind};

    fn aspects_for(longitudes: &[(&str, f64)]) -> Vec<Aspect> {
        let points: Vec<CelestialPoint> = longitudes
            .iter()
            .map(|(id, lon)| CelestialPoint::new(*id, PointKind::Planet, *lon))
            .collect();
        AspectDetector::new(AspectCatalog::standard(), OrbSettings::default(), AspectFilter::default())
            .detect(&points)
    }

    #[test]
    fn test_edges_are_symmetric() {
        let aspects = aspects_for(&[("Sun", 0.0), ("Moon", 90.0), ("Mars", 180.0)]);
        let graph = AspectGraph::new(&aspects);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge("Sun", "Mars").map(|a| a.kind()), Some(AspectKind::Opposition));
        assert_eq!(graph.edge("Mars", "Sun").map(|a| a.kind()), Some(AspectKind::Opposition));
        assert!(graph.edge_of_kind("Sun", "Moon", AspectKind::Trine).is_none());
        assert_eq!(graph.neighbors("Moon", AspectKind::Square), vec!["Mars", "Sun"]);
        assert_eq!(graph.degree("Moon"), 2);
    }

    #[test]
    fn test_edges_of_kind_lists_each_pair_once() {
        let aspects = aspects_for(&[("A", 10.0), ("B", 130.0), ("C", 250.0)]);
        let graph = AspectGraph::new(&aspects);
        let trines = graph.edges_of_kind(AspectKind::Trine);
        assert_eq!(trines.len(), 3);
        assert!(trines.iter().all(|(a, b, _)| a < b));
    }
}
