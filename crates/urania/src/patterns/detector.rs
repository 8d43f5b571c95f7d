use crate::aspects::graph::AspectGraph;
use crate::aspects::types::{Aspect, AspectKind};
use crate::patterns::types::{Pattern, PatternKind, PatternSettings};
use std::collections::BTreeSet;

/// Finds closed aspect configurations over a chart's aspect graph
#[derive(Debug, Clone, Default)]
pub struct PatternDetector {
    settings: PatternSettings,
}

/// Collects patterns, dropping repeats of the same kind and participant set
struct Found {
    seen: BTreeSet<(PatternKind, Vec<String>)>,
    patterns: Vec<Pattern>,
}

impl Found {
    fn new() -> Self {
        Self {
            seen: BTreeSet::new(),
            patterns: Vec::new(),
        }
    }

    fn push(&mut self, pattern: Pattern) {
        let key = (
            pattern.kind,
            pattern.participant_set().into_iter().map(str::to_string).collect(),
        );
        if self.seen.insert(key) {
            self.patterns.push(pattern);
        }
    }
}

impl PatternDetector {
    pub fn new(settings: PatternSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PatternSettings {
        &self.settings
    }

    /// Detect every enabled pattern among `aspects`.
    ///
    /// Output is sorted by kind, then by participant set.
    pub fn detect(&self, aspects: &[Aspect]) -> Vec<Pattern> {
        let graph = AspectGraph::new(aspects);
        if graph.node_count() < 3 {
            return Vec::new();
        }

        let mut found = Found::new();
        let grand_trines = self.grand_trines(&graph);
        let t_squares = self.t_squares(&graph);

        if self.settings.enabled(PatternKind::Kite) {
            for trine in &grand_trines {
                self.extend_to_kites(&graph, trine, &mut found);
            }
        }
        if self.settings.enabled(PatternKind::GrandCross) {
            for t_square in &t_squares {
                self.extend_to_grand_cross(&graph, t_square, &mut found);
            }
        }
        if self.settings.enabled(PatternKind::GrandTrine) {
            grand_trines.into_iter().for_each(|p| found.push(p));
        }
        if self.settings.enabled(PatternKind::TSquare) {
            t_squares.into_iter().for_each(|p| found.push(p));
        }
        if self.settings.enabled(PatternKind::Yod) {
            self.yods(&graph, &mut found);
        }

        let mut patterns = found.patterns;
        patterns.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.participant_set().cmp(&b.participant_set()))
                .then_with(|| a.points.cmp(&b.points))
        });
        log::debug!("{} patterns from {} aspects", patterns.len(), aspects.len());
        patterns
    }

    fn build(&self, kind: PatternKind, points: &[&str], apex: Option<&str>, aspects: Vec<Aspect>) -> Pattern {
        let strengths: Vec<f64> = aspects.iter().filter_map(|a| a.strength).collect();
        Pattern {
            kind,
            points: points.iter().map(|p| p.to_string()).collect(),
            apex: apex.map(str::to_string),
            strength: self.settings.aggregation.aggregate(&strengths),
            aspects,
        }
    }

    /// Triangles in the Trine subgraph, vertices in id order
    fn grand_trines(&self, graph: &AspectGraph<'_>) -> Vec<Pattern> {
        let mut trines = Vec::new();
        for (a, b, ab) in graph.edges_of_kind(AspectKind::Trine) {
            for c in graph.neighbors(a, AspectKind::Trine) {
                if c <= b {
                    continue;
                }
                let (Some(ac), Some(bc)) = (
                    graph.edge_of_kind(a, c, AspectKind::Trine),
                    graph.edge_of_kind(b, c, AspectKind::Trine),
                ) else {
                    continue;
                };
                trines.push(self.build(
                    PatternKind::GrandTrine,
                    &[a, b, c],
                    None,
                    vec![ab.clone(), ac.clone(), bc.clone()],
                ));
            }
        }
        trines
    }

    /// For every Opposition, a third point Square to both ends
    fn t_squares(&self, graph: &AspectGraph<'_>) -> Vec<Pattern> {
        let mut t_squares = Vec::new();
        for (a, b, opposition) in graph.edges_of_kind(AspectKind::Opposition) {
            for apex in graph.neighbors(a, AspectKind::Square) {
                if apex == b {
                    continue;
                }
                let (Some(square_a), Some(square_b)) = (
                    graph.edge_of_kind(a, apex, AspectKind::Square),
                    graph.edge_of_kind(b, apex, AspectKind::Square),
                ) else {
                    continue;
                };
                t_squares.push(self.build(
                    PatternKind::TSquare,
                    &[a, b, apex],
                    Some(apex),
                    vec![opposition.clone(), square_a.clone(), square_b.clone()],
                ));
            }
        }
        t_squares
    }

    /// Complete a T-square with a point opposite its apex
    fn extend_to_grand_cross(&self, graph: &AspectGraph<'_>, t_square: &Pattern, found: &mut Found) {
        let (a, b, apex) = (
            t_square.points[0].as_str(),
            t_square.points[1].as_str(),
            t_square.points[2].as_str(),
        );
        for d in graph.neighbors(apex, AspectKind::Opposition) {
            if d == a || d == b {
                continue;
            }
            let (Some(ad), Some(bd), Some(opposition)) = (
                graph.edge_of_kind(a, d, AspectKind::Square),
                graph.edge_of_kind(b, d, AspectKind::Square),
                graph.edge_of_kind(apex, d, AspectKind::Opposition),
            ) else {
                continue;
            };

            // Walk the cross starting from the smallest id
            let corners = grand_cross_order([a, apex, b, d]);
            let mut aspects = t_square.aspects.clone();
            aspects.push(opposition.clone());
            aspects.push(ad.clone());
            aspects.push(bd.clone());
            found.push(self.build(PatternKind::GrandCross, &corners, None, aspects));
        }
    }

    /// For every Sextile, an apex Quincunx to both ends
    fn yods(&self, graph: &AspectGraph<'_>, found: &mut Found) {
        for (a, b, sextile) in graph.edges_of_kind(AspectKind::Sextile) {
            for apex in graph.neighbors(a, AspectKind::Quincunx) {
                if apex == b {
                    continue;
                }
                let (Some(qa), Some(qb)) = (
                    graph.edge_of_kind(a, apex, AspectKind::Quincunx),
                    graph.edge_of_kind(b, apex, AspectKind::Quincunx),
                ) else {
                    continue;
                };
                found.push(self.build(
                    PatternKind::Yod,
                    &[a, b, apex],
                    Some(apex),
                    vec![sextile.clone(), qa.clone(), qb.clone()],
                ));
            }
        }
    }

    /// A Grand Trine plus a tail opposite one vertex and sextile the other two
    fn extend_to_kites(&self, graph: &AspectGraph<'_>, trine: &Pattern, found: &mut Found) {
        let vertices: Vec<&str> = trine.points.iter().map(String::as_str).collect();
        for (i, &head) in vertices.iter().enumerate() {
            let wings: Vec<&str> = vertices
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, v)| *v)
                .collect();
            for tail in graph.neighbors(head, AspectKind::Opposition) {
                if vertices.contains(&tail) {
                    continue;
                }
                let (Some(opposition), Some(s1), Some(s2)) = (
                    graph.edge_of_kind(head, tail, AspectKind::Opposition),
                    graph.edge_of_kind(wings[0], tail, AspectKind::Sextile),
                    graph.edge_of_kind(wings[1], tail, AspectKind::Sextile),
                ) else {
                    continue;
                };
                let mut aspects = trine.aspects.clone();
                aspects.push(opposition.clone());
                aspects.push(s1.clone());
                aspects.push(s2.clone());
                found.push(self.build(
                    PatternKind::Kite,
                    &[head, wings[0], wings[1], tail],
                    Some(head),
                    aspects,
                ));
            }
        }
    }
}

/// Rotate and orient a cyclic corner list so it starts at the smallest id
/// and continues toward the smaller of its two neighbours.
fn grand_cross_order<'a>(cycle: [&'a str; 4]) -> [&'a str; 4] {
    let start = (0..4).min_by_key(|&i| cycle[i]).unwrap_or(0);
    let next = cycle[(start + 1) % 4];
    let prev = cycle[(start + 3) % 4];
    if next <= prev {
        [cycle[start], next, cycle[(start + 2) % 4], prev]
    } else {
        [cycle[start], prev, cycle[(start + 2) % 4], next]
    }
}
