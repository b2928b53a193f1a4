//! Text layout of a gluing graph.
//!
//! Main blocks (everything but side links) are laid out left to right per
//! connected component, in id order. Side links hang above and below the
//! block they glue to; at a chain end with three or more side links, one
//! of them moves to the outer side.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::block::BlockKind;
use crate::graph::GluingGraph;

const MIN_CELL: usize = 9;

/// Printable layout of a [`GluingGraph`], from [`GluingGraph::layout`].
#[derive(Debug, Clone, Copy)]
pub struct Layout<'a> {
    graph: &'a GluingGraph,
    split: bool,
}

impl<'a> Layout<'a> {
    pub(crate) fn new(graph: &'a GluingGraph) -> Self {
        Self { graph, split: true }
    }

    /// Hangs every side link above its block instead of splitting them.
    pub fn unsplit(mut self) -> Self {
        self.split = false;
        self
    }
}

#[derive(Debug, Default)]
struct Sides {
    up: Vec<usize>,
    down: Vec<usize>,
    left: Vec<usize>,
    right: Vec<usize>,
}

impl<'a> Layout<'a> {
    fn is_side(&self, id: usize) -> bool {
        self.graph.blocks()[id].kind() == BlockKind::SideLink
    }

    fn label(&self, id: usize) -> String {
        self.graph.blocks()[id].spec().to_string()
    }

    fn labels(&self, ids: &[usize]) -> String {
        ids.iter()
            .map(|&id| self.label(id))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Summed weights between main blocks, keyed by ordered pair.
    fn main_weights(&self) -> BTreeMap<(usize, usize), i64> {
        let mut weights = BTreeMap::new();
        for edge in self.graph.edges() {
            let (u, v) = (edge.u.id(), edge.v.id());
            if !self.is_side(u) && !self.is_side(v) {
                *weights.entry((u.min(v), u.max(v))).or_insert(0) += edge.weight;
            }
        }
        weights
    }

    fn components(&self, weights: &BTreeMap<(usize, usize), i64>) -> Vec<Vec<usize>> {
        let n = self.graph.len();
        let mut adjacent = vec![Vec::new(); n];
        for &(a, b) in weights.keys() {
            adjacent[a].push(b);
            adjacent[b].push(a);
        }

        let mut visited = vec![false; n];
        let mut components = Vec::new();
        for start in 0..n {
            if self.is_side(start) || visited[start] {
                continue;
            }
            visited[start] = true;
            let mut stack = vec![start];
            let mut order = Vec::new();
            while let Some(u) = stack.pop() {
                order.push(u);
                for &v in &adjacent[u] {
                    if !visited[v] {
                        visited[v] = true;
                        stack.push(v);
                    }
                }
            }
            order.sort_unstable();
            components.push(order);
        }
        components
    }

    fn sides_by_main(&self) -> HashMap<usize, Vec<usize>> {
        let mut sides: HashMap<usize, Vec<usize>> = HashMap::new();
        for edge in self.graph.edges() {
            let (u, v) = (edge.u.id(), edge.v.id());
            match (self.is_side(u), self.is_side(v)) {
                (true, false) => sides.entry(v).or_default().push(u),
                (false, true) => sides.entry(u).or_default().push(v),
                _ => {}
            }
        }
        sides
    }

    fn split_sides(&self, ids: &[usize], first: bool, last: bool) -> Sides {
        let mut sides = Sides::default();
        if self.split {
            let cut = (ids.len() + 1) / 2;
            sides.up = ids[..cut].to_vec();
            sides.down = ids[cut..].to_vec();
        } else {
            sides.up = ids.to_vec();
        }
        if ids.len() >= 3 && first != last {
            let from = if sides.up.is_empty() {
                &mut sides.down
            } else {
                &mut sides.up
            };
            if let Some(moved) = from.pop() {
                if first {
                    sides.left.push(moved);
                } else {
                    sides.right.push(moved);
                }
            }
        }
        sides
    }

    fn write_component(
        &self,
        f: &mut fmt::Formatter<'_>,
        seq: &[usize],
        weights: &BTreeMap<(usize, usize), i64>,
        sides_by_main: &HashMap<usize, Vec<usize>>,
    ) -> fmt::Result {
        let labels: Vec<String> = seq.iter().map(|&id| self.label(id)).collect();
        let cell = labels
            .iter()
            .map(|l| l.len() + 2)
            .max()
            .unwrap_or(0)
            .max(MIN_CELL);

        let sides: Vec<Sides> = seq
            .iter()
            .enumerate()
            .map(|(k, id)| {
                let ids = sides_by_main.get(id).map(Vec::as_slice).unwrap_or(&[]);
                self.split_sides(ids, k == 0, k + 1 == seq.len())
            })
            .collect();

        let pad = |s: String| format!("{:<cell$}", s);
        let bar = |present: bool| {
            let mut s = " ".repeat(cell);
            if present {
                s.replace_range(cell / 2..cell / 2 + 1, "|");
            }
            s
        };
        let row = |cells: Vec<String>| cells.join(" ");

        let top = row(sides.iter().map(|s| pad(self.labels(&s.up))).collect());
        let top_bar = row(sides.iter().map(|s| bar(!s.up.is_empty())).collect());
        let outer = row(sides
            .iter()
            .map(|s| {
                if !s.left.is_empty() {
                    pad(format!("{}<-", self.labels(&s.left)))
                } else if !s.right.is_empty() {
                    let text = format!("->{}", self.labels(&s.right));
                    let keep = text.len().min(cell);
                    format!("{:>cell$}", &text[text.len() - keep..])
                } else {
                    " ".repeat(cell)
                }
            })
            .collect());

        let mut main = String::new();
        for (k, label) in labels.iter().enumerate() {
            main.push_str(&pad(label.clone()));
            if let Some(&next) = seq.get(k + 1) {
                let key = (seq[k].min(next), seq[k].max(next));
                let glued = weights.get(&key).is_some_and(|&w| w > 0);
                main.push(if glued { '-' } else { ' ' });
            }
        }

        let bottom_bar = row(sides.iter().map(|s| bar(!s.down.is_empty())).collect());
        let bottom = row(sides.iter().map(|s| pad(self.labels(&s.down))).collect());

        for line in [top, top_bar, outer, main, bottom_bar, bottom] {
            let line = line.trim_end();
            if !line.is_empty() {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.graph.is_empty() {
            return writeln!(f, "(empty graph)");
        }
        let weights = self.main_weights();
        let components = self.components(&weights);
        if components.is_empty() {
            return writeln!(f, "[no main blocks]");
        }
        let sides_by_main = self.sides_by_main();
        for (i, seq) in components.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            self.write_component(f, seq, &weights, &sides_by_main)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleTable;
    use crate::NodeRef;
    use std::sync::Arc;

    fn chain() -> (GluingGraph, NodeRef, NodeRef) {
        let mut g = GluingGraph::with_rules(Arc::new(RuleTable::permissive()));
        let head = g.add(BlockKind::Node, 4).unwrap();
        let link = g.add(BlockKind::InteriorLink, 22).unwrap();
        let tail = g.add(BlockKind::Node, 4).unwrap();
        g.connect(head, link).unwrap();
        g.connect(link, tail).unwrap();
        (g, head, tail)
    }

    fn hang(g: &mut GluingGraph, node: NodeRef, param: i32) {
        let side = g.add(BlockKind::SideLink, param).unwrap();
        g.connect(side, node).unwrap();
    }

    #[test]
    fn test_single_side_hangs_above() {
        let (mut g, head, _) = chain();
        hang(&mut g, head, 882);
        assert_eq!(
            g.layout().to_string(),
            "s882\n    |\nn4       -i22      -n4\n"
        );
    }

    #[test]
    fn test_three_sides_at_an_end_spill_outward() {
        let (mut g, _, tail) = chain();
        for param in [882, 883, 884] {
            hang(&mut g, tail, param);
        }
        let pad = " ".repeat(20);
        let expected = format!(
            "{pad}s882\n{pad}    |\n{pad}   ->s883\nn4       -i22      -n4\n{pad}    |\n{pad}s884\n"
        );
        assert_eq!(g.layout().to_string(), expected);
    }

    #[test]
    fn test_unsplit_keeps_sides_above() {
        let (mut g, head, _) = chain();
        hang(&mut g, head, 882);
        hang(&mut g, head, 883);
        assert_eq!(
            g.layout().unsplit().to_string(),
            "s882,s883\n    |\nn4       -i22      -n4\n"
        );
    }

    #[test]
    fn test_components_and_empty_graphs() {
        assert_eq!(GluingGraph::new().layout().to_string(), "(empty graph)\n");

        let mut g = GluingGraph::new();
        g.add(BlockKind::Node, 3).unwrap();
        g.add(BlockKind::Node, 5).unwrap();
        assert_eq!(g.layout().to_string(), "n3\n\nn5\n");

        let mut sides_only = GluingGraph::new();
        sides_only.add(BlockKind::SideLink, 882).unwrap();
        assert_eq!(sides_only.layout().to_string(), "[no main blocks]\n");
    }
}
