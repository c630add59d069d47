use super::EdgeId;

/// an ordered sequence of edge ids forming a closed walk: each edge's
/// target equals the next edge's source, and the last edge's target equals
/// the first edge's source.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub edges: Vec<EdgeId>,
}

impl Circuit {
    pub fn new(edges: Vec<EdgeId>) -> Circuit {
        Circuit { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
