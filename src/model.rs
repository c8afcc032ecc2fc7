use serde::{Deserialize, Serialize};

/// One weighted input node: a category, sub-category, or any other labeled
/// quantity the caller wants tiled proportionally.
///
/// `meta` is an opaque passthrough payload (color key, ids, display hints)
/// that the engine never inspects and carries through to the matching output
/// block by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "M: Deserialize<'de> + Default"))]
pub struct Entry<M = ()> {
    /// Display label. Also the deterministic tie-break key when two siblings
    /// carry the same total.
    pub label: String,
    /// Weight. For a leaf this is the value itself; for a node with children
    /// it is recomputed as the sum of the children's totals.
    #[serde(default)]
    pub total: f64,
    /// Nested sub-hierarchy. Non-empty children trigger recursive embedding.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Entry<M>>,
    /// Opaque caller payload, carried through unchanged.
    #[serde(default)]
    pub meta: M,
}

impl Entry<()> {
    /// Create a leaf entry with the given weight.
    pub fn leaf(label: impl Into<String>, total: f64) -> Self {
        Entry {
            label: label.into(),
            total,
            children: Vec::new(),
            meta: (),
        }
    }

    /// Create a branch entry whose total is the sum of its children's totals.
    pub fn branch(label: impl Into<String>, children: Vec<Entry<()>>) -> Self {
        let total = children.iter().map(Entry::normalized_total).sum();
        Entry {
            label: label.into(),
            total,
            children,
            meta: (),
        }
    }
}

impl<M> Entry<M> {
    /// Create a leaf entry carrying a passthrough payload.
    pub fn with_meta(label: impl Into<String>, total: f64, meta: M) -> Self {
        Entry {
            label: label.into(),
            total,
            children: Vec::new(),
            meta,
        }
    }

    /// Effective weight of this entry: the leaf total for leaves, the
    /// recursive sum of child totals for branches (the stated total on a
    /// branch is ignored). Non-finite and negative weights count as zero.
    pub fn normalized_total(&self) -> f64 {
        if self.children.is_empty() {
            if self.total.is_finite() && self.total > 0.0 {
                self.total
            } else {
                0.0
            }
        } else {
            self.children.iter().map(Entry::normalized_total).sum()
        }
    }
}
