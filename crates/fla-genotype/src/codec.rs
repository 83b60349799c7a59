// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Architecture string codec.

A cell of `n` nodes is written as `n - 1` groups joined by `+`. Group `k`
(0-based) lists the operations on the edges entering node `k + 1`, one per
earlier node, each tagged with the index of its source node:

```text
|nor_conv_1x1~0|+|none~0|none~1|+|none~0|none~1|skip_connect~2|
 └── group 0 ──┘ └─ group 1 ───┘ └────────── group 2 ─────────┘
```

The flat edge sequence is the concatenation of the groups, so the 4-node
benchmark cell has `E = 6` edges. Decoding is strict (source indices must be
written exactly as their position, no empty entries), which keeps
`encode(decode(s)) == s` exact.
*/

use crate::operation::Operation;
use crate::types::{GenotypeError, GenotypeResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Flat, ordered edge sequence of a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genotype {
    edges: Vec<Operation>,
}

impl Genotype {
    pub fn new(edges: Vec<Operation>) -> Self {
        Self { edges }
    }

    pub fn edges(&self) -> &[Operation] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn into_edges(self) -> Vec<Operation> {
        self.edges
    }

    /// Copy of this genotype with the edge at `position` replaced.
    ///
    /// Returns `None` if `position` is out of range.
    pub fn with_edge(&self, position: usize, op: Operation) -> Option<Genotype> {
        if position >= self.edges.len() {
            return None;
        }
        let mut edges = self.edges.clone();
        edges[position] = op;
        Some(Genotype { edges })
    }
}

impl From<Vec<Operation>> for Genotype {
    fn from(edges: Vec<Operation>) -> Self {
        Self::new(edges)
    }
}

impl FromStr for Genotype {
    type Err = GenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Cell topology: every node receives one edge from each earlier node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TopologyRepr", into = "TopologyRepr")]
pub struct CellTopology {
    nodes: usize,
}

/// Serialized form; deserialization goes through `CellTopology::new`
#[derive(Serialize, Deserialize)]
struct TopologyRepr {
    nodes: usize,
}

impl TryFrom<TopologyRepr> for CellTopology {
    type Error = GenotypeError;

    fn try_from(repr: TopologyRepr) -> Result<Self, Self::Error> {
        CellTopology::new(repr.nodes)
    }
}

impl From<CellTopology> for TopologyRepr {
    fn from(topology: CellTopology) -> Self {
        TopologyRepr {
            nodes: topology.nodes,
        }
    }
}

impl CellTopology {
    /// The benchmark cell: 4 nodes, 6 edges
    pub const NATS_BENCH: CellTopology = CellTopology { nodes: 4 };

    /// # Errors
    ///
    /// Returns `GenotypeError::Format` if `nodes < 2`
    pub fn new(nodes: usize) -> GenotypeResult<Self> {
        if nodes < 2 {
            return Err(GenotypeError::Format(format!(
                "A cell needs at least 2 nodes, got {}",
                nodes
            )));
        }
        Ok(Self { nodes })
    }

    /// Topology whose edge count is exactly `edge_count`
    pub fn from_edge_count(edge_count: usize) -> GenotypeResult<Self> {
        let mut nodes = 2;
        loop {
            let edges = nodes * (nodes - 1) / 2;
            if edges == edge_count {
                return Ok(Self { nodes });
            }
            if edges > edge_count {
                return Err(GenotypeError::Format(format!(
                    "{} edges do not form a complete cell",
                    edge_count
                )));
            }
            nodes += 1;
        }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Number of edges `E = n(n-1)/2`
    pub fn edge_count(&self) -> usize {
        self.nodes * (self.nodes - 1) / 2
    }

    /// Number of `+`-separated groups in the string form
    pub fn group_count(&self) -> usize {
        self.nodes - 1
    }

    /// Decode a canonical string that must match this topology
    pub fn decode(&self, arch: &str) -> GenotypeResult<Genotype> {
        let (groups, edges) = parse_groups(arch)?;
        if groups != self.group_count() {
            return Err(GenotypeError::Format(format!(
                "'{}' has {} node groups, expected {}",
                arch,
                groups,
                self.group_count()
            )));
        }
        Ok(Genotype { edges })
    }

    /// Encode an edge sequence of exactly `edge_count()` operations
    pub fn encode(&self, edges: &[Operation]) -> GenotypeResult<String> {
        if edges.len() != self.edge_count() {
            return Err(GenotypeError::Format(format!(
                "Cannot encode {} edges into a {}-node cell ({} edges)",
                edges.len(),
                self.nodes,
                self.edge_count()
            )));
        }

        let mut out = String::with_capacity(edges.len() * 16);
        for group in 0..self.group_count() {
            if group > 0 {
                out.push('+');
            }
            out.push('|');
            let offset = group * (group + 1) / 2;
            for (source, op) in edges[offset..=offset + group].iter().enumerate() {
                out.push_str(op.as_str());
                out.push('~');
                out.push_str(&source.to_string());
                out.push('|');
            }
        }
        Ok(out)
    }
}

impl Default for CellTopology {
    fn default() -> Self {
        Self::NATS_BENCH
    }
}

/// Decode a canonical string, inferring the topology from its group count
pub fn decode(arch: &str) -> GenotypeResult<Genotype> {
    let (_, edges) = parse_groups(arch)?;
    Ok(Genotype { edges })
}

/// Encode a genotype, inferring the topology from its edge count
pub fn encode(genotype: &Genotype) -> GenotypeResult<String> {
    CellTopology::from_edge_count(genotype.len())?.encode(genotype.edges())
}

/// Split into groups and validate each one. Returns the group count and the
/// flat edge sequence.
fn parse_groups(arch: &str) -> GenotypeResult<(usize, Vec<Operation>)> {
    if arch.is_empty() {
        return Err(GenotypeError::Format("Empty architecture string".to_string()));
    }

    let mut edges = Vec::new();
    let mut groups = 0;
    for (group, group_str) in arch.split('+').enumerate() {
        let inner = group_str
            .strip_prefix('|')
            .and_then(|g| g.strip_suffix('|'))
            .ok_or_else(|| {
                GenotypeError::Format(format!(
                    "Group {} of '{}' is not enclosed in '|' delimiters",
                    group, arch
                ))
            })?;

        let entries: Vec<&str> = inner.split('|').collect();
        if entries.len() != group + 1 {
            return Err(GenotypeError::Format(format!(
                "Group {} of '{}' has {} inputs, expected {}",
                group,
                arch,
                entries.len(),
                group + 1
            )));
        }

        for (source, entry) in entries.iter().enumerate() {
            let (op, input) = entry.split_once('~').ok_or_else(|| {
                GenotypeError::Format(format!("Malformed edge '{}' in '{}'", entry, arch))
            })?;
            // Compared as text: "01" or "+1" would parse but not re-encode
            if input != source.to_string() {
                return Err(GenotypeError::Format(format!(
                    "Edge '{}' in group {} of '{}' must come from node {}",
                    entry, group, arch, source
                )));
            }
            edges.push(op.parse::<Operation>()?);
        }
        groups += 1;
    }

    Ok((groups, edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARCH: &str = "|nor_conv_1x1~0|+|none~0|none~1|+|none~0|none~1|skip_connect~2|";

    #[test]
    fn test_decode_flattens_groups_in_order() {
        let genotype = decode(ARCH).unwrap();
        assert_eq!(
            genotype.edges(),
            &[
                Operation::NorConv1x1,
                Operation::None,
                Operation::None,
                Operation::None,
                Operation::None,
                Operation::SkipConnect,
            ]
        );
    }

    #[test]
    fn test_encode_decode_exact() {
        let genotype = CellTopology::NATS_BENCH.decode(ARCH).unwrap();
        assert_eq!(CellTopology::NATS_BENCH.encode(genotype.edges()).unwrap(), ARCH);
        assert_eq!(encode(&genotype).unwrap(), ARCH);
    }

    #[test]
    fn test_encode_rejects_wrong_length() {
        let result = CellTopology::NATS_BENCH.encode(&[Operation::None; 5]);
        assert!(matches!(result, Err(GenotypeError::Format(_))));
        // 4 edges is not a triangular number
        assert!(encode(&Genotype::new(vec![Operation::None; 4])).is_err());
    }

    #[test]
    fn test_topology_mismatch() {
        let three_nodes = CellTopology::new(3).unwrap();
        assert_eq!(three_nodes.edge_count(), 3);
        assert!(three_nodes.decode(ARCH).is_err());
        assert!(three_nodes.decode("|none~0|+|none~0|skip_connect~1|").is_ok());
    }

    #[test]
    fn test_from_edge_count() {
        assert_eq!(CellTopology::from_edge_count(1).unwrap().nodes(), 2);
        assert_eq!(CellTopology::from_edge_count(6).unwrap().nodes(), 4);
        assert_eq!(CellTopology::from_edge_count(10).unwrap().nodes(), 5);
        assert!(CellTopology::from_edge_count(0).is_err());
        assert!(CellTopology::from_edge_count(7).is_err());
        assert!(CellTopology::new(1).is_err());
    }

    #[test]
    fn test_topology_serde_checks_node_count() {
        let json = serde_json::to_string(&CellTopology::NATS_BENCH).unwrap();
        assert_eq!(json, r#"{"nodes":4}"#);
        let back: CellTopology = serde_json::from_str(&json).unwrap();
        assert_eq!(back.edge_count(), 6);

        assert!(serde_json::from_str::<CellTopology>(r#"{"nodes":1}"#).is_err());
        assert!(serde_json::from_str::<CellTopology>(r#"{"nodes":0}"#).is_err());
    }

    #[test]
    fn test_malformed_strings() {
        let malformed = [
            "",
            "|nor_conv_1x1~0",
            "nor_conv_1x1~0|",
            "||",
            "|nor_conv_1x1~0|+|none~0|",
            "|nor_conv_1x1~0|+|none~0|none~1|none~2|",
            "|nor_conv_1x1~1|",
            "|nor_conv_1x1~01|",
            "|nor_conv_1x1~+0|",
            "|nor_conv_1x1|",
            "|conv_9x9~0|",
            "|nor_conv_1x1~0|+|none~0||none~1|",
            "|nor_conv_1x1~0| + |none~0|none~1|",
        ];
        for arch in malformed {
            assert!(
                matches!(decode(arch), Err(GenotypeError::Format(_))),
                "'{}' should be rejected",
                arch
            );
        }
    }

    #[test]
    fn test_with_edge() {
        let genotype = decode(ARCH).unwrap();
        let changed = genotype.with_edge(5, Operation::AvgPool3x3).unwrap();
        assert_eq!(changed.edges()[5], Operation::AvgPool3x3);
        assert_eq!(&changed.edges()[..5], &genotype.edges()[..5]);
        assert!(genotype.with_edge(6, Operation::None).is_none());
    }

    #[test]
    fn test_from_str() {
        let genotype: Genotype = ARCH.parse().unwrap();
        assert_eq!(genotype.len(), 6);
    }
}
