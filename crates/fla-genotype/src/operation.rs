// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Cell operations and the alphabet neighbor generation draws from.
*/

use crate::types::{GenotypeError, GenotypeResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operation placed on a single cell edge.
///
/// Ordering follows declaration order and is the canonical order used when
/// emitting neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "nor_conv_1x1")]
    NorConv1x1,
    #[serde(rename = "nor_conv_3x3")]
    NorConv3x3,
    #[serde(rename = "skip_connect")]
    SkipConnect,
    #[serde(rename = "avg_pool_3x3")]
    AvgPool3x3,
}

impl Operation {
    /// Every operation, in canonical order
    pub const ALL: [Operation; 5] = [
        Operation::None,
        Operation::NorConv1x1,
        Operation::NorConv3x3,
        Operation::SkipConnect,
        Operation::AvgPool3x3,
    ];

    /// Canonical name as it appears in architecture strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::None => "none",
            Operation::NorConv1x1 => "nor_conv_1x1",
            Operation::NorConv3x3 => "nor_conv_3x3",
            Operation::SkipConnect => "skip_connect",
            Operation::AvgPool3x3 => "avg_pool_3x3",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = GenotypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| GenotypeError::Format(format!("Unknown operation: '{}'", s)))
    }
}

/// Non-empty, de-duplicated set of operations in canonical order
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Operation>", into = "Vec<Operation>")]
pub struct Alphabet {
    ops: Vec<Operation>,
}

impl Alphabet {
    /// Build an alphabet from any collection of operations
    ///
    /// # Errors
    ///
    /// Returns `GenotypeError::Format` if the collection is empty
    pub fn new<I>(ops: I) -> GenotypeResult<Self>
    where
        I: IntoIterator<Item = Operation>,
    {
        let mut ops: Vec<Operation> = ops.into_iter().collect();
        ops.sort_unstable();
        ops.dedup();
        if ops.is_empty() {
            return Err(GenotypeError::Format("Alphabet must not be empty".to_string()));
        }
        Ok(Self { ops })
    }

    /// Parse an alphabet from canonical operation names
    pub fn from_names<I, S>(names: I) -> GenotypeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ops = names
            .into_iter()
            .map(|name| name.as_ref().parse::<Operation>())
            .collect::<GenotypeResult<Vec<_>>>()?;
        Self::new(ops)
    }

    /// The full benchmark alphabet (all five operations)
    pub fn full() -> Self {
        Self {
            ops: Operation::ALL.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Always false, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn contains(&self, op: Operation) -> bool {
        self.ops.binary_search(&op).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = Operation> + '_ {
        self.ops.iter().copied()
    }

    pub fn as_slice(&self) -> &[Operation] {
        &self.ops
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::full()
    }
}

impl TryFrom<Vec<Operation>> for Alphabet {
    type Error = GenotypeError;

    fn try_from(ops: Vec<Operation>) -> Result<Self, Self::Error> {
        Self::new(ops)
    }
}

impl From<Alphabet> for Vec<Operation> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_roundtrip() {
        for op in Operation::ALL {
            assert_eq!(op.as_str().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_unknown_operation() {
        let result = "conv_5x5".parse::<Operation>();
        assert!(matches!(result, Err(GenotypeError::Format(_))));
    }

    #[test]
    fn test_alphabet_is_sorted_and_deduplicated() {
        let alphabet = Alphabet::new(vec![
            Operation::SkipConnect,
            Operation::None,
            Operation::SkipConnect,
        ])
        .unwrap();
        assert_eq!(
            alphabet.as_slice(),
            &[Operation::None, Operation::SkipConnect]
        );
        assert!(alphabet.contains(Operation::None));
        assert!(!alphabet.contains(Operation::NorConv3x3));
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        assert!(Alphabet::new(Vec::new()).is_err());
        assert!(Alphabet::from_names(Vec::<String>::new()).is_err());
    }

    #[test]
    fn test_alphabet_from_names() {
        let alphabet = Alphabet::from_names(["nor_conv_3x3", "nor_conv_1x1"]).unwrap();
        assert_eq!(
            alphabet.as_slice(),
            &[Operation::NorConv1x1, Operation::NorConv3x3]
        );
        assert!(Alphabet::from_names(["nor_conv_1x1", "bogus"]).is_err());
    }

    #[test]
    fn test_alphabet_serde_uses_canonical_names() {
        let alphabet = Alphabet::full();
        let json = serde_json::to_string(&alphabet).unwrap();
        assert_eq!(
            json,
            r#"["none","nor_conv_1x1","nor_conv_3x3","skip_connect","avg_pool_3x3"]"#
        );
        let parsed: Alphabet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, alphabet);
        assert!(serde_json::from_str::<Alphabet>("[]").is_err());
    }
}
