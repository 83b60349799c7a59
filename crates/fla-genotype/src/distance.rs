// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Edit (Hamming-over-edges) distance.
*/

use crate::codec::{decode, Genotype};
use crate::types::{GenotypeError, GenotypeResult};

impl Genotype {
    /// Number of edge positions where the two genotypes differ
    ///
    /// # Errors
    ///
    /// Returns `GenotypeError::LengthMismatch` if the sequences differ in length
    pub fn hamming(&self, other: &Genotype) -> GenotypeResult<usize> {
        if self.len() != other.len() {
            return Err(GenotypeError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(self
            .edges()
            .iter()
            .zip(other.edges())
            .filter(|(a, b)| a != b)
            .count())
    }
}

/// Edit distance between two architecture strings
pub fn edit_distance(a: &str, b: &str) -> GenotypeResult<usize> {
    decode(a)?.hamming(&decode(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const S1: &str = "|nor_conv_1x1~0|+|none~0|none~1|+|none~0|none~1|skip_connect~2|";

    #[test]
    fn test_identical() {
        assert_eq!(edit_distance(S1, S1).unwrap(), 0);
    }

    #[test]
    fn test_single_edge() {
        let s2 = "|none~0|+|none~0|none~1|+|none~0|none~1|skip_connect~2|";
        assert_eq!(edit_distance(S1, s2).unwrap(), 1);
        assert_eq!(edit_distance(s2, S1).unwrap(), 1);
    }

    #[test]
    fn test_all_edges() {
        let s2 = "|none~0|+|nor_conv_1x1~0|nor_conv_1x1~1|+|nor_conv_1x1~0|nor_conv_1x1~1|none~2|";
        assert_eq!(edit_distance(S1, s2).unwrap(), 6);
    }

    #[test]
    fn test_length_mismatch() {
        let three_nodes = "|none~0|+|none~0|none~1|";
        assert_eq!(
            edit_distance(S1, three_nodes),
            Err(GenotypeError::LengthMismatch { left: 6, right: 3 })
        );
    }

    #[test]
    fn test_malformed_propagates() {
        assert!(matches!(
            edit_distance(S1, "|none~0"),
            Err(GenotypeError::Format(_))
        ));
    }
}
