// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Error types for genotype operations.
*/

/// Result type for genotype operations
pub type GenotypeResult<T> = Result<T, GenotypeError>;

/// Errors raised at the codec / distance boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenotypeError {
    /// Malformed architecture string, unknown operation name or a sequence
    /// that does not fit the expected cell topology
    #[error("Format error: {0}")]
    Format(String),

    /// Two edge sequences of different length were compared
    #[error("Length mismatch: {left} edges vs {right} edges")]
    LengthMismatch { left: usize, right: usize },
}
