// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Core types for landscape operations.
*/

use fla_genotype::GenotypeError;

/// Architecture identifier: position of the architecture in dataset order
pub type ArchId = usize;

/// Result type for landscape operations
pub type LandscapeResult<T> = Result<T, LandscapeError>;

/// Errors that can occur during landscape construction and analysis
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandscapeError {
    /// Codec / distance failure, propagated unchanged
    #[error(transparent)]
    Genotype(#[from] GenotypeError),

    #[error("Unknown architecture id {id} (dataset holds {len} architectures)")]
    UnknownArchitectureId { id: ArchId, len: usize },

    #[error("Unknown architecture: {0}")]
    UnknownArchitecture(String),

    #[error("Duplicate architecture '{arch}' at ids {first} and {second}")]
    DuplicateArchitecture {
        arch: String,
        first: ArchId,
        second: ArchId,
    },

    #[error("Dataset of {0} architectures exceeds the u32 id space")]
    TooManyArchitectures(usize),

    #[error("Fitness vector has {actual} values, dataset has {expected} architectures")]
    FitnessLengthMismatch { expected: usize, actual: usize },

    #[error("Non-finite fitness {value} at id {id}")]
    NonFiniteFitness { id: ArchId, value: f64 },

    #[error("Unknown fitness column: {0}")]
    UnknownFitnessColumn(String),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
