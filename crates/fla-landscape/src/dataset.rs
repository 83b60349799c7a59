// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Dataset - the logical input of an analysis run.

An ordered list of architecture strings plus one fitness column per
(task, training budget) pair, e.g. `"cifar10-200"`. Reading it from disk is the
caller's concern; this type only fixes the shape and checks alignment.
*/

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{LandscapeError, LandscapeResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Canonical architecture strings; id = position
    pub architectures: Vec<String>,

    /// Fitness columns, each aligned 1:1 with `architectures`
    #[serde(default)]
    pub fitness: BTreeMap<String, Vec<f64>>,
}

impl Dataset {
    pub fn new(architectures: Vec<String>) -> Self {
        Self {
            architectures,
            fitness: BTreeMap::new(),
        }
    }

    /// Add (or replace) a fitness column
    pub fn with_fitness(mut self, column: impl Into<String>, values: Vec<f64>) -> Self {
        self.fitness.insert(column.into(), values);
        self
    }

    pub fn len(&self) -> usize {
        self.architectures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.architectures.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fitness.keys().map(String::as_str)
    }

    /// Fitness vector for one column
    ///
    /// # Errors
    ///
    /// Returns `LandscapeError::UnknownFitnessColumn` if the column is absent
    pub fn fitness(&self, column: &str) -> LandscapeResult<&[f64]> {
        self.fitness
            .get(column)
            .map(Vec::as_slice)
            .ok_or_else(|| LandscapeError::UnknownFitnessColumn(column.to_string()))
    }

    /// Check every fitness column is aligned with the architecture list
    pub fn validate(&self) -> LandscapeResult<()> {
        for values in self.fitness.values() {
            if values.len() != self.architectures.len() {
                return Err(LandscapeError::FitnessLengthMismatch {
                    expected: self.architectures.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}
