/*
 * Licensed to the Apache Software Foundation (ASF) under one
 * or more contributor license agreements.  See the NOTICE file
 * distributed with this work for additional information
 * regarding copyright ownership.  The ASF licenses this file
 * to you under the Apache License, Version 2.0 (the
 * "License"); you may not use this file except in compliance
 * with the License.  You may obtain a copy of the License at
 *
 *   http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing,
 * software distributed under the License is distributed on an
 * "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
 * KIND, either express or implied.  See the License for the
 * specific language governing permissions and limitations
 * under the License.
 */

//! Variable name to schema path lookup table.

use crate::error::{Collision, SchemaAmbiguityError};
use crate::naming::path_to_var_name;
use crate::paths::{FieldPath, LeafPath, leaf_paths};
use crate::schema::Schema;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error};

/// Maps every derived (unprefixed) variable name to the leaf it addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTable {
    entries: BTreeMap<String, LeafPath>,
}

impl PathTable {
    /// Build the table for a schema, rejecting names produced by more than one path.
    pub fn build(schema: &Schema) -> Result<Self, SchemaAmbiguityError> {
        let leaves = leaf_paths(schema);

        let mut order: Vec<String> = Vec::new();
        let mut grouped: HashMap<String, Vec<LeafPath>> = HashMap::new();
        for leaf in leaves {
            let var_name = path_to_var_name(leaf.path.segments());
            let group = grouped.entry(var_name.clone()).or_default();
            if group.is_empty() {
                order.push(var_name);
            }
            group.push(leaf);
        }

        let collisions: Vec<Collision> = order
            .iter()
            .filter_map(|var_name| {
                let group = grouped.get(var_name)?;
                (group.len() > 1).then(|| Collision {
                    var_name: var_name.clone(),
                    paths: group.iter().map(|leaf| leaf.path.clone()).collect(),
                })
            })
            .collect();

        if !collisions.is_empty() {
            let error = SchemaAmbiguityError::new(collisions);
            error!(
                "Schema '{}' has ambiguous environment variables: {}",
                schema.name(),
                error.var_names().join(", ")
            );
            return Err(error);
        }

        let entries: BTreeMap<String, LeafPath> = grouped
            .into_iter()
            .filter_map(|(var_name, mut group)| group.pop().map(|leaf| (var_name, leaf)))
            .collect();
        debug!(
            "Built path table for schema '{}' with {} variables.",
            schema.name(),
            entries.len()
        );
        Ok(Self { entries })
    }

    pub fn get(&self, var_name: &str) -> Option<&LeafPath> {
        self.entries.get(var_name)
    }

    pub fn contains(&self, var_name: &str) -> bool {
        self.entries.contains_key(var_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All recognized variable names, sorted.
    pub fn var_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Variable names of leaves marked secret.
    pub fn secret_var_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, leaf)| leaf.secret)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LeafPath)> {
        self.entries.iter().map(|(name, leaf)| (name.as_str(), leaf))
    }

    /// Plain `name -> path segments` view of the table.
    pub fn to_path_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries
            .iter()
            .map(|(name, leaf)| (name.clone(), leaf.path.segments().to_vec()))
            .collect()
    }

    pub fn path(&self, var_name: &str) -> Option<&FieldPath> {
        self.entries.get(var_name).map(|leaf| &leaf.path)
    }
}
