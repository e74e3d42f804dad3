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

//! Leaf path enumeration.

use crate::schema::{FieldType, LeafKind, Schema};
use std::fmt::Display;

/// Ordered segments identifying one leaf field from the schema root.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn child(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// A leaf path together with what the leaf declares about its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafPath {
    pub path: FieldPath,
    pub kind: LeafKind,
    pub secret: bool,
}

/// Collect the path of every leaf field, in declaration order, expanding
/// nested schemas depth-first where they appear.
pub fn leaf_paths(schema: &Schema) -> Vec<LeafPath> {
    let mut leaves = Vec::new();
    collect_leaf_paths(schema, &FieldPath::default(), &mut leaves);
    leaves
}

fn collect_leaf_paths(schema: &Schema, prefix: &FieldPath, leaves: &mut Vec<LeafPath>) {
    for field in schema.fields() {
        let path = prefix.child(field.path_segment());
        match field.ty() {
            FieldType::Nested(sub_schema) => collect_leaf_paths(sub_schema, &path, leaves),
            FieldType::Leaf(kind) => leaves.push(LeafPath {
                path,
                kind: *kind,
                secret: field.is_secret(),
            }),
        }
    }
}
