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

//! Reshaping flat variables into a nested proto-config.

use crate::error::{ConfigParseError, UnrecognizedVariableError};
use crate::paths::LeafPath;
use crate::suggest::find_similar_names;
use crate::table::PathTable;
use std::collections::BTreeMap;

/// A node of the proto-config: a raw string or a nested level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtoValue {
    Value(String),
    Nested(ProtoConfig),
}

impl ProtoValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Nested(_) => None,
        }
    }

    pub fn as_nested(&self) -> Option<&ProtoConfig> {
        match self {
            Self::Nested(config) => Some(config),
            Self::Value(_) => None,
        }
    }
}

/// Nested, untyped configuration mirroring the schema tree. Only the
/// sub-paths present in the input exist; absent fields have no key at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtoConfig(BTreeMap<String, ProtoValue>);

impl ProtoConfig {
    pub fn get(&self, key: &str) -> Option<&ProtoValue> {
        self.0.get(key)
    }

    /// Look up a value by its path segments.
    pub fn get_path<S: AsRef<str>>(&self, path: &[S]) -> Option<&ProtoValue> {
        let (first, rest) = path.split_first()?;
        let value = self.0.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(value);
        }
        value.as_nested()?.get_path(rest)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProtoValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Store `value` at the leaf's path, creating missing levels. Fails when a
    /// raw value and a nested level would have to share one slot.
    fn insert_leaf(
        &mut self,
        var_name: &str,
        leaf: &LeafPath,
        value: String,
    ) -> Result<(), ConfigParseError> {
        let conflict = || ConfigParseError::ConflictingPath {
            var_name: var_name.to_string(),
            path: leaf.path.clone(),
        };
        let Some((last, parents)) = leaf.path.segments().split_last() else {
            return Ok(());
        };

        let mut level = &mut self.0;
        for segment in parents {
            let slot = level
                .entry(segment.clone())
                .or_insert_with(|| ProtoValue::Nested(ProtoConfig::default()));
            level = match slot {
                ProtoValue::Nested(inner) => &mut inner.0,
                ProtoValue::Value(_) => return Err(conflict()),
            };
        }

        if let Some(ProtoValue::Nested(_)) = level.get(last) {
            return Err(conflict());
        }
        level.insert(last.clone(), ProtoValue::Value(value));
        Ok(())
    }
}

/// Rebuild the nested proto-config from unprefixed variables.
///
/// Every key must be present in the path table; values are stored as-is.
pub fn reshape(
    table: &PathTable,
    vars: &BTreeMap<String, String>,
) -> Result<ProtoConfig, ConfigParseError> {
    let mut root = ProtoConfig::default();

    for (var_name, value) in vars {
        let Some(leaf) = table.get(var_name) else {
            let suggestions = find_similar_names(var_name, table.var_names());
            return Err(UnrecognizedVariableError::new(
                var_name.clone(),
                table.var_names().map(String::from).collect(),
                suggestions,
            )
            .into());
        };

        root.insert_leaf(var_name, leaf, value.clone())?;
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Field, LeafKind, Schema};

    fn table() -> PathTable {
        let schema = Schema::new("App")
            .field(Field::leaf("debug", LeafKind::Bool))
            .field(Field::nested(
                "database",
                Schema::new("Database")
                    .field(Field::leaf("address", LeafKind::String).with_alias("host"))
                    .field(Field::leaf("port", LeafKind::Integer)),
            ));
        PathTable::build(&schema).expect("table should build")
    }

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builds_nested_levels() {
        let proto = reshape(
            &table(),
            &vars(&[
                ("DEBUG", "True"),
                ("DATABASE_HOST", "localhost"),
                ("DATABASE_PORT", "9999"),
            ]),
        )
        .expect("reshape should succeed");

        assert_eq!(proto.len(), 2);
        assert_eq!(proto.get("debug").and_then(ProtoValue::as_str), Some("True"));
        assert_eq!(
            proto
                .get_path(&["database", "host"])
                .and_then(ProtoValue::as_str),
            Some("localhost")
        );
        assert_eq!(
            proto
                .get_path(&["database", "port"])
                .and_then(ProtoValue::as_str),
            Some("9999")
        );
    }

    #[test]
    fn absent_fields_have_no_keys() {
        let proto = reshape(&table(), &vars(&[("DATABASE_PORT", "1")])).expect("reshape");
        assert!(proto.get("debug").is_none());
        let database = proto
            .get("database")
            .and_then(ProtoValue::as_nested)
            .expect("database level");
        assert!(database.get("host").is_none());
        assert_eq!(database.len(), 1);
    }

    #[test]
    fn empty_values_are_kept() {
        let proto = reshape(&table(), &vars(&[("DATABASE_HOST", "")])).expect("reshape");
        assert_eq!(
            proto
                .get_path(&["database", "host"])
                .and_then(ProtoValue::as_str),
            Some("")
        );
    }

    #[test]
    fn empty_input_gives_empty_proto_config() {
        let proto = reshape(&table(), &BTreeMap::new()).expect("reshape");
        assert!(proto.is_empty());
    }

    #[test]
    fn rejects_unrecognized_variables() {
        let error = reshape(&table(), &vars(&[("DATABASE_ADDRESS", "x")]))
            .expect_err("unknown variable should be rejected");

        let ConfigParseError::UnrecognizedVariable(error) = error else {
            panic!("expected unrecognized variable error");
        };
        assert_eq!(error.key(), "DATABASE_ADDRESS");
        assert_eq!(
            error.recognized(),
            ["DATABASE_HOST", "DATABASE_PORT", "DEBUG"]
        );
        assert!(error.suggestions().is_empty());
    }

    #[test]
    fn suggests_close_names_for_typos() {
        let error = reshape(&table(), &vars(&[("DATABASE_HSOT", "x")]))
            .expect_err("typo should be rejected");

        let ConfigParseError::UnrecognizedVariable(error) = error else {
            panic!("expected unrecognized variable error");
        };
        assert_eq!(error.key(), "DATABASE_HSOT");
        assert_eq!(
            error.suggestions().first().map(String::as_str),
            Some("DATABASE_HOST")
        );
    }

    #[test]
    fn rejects_value_where_level_is_expected() {
        let schema = Schema::new("Broken")
            .field(Field::leaf("a", LeafKind::String))
            .field(Field::nested(
                "a",
                Schema::new("A").field(Field::leaf("b", LeafKind::String)),
            ));
        let table = PathTable::build(&schema).expect("names do not collide");

        let error = reshape(&table, &vars(&[("A", "1"), ("A_B", "2")]))
            .expect_err("conflict should be rejected");
        assert!(matches!(
            error,
            ConfigParseError::ConflictingPath { ref var_name, .. } if var_name == "A_B"
        ));
    }
}
