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

//! Configuration parsing error types.

use crate::paths::FieldPath;
use crate::schema::LeafKind;
use std::fmt::Display;
use thiserror::Error;

/// Replacement shown instead of secret values.
pub const SECRET_MASK: &str = "******";

#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error(transparent)]
    SchemaAmbiguity(#[from] SchemaAmbiguityError),
    #[error(transparent)]
    UnrecognizedVariable(#[from] UnrecognizedVariableError),
    #[error(
        "Environment variable `{var_name}` conflicts with another value at config path `{path}`"
    )]
    ConflictingPath { var_name: String, path: FieldPath },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ConfigParseError {
    /// Re-attach the normalized prefix to every variable name in the error.
    pub(crate) fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::UnrecognizedVariable(error) => {
                Self::UnrecognizedVariable(error.with_prefix(prefix))
            }
            Self::ConflictingPath { var_name, path } => Self::ConflictingPath {
                var_name: format!("{prefix}{var_name}"),
                path,
            },
            other => other,
        }
    }
}

/// Failures reported by the validation stage.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error(
        "Invalid value `{value}` for environment variable `{var_name}` (config path `{path}`), expected {expected}"
    )]
    InvalidValue {
        var_name: String,
        path: FieldPath,
        expected: LeafKind,
        value: String,
    },
    #[error("Configuration was rejected: {0}")]
    Rejected(#[from] figment::Error),
}

/// Several schema paths resolve to one variable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub var_name: String,
    pub paths: Vec<FieldPath>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaAmbiguityError {
    collisions: Vec<Collision>,
}

impl SchemaAmbiguityError {
    pub(crate) fn new(collisions: Vec<Collision>) -> Self {
        Self { collisions }
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn var_names(&self) -> Vec<&str> {
        self.collisions
            .iter()
            .map(|collision| collision.var_name.as_str())
            .collect()
    }
}

impl Display for SchemaAmbiguityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cannot load config; ambiguous environment variable names based on schema paths."
        )?;
        for collision in &self.collisions {
            let paths = collision
                .paths
                .iter()
                .map(|path| format!("`{path}`"))
                .collect::<Vec<_>>()
                .join(", ");
            write!(
                f,
                "\nPaths {paths} all resolve to the environment variable `{}`",
                collision.var_name
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaAmbiguityError {}

/// An input variable matched no leaf of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedVariableError {
    key: String,
    recognized: Vec<String>,
    suggestions: Vec<String>,
}

impl UnrecognizedVariableError {
    pub(crate) fn new(key: String, recognized: Vec<String>, suggestions: Vec<String>) -> Self {
        Self {
            key,
            recognized,
            suggestions,
        }
    }

    pub(crate) fn with_prefix(self, prefix: &str) -> Self {
        let prefixed = |names: Vec<String>| -> Vec<String> {
            names
                .into_iter()
                .map(|name| format!("{prefix}{name}"))
                .collect()
        };
        Self {
            key: format!("{prefix}{}", self.key),
            recognized: prefixed(self.recognized),
            suggestions: prefixed(self.suggestions),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn recognized(&self) -> &[String] {
        &self.recognized
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

impl Display for UnrecognizedVariableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Unrecognized environment variable `{}`; expected one of: {}",
            self.key,
            self.recognized.join(", ")
        )?;
        if !self.suggestions.is_empty() {
            write!(f, ". Similar: {}", self.suggestions.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for UnrecognizedVariableError {}
