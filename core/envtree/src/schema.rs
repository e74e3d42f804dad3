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

//! Schema definitions consumed by the path enumerator.

use std::fmt::Display;

/// How a leaf's raw string is turned into a typed value before extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    String,
    Integer,
    Float,
    Bool,
    /// Opaque value handed to serde as a string (enums, durations, `FromStr` types).
    Text,
}

impl Display for LeafKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Bool => write!(f, "boolean"),
            Self::Text => write!(f, "text"),
        }
    }
}

/// Declared type of a field: either a leaf value or a nested schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Leaf(LeafKind),
    Nested(Schema),
}

impl FieldType {
    /// Returns true when the field expands into further fields.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    pub fn as_schema(&self) -> Option<&Schema> {
        match self {
            Self::Nested(schema) => Some(schema),
            Self::Leaf(_) => None,
        }
    }
}

/// A single field declaration.
///
/// The alias, when present, replaces the name in every derived path and
/// variable name. The Rust field the value ends up in is bound through serde.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    alias: Option<String>,
    ty: FieldType,
    secret: bool,
}

impl Field {
    pub fn leaf(name: impl Into<String>, kind: LeafKind) -> Self {
        Self {
            name: name.into(),
            alias: None,
            ty: FieldType::Leaf(kind),
            secret: false,
        }
    }

    pub fn nested(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            alias: None,
            ty: FieldType::Nested(schema),
            secret: false,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Marks the field as secret; its value is masked in logs and errors.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The segment this field contributes to a path.
    pub fn path_segment(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }
}

/// An ordered tree of field declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<Field>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Types that describe their own environment schema.
/// Implemented automatically by `#[derive(EnvSchema)]`.
pub trait EnvSchema {
    fn schema() -> Schema;
}
