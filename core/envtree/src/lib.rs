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

//! Resolves flat environment variables into nested, strongly-typed configuration.
//!
//! Every leaf field of a (possibly nested) schema gets a deterministic
//! variable name: the upper-cased, underscore-joined path of field names
//! (or aliases), optionally preceded by a prefix. Parsing filters the input
//! by prefix, rebuilds the nested structure from the flat variables, coerces
//! each leaf according to its declared kind, and extracts the target type
//! through figment and serde.
//!
//! - Schemas whose paths collide on one variable name are rejected.
//! - Variables that match no field are rejected, with suggestions.
//! - Missing required fields and malformed values are validation errors.

mod coerce;
mod error;
mod naming;
mod parser;
mod paths;
mod provider;
mod reshape;
mod schema;
mod suggest;
mod table;

pub use envtree_derive::EnvSchema;
pub use error::{
    Collision, ConfigParseError, SECRET_MASK, SchemaAmbiguityError, UnrecognizedVariableError,
    ValidationError,
};
pub use naming::{normalize_prefix, path_to_var_name, strip_prefix};
pub use parser::{ConfigParser, parse};
pub use paths::{FieldPath, LeafPath, leaf_paths};
pub use provider::EnvVarsProvider;
pub use reshape::{ProtoConfig, ProtoValue, reshape};
pub use schema::{EnvSchema, Field, FieldType, LeafKind, Schema};
pub use table::PathTable;
