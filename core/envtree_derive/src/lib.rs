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

//! Proc macro generating envtree schema definitions for configuration structs.
//!
//! `#[derive(EnvSchema)]` implements `envtree::EnvSchema` by walking the
//! struct's named fields at compile time.
//!
//! # Type Inference
//!
//! - **Leaf types** (`bool`, integers, floats, `String`, `char`): become leaves
//!   of the matching `LeafKind`
//! - **Nested types** (any other type): must implement `EnvSchema` themselves
//! - **Option<T>**, **Box<T>**, **Arc<T>**, **Rc<T>**: transparently unwrapped
//! - **Vec<T>** and map types: rejected, list and map values are not supported

mod env_schema;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro for generating an environment schema.
///
/// # Container Attributes
/// - `#[env_schema(name = "app-config")]` - Name used in provider metadata and
///   logs. Defaults to the struct name.
///
/// # Field Attributes
/// - `#[env_schema(skip)]` - Exclude this field from the schema
/// - `#[env_schema(secret)]` - Mask the field's value in logs and errors
/// - `#[env_schema(leaf)]` - Treat as an opaque value, not a nested schema
///   (enums, durations, any type serde reads from a string)
///
/// `#[serde(rename = "...")]` on a field, or a container
/// `#[serde(rename_all = "...")]`, is picked up as the field's alias, so the
/// variable name and the key serde expects always agree. A field-level rename
/// wins over `rename_all`. `#[serde(flatten)]` is rejected at compile time.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, EnvSchema)]
/// #[env_schema(name = "app-config")]
/// pub struct AppConfig {
///     pub debug: bool,               // DEBUG
///     pub database: DatabaseConfig,  // DATABASE_*
///     #[env_schema(leaf)]
///     pub mode: Mode,                // MODE
/// }
///
/// #[derive(Deserialize, EnvSchema)]
/// pub struct DatabaseConfig {
///     #[serde(rename = "host")]
///     pub address: String,           // DATABASE_HOST
///     pub port: u16,                 // DATABASE_PORT
///     #[env_schema(secret)]
///     pub password: String,          // DATABASE_PASSWORD
/// }
/// ```
#[proc_macro_derive(EnvSchema, attributes(env_schema))]
pub fn derive_env_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    env_schema::generate_impl(&input).into()
}
