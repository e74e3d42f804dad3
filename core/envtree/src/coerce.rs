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

//! Leaf coercion from raw strings into typed figment values.

use crate::error::{SECRET_MASK, ValidationError};
use crate::naming::path_to_var_name;
use crate::paths::FieldPath;
use crate::reshape::{ProtoConfig, ProtoValue};
use crate::schema::{FieldType, LeafKind, Schema};
use figment::value::{Dict, Tag, Value};

/// Turn a proto-config into a typed figment dictionary, walking it alongside
/// the schema so each raw string is converted according to its leaf kind.
///
/// `prefix` is the normalized prefix (or empty) used when naming variables in
/// errors; values of secret leaves and of `secret_keys` are masked.
pub(crate) fn coerce(
    schema: &Schema,
    proto: &ProtoConfig,
    prefix: &str,
    secret_keys: &[String],
) -> Result<Dict, ValidationError> {
    coerce_level(schema, proto, &FieldPath::default(), prefix, secret_keys)
}

fn coerce_level(
    schema: &Schema,
    level: &ProtoConfig,
    parent: &FieldPath,
    prefix: &str,
    secret_keys: &[String],
) -> Result<Dict, ValidationError> {
    let mut dict = Dict::new();
    for field in schema.fields() {
        let segment = field.path_segment();
        let Some(value) = level.get(segment) else {
            continue;
        };
        let path = parent.child(segment);

        match (field.ty(), value) {
            (FieldType::Nested(sub_schema), ProtoValue::Nested(inner)) => {
                let nested = coerce_level(sub_schema, inner, &path, prefix, secret_keys)?;
                dict.insert(segment.to_string(), Value::Dict(Tag::Default, nested));
            }
            (FieldType::Leaf(kind), ProtoValue::Value(raw)) => {
                let Some(typed) = coerce_leaf(*kind, raw) else {
                    let var_name = format!("{prefix}{}", path_to_var_name(path.segments()));
                    let secret = field.is_secret() || secret_keys.contains(&var_name);
                    return Err(ValidationError::InvalidValue {
                        value: if secret {
                            SECRET_MASK.to_string()
                        } else {
                            raw.clone()
                        },
                        var_name,
                        path,
                        expected: *kind,
                    });
                };
                dict.insert(segment.to_string(), typed);
            }
            // Shape mismatches only arise from duplicate field names and were
            // already rejected while reshaping.
            _ => continue,
        }
    }
    Ok(dict)
}

/// Convert one raw value, or `None` when it does not fit the leaf kind.
pub(crate) fn coerce_leaf(kind: LeafKind, raw: &str) -> Option<Value> {
    match kind {
        LeafKind::String | LeafKind::Text => Some(Value::from(raw)),
        LeafKind::Bool => parse_bool(raw).map(Value::from),
        LeafKind::Integer => {
            let raw = raw.trim();
            if let Ok(n) = raw.parse::<u64>() {
                return Some(Value::from(n));
            }
            if let Ok(n) = raw.parse::<i64>() {
                return Some(Value::from(n));
            }
            if let Ok(n) = raw.parse::<u128>() {
                return Some(Value::from(n));
            }
            raw.parse::<i128>().ok().map(Value::from)
        }
        LeafKind::Float => raw.trim().parse::<f64>().ok().map(Value::from),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
