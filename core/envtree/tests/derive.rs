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

use envtree::{ConfigParseError, ConfigParser, EnvSchema, Field, FieldType, LeafKind, Schema};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    Dev,
    Prod,
}

fn default_workers() -> u32 {
    4
}

#[derive(Debug, PartialEq, Deserialize, EnvSchema)]
struct Limits {
    max_connections: u64,
    ratio: f64,
}

#[derive(Debug, PartialEq, Deserialize, EnvSchema)]
#[env_schema(name = "tuning-config")]
struct TuningConfig {
    #[serde(default = "default_workers")]
    workers: u32,
    label: Option<String>,
    limits: Option<Limits>,
    #[env_schema(leaf)]
    mode: Mode,
    #[env_schema(secret)]
    token: Arc<String>,
    #[env_schema(skip)]
    #[serde(skip)]
    runtime_only: u8,
}

#[derive(Debug, Deserialize, EnvSchema)]
struct Inner {
    b: String,
}

#[derive(Debug, Deserialize, EnvSchema)]
struct Ambiguous {
    a_b: String,
    a: Inner,
}

#[test]
fn derived_schema_mirrors_the_struct() {
    let schema = TuningConfig::schema();
    assert_eq!(schema.name(), "tuning-config");

    let names: Vec<&str> = schema.fields().iter().map(Field::name).collect();
    assert_eq!(names, vec!["workers", "label", "limits", "mode", "token"]);

    let kinds: Vec<Option<LeafKind>> = schema
        .fields()
        .iter()
        .map(|field| match field.ty() {
            FieldType::Leaf(kind) => Some(*kind),
            FieldType::Nested(_) => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(LeafKind::Integer),
            Some(LeafKind::String),
            None,
            Some(LeafKind::Text),
            Some(LeafKind::String),
        ]
    );
    assert!(schema.fields()[4].is_secret());
}

#[test]
fn nested_schema_is_expanded_from_inner_type() {
    let schema = TuningConfig::schema();
    let limits = schema.fields()[2]
        .ty()
        .as_schema()
        .expect("limits should be nested");
    assert_eq!(limits, &Limits::schema());
    assert_eq!(limits.name(), "Limits");
}

#[test]
fn serde_rename_becomes_alias() {
    #[derive(Deserialize, EnvSchema)]
    struct Database {
        #[serde(rename = "host", default)]
        address: String,
    }

    let schema = Database::schema();
    assert_eq!(
        schema,
        Schema::new("Database").field(Field::leaf("address", LeafKind::String).with_alias("host"))
    );
}

#[test]
fn optional_and_default_fields_may_be_absent() {
    let parser = ConfigParser::<TuningConfig>::new(Some("TUNING"));
    let config = parser
        .parse([("TUNING_MODE", Some("prod")), ("TUNING_TOKEN", Some("secret"))])
        .expect("parse should succeed");

    assert_eq!(
        config,
        TuningConfig {
            workers: 4,
            label: None,
            limits: None,
            mode: Mode::Prod,
            token: Arc::new("secret".to_string()),
            runtime_only: 0,
        }
    );
}

#[test]
fn optional_nested_schema_is_filled_when_present() {
    let parser = ConfigParser::<TuningConfig>::new(Some("TUNING"));
    let config = parser
        .parse([
            ("TUNING_WORKERS", Some("16")),
            ("TUNING_LABEL", Some("")),
            ("TUNING_LIMITS_MAX_CONNECTIONS", Some("100")),
            ("TUNING_LIMITS_RATIO", Some("0.5")),
            ("TUNING_MODE", Some("dev")),
            ("TUNING_TOKEN", Some("t")),
        ])
        .expect("parse should succeed");

    assert_eq!(config.workers, 16);
    assert_eq!(config.label.as_deref(), Some(""));
    assert_eq!(
        config.limits,
        Some(Limits {
            max_connections: 100,
            ratio: 0.5,
        })
    );
    assert_eq!(config.mode, Mode::Dev);
}

#[test]
fn skipped_fields_have_no_variable() {
    let parser = ConfigParser::<TuningConfig>::new(Some("TUNING"));
    let names = parser.env_var_names().expect("names");
    assert!(!names.iter().any(|name| name.contains("RUNTIME_ONLY")));
    assert_eq!(names.len(), 6);
}

#[test]
fn colliding_derived_schema_is_rejected() {
    let parser = ConfigParser::<Ambiguous>::new(None);
    let error = parser
        .parse([("A_B", Some("x"))])
        .expect_err("ambiguous schema should fail");

    let ConfigParseError::SchemaAmbiguity(error) = error else {
        panic!("expected schema ambiguity error");
    };
    assert_eq!(error.var_names(), vec!["A_B"]);
    assert!(error.to_string().contains("`A_B`"));
}

#[derive(Debug, PartialEq, Deserialize, EnvSchema)]
#[serde(rename_all = "camelCase")]
struct Pool {
    max_conn: u32,
    #[serde(rename = "idle_timeout")]
    idle_secs: u64,
}

#[test]
fn container_rename_all_names_the_variables() {
    let parser = ConfigParser::<Pool>::new(Some("APP"));
    assert_eq!(
        parser.env_var_names().expect("names"),
        vec!["APP_IDLE_TIMEOUT", "APP_MAXCONN"]
    );

    let pool = parser
        .parse([("APP_MAXCONN", Some("5")), ("APP_IDLE_TIMEOUT", Some("30"))])
        .expect("parse should succeed");
    assert_eq!(
        pool,
        Pool {
            max_conn: 5,
            idle_secs: 30,
        }
    );
}

#[test]
fn field_name_is_not_accepted_under_rename_all() {
    let parser = ConfigParser::<Pool>::new(Some("APP"));
    let error = parser
        .parse([("APP_MAX_CONN", Some("5"))])
        .expect_err("unrenamed variable should be rejected");

    let ConfigParseError::UnrecognizedVariable(error) = error else {
        panic!("expected unrecognized variable error");
    };
    assert_eq!(error.key(), "APP_MAX_CONN");
    assert_eq!(
        error.suggestions().first().map(String::as_str),
        Some("APP_MAXCONN")
    );
}

#[test]
fn wide_integers_parse_beyond_64_bits() {
    #[derive(Debug, Deserialize, EnvSchema)]
    struct Quota {
        bytes: u128,
        offset: i128,
    }

    let quota: Quota = envtree::parse(
        None,
        [
            ("BYTES", Some("18446744073709551616")),
            ("OFFSET", Some("-9223372036854775809")),
        ],
    )
    .expect("parse should succeed");
    assert_eq!(quota.bytes, u128::from(u64::MAX) + 1);
    assert_eq!(quota.offset, i128::from(i64::MIN) - 1);
}
