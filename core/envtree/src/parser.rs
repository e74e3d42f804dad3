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

use crate::coerce::coerce;
use crate::error::{ConfigParseError, SECRET_MASK, SchemaAmbiguityError, ValidationError};
use crate::naming::{normalize_prefix, strip_prefix};
use crate::paths::LeafPath;
use crate::provider::EnvVarsProvider;
use crate::reshape::reshape;
use crate::schema::{EnvSchema, Schema};
use crate::table::PathTable;
use figment::Figment;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error, info, warn};

/// Parses configuration of type `T` from a flat dictionary of environment variables.
///
/// The parser is bound to one schema and an optional prefix for its whole
/// lifetime. Every call to [`ConfigParser::parse`] is independent; the only
/// thing shared between calls is the path table, computed once from the
/// immutable schema.
///
/// # Example
/// ```ignore
/// #[derive(Deserialize, EnvSchema)]
/// struct DatabaseConfig {
///     port: u16,
///     #[serde(rename = "host")]
///     address: String,
/// }
///
/// #[derive(Deserialize, EnvSchema)]
/// struct AppConfig {
///     debug: bool,
///     database: DatabaseConfig,
/// }
///
/// // MYAPP_DEBUG=True
/// // MYAPP_DATABASE_HOST=localhost
/// // MYAPP_DATABASE_PORT=9999
/// let parser = ConfigParser::<AppConfig>::new(Some("MYAPP"));
/// let config = parser.parse_process_env()?;
/// ```
pub struct ConfigParser<T> {
    schema: Arc<Schema>,
    prefix: Option<String>,
    secret_keys: Vec<String>,
    table: OnceLock<Result<PathTable, SchemaAmbiguityError>>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: EnvSchema + DeserializeOwned> ConfigParser<T> {
    /// Create a parser for the schema `T` derives.
    pub fn new(prefix: Option<&str>) -> Self {
        Self::with_schema(T::schema(), prefix)
    }
}

impl<T: DeserializeOwned> ConfigParser<T> {
    /// Create a parser from an explicitly built schema.
    pub fn with_schema(schema: impl Into<Arc<Schema>>, prefix: Option<&str>) -> Self {
        Self {
            schema: schema.into(),
            prefix: prefix.map(normalize_prefix),
            secret_keys: Vec::new(),
            table: OnceLock::new(),
            _phantom: PhantomData,
        }
    }

    /// Additional (prefixed) variable names whose values must be masked.
    pub fn with_secret_keys(mut self, secret_keys: &[&str]) -> Self {
        self.secret_keys = secret_keys.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The normalized prefix, including its trailing `_`.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn path_table(&self) -> Result<&PathTable, SchemaAmbiguityError> {
        self.table
            .get_or_init(|| PathTable::build(&self.schema))
            .as_ref()
            .map_err(|error| error.clone())
    }

    /// Map of unprefixed variable names to the schema paths they address.
    pub fn var_name_to_path_table(
        &self,
    ) -> Result<BTreeMap<String, Vec<String>>, SchemaAmbiguityError> {
        Ok(self.path_table()?.to_path_map())
    }

    /// Every variable name this parser accepts, with the prefix applied.
    pub fn env_var_names(&self) -> Result<Vec<String>, SchemaAmbiguityError> {
        let prefix = self.prefix_str();
        Ok(self
            .path_table()?
            .var_names()
            .map(|name| format!("{prefix}{name}"))
            .collect())
    }

    /// Prefixed variable names whose values are masked.
    pub fn secret_env_names(&self) -> Result<Vec<String>, SchemaAmbiguityError> {
        let prefix = self.prefix_str();
        let mut names: Vec<String> = self
            .path_table()?
            .secret_var_names()
            .map(|name| format!("{prefix}{name}"))
            .chain(self.secret_keys.iter().cloned())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Resolve variables into a figment provider without extracting `T`.
    ///
    /// Useful for layering the environment over other sources:
    /// ```ignore
    /// let provider = parser.provider(vars)?;
    /// let config: AppConfig = Figment::from(Toml::file("config.toml"))
    ///     .merge(provider)
    ///     .extract()?;
    /// ```
    pub fn provider<I, K, V>(&self, vars: I) -> Result<EnvVarsProvider, ConfigParseError>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let prefix = self.prefix_str();
        let vars = self.preprocess(vars);
        let table = self.path_table()?;

        let proto = match reshape(table, &vars) {
            Ok(proto) => proto,
            Err(error) => {
                let error = error.with_prefix(prefix);
                if let ConfigParseError::UnrecognizedVariable(unrecognized) = &error {
                    if unrecognized.suggestions().is_empty() {
                        warn!("Unknown environment variable '{}'.", unrecognized.key());
                    } else {
                        warn!(
                            "Unknown environment variable '{}'. Similar variables: {}?",
                            unrecognized.key(),
                            unrecognized.suggestions().join(", ")
                        );
                    }
                }
                return Err(error);
            }
        };

        for (name, value) in &vars {
            let env_name = format!("{prefix}{name}");
            let secret = table
                .get(name)
                .is_some_and(|leaf| self.is_secret(leaf, &env_name));
            let display_value = if secret { SECRET_MASK } else { value.as_str() };
            info!("{env_name} value set to: {display_value} from environment variable");
        }

        let data = coerce(&self.schema, &proto, prefix, &self.secret_keys)?;
        Ok(EnvVarsProvider::new(self.schema.name(), data))
    }

    /// Parse and validate configuration from a dictionary of variables.
    ///
    /// Entries mapped to `None` are treated exactly like missing entries.
    pub fn parse<I, K, V>(&self, vars: I) -> Result<T, ConfigParseError>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let provider = self.provider(vars)?;
        let config = Figment::from(provider).extract::<T>().map_err(|e| {
            error!("Failed to load config '{}': {e}", self.schema.name());
            ValidationError::from(e)
        })?;
        info!("Config '{}' loaded successfully.", self.schema.name());
        Ok(config)
    }

    /// Parse from a snapshot of the current process environment.
    /// Entries that are not valid UTF-8 are skipped.
    pub fn parse_process_env(&self) -> Result<T, ConfigParseError> {
        let vars = std::env::vars_os().filter_map(|(key, value)| {
            let key = key.into_string().ok()?;
            let value = value.into_string().ok()?;
            Some((key, Some(value)))
        });
        self.parse(vars)
    }

    fn prefix_str(&self) -> &str {
        self.prefix.as_deref().unwrap_or_default()
    }

    fn is_secret(&self, leaf: &LeafPath, env_name: &str) -> bool {
        leaf.secret || self.secret_keys.iter().any(|key| key == env_name)
    }

    /// Drop absent values, then keep and strip prefixed keys when a prefix is set.
    fn preprocess<I, K, V>(&self, vars: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let present = vars
            .into_iter()
            .filter_map(|(key, value)| -> Option<(String, String)> {
                Some((key.into(), value?.into()))
            });

        let Some(prefix) = self.prefix.as_deref() else {
            return present.collect();
        };

        let mut ignored = 0usize;
        let kept: BTreeMap<String, String> = present
            .filter_map(|(key, value)| {
                if key.starts_with(prefix) {
                    Some((strip_prefix(prefix, &key).to_string(), value))
                } else {
                    ignored += 1;
                    None
                }
            })
            .collect();
        debug!(
            "Kept {} variables with prefix '{}', ignored {}.",
            kept.len(),
            prefix,
            ignored
        );
        kept
    }
}

/// Parse configuration of type `T` in one call.
pub fn parse<T, I, K, V>(prefix: Option<&str>, vars: I) -> Result<T, ConfigParseError>
where
    T: EnvSchema + DeserializeOwned,
    I: IntoIterator<Item = (K, Option<V>)>,
    K: Into<String>,
    V: Into<String>,
{
    ConfigParser::<T>::new(prefix).parse(vars)
}
