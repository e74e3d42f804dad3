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

//! Figment provider serving resolved environment variables.

use figment::value::{Dict, Map};
use figment::{Error, Metadata, Profile, Provider};

/// Resolved, typed environment configuration ready to be merged into a
/// [`figment::Figment`], e.g. on top of file-based defaults.
#[derive(Debug, Clone)]
pub struct EnvVarsProvider {
    schema_name: String,
    data: Dict,
}

impl EnvVarsProvider {
    pub(crate) fn new(schema_name: &str, data: Dict) -> Self {
        Self {
            schema_name: schema_name.to_string(),
            data,
        }
    }

    pub fn data_dict(&self) -> &Dict {
        &self.data
    }
}

impl Provider for EnvVarsProvider {
    fn metadata(&self) -> Metadata {
        Metadata::named(format!("{} environment variables", self.schema_name))
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut data = Map::new();
        data.insert(Profile::default(), self.data.clone());
        Ok(data)
    }
}
