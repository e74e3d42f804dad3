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

//! Environment variable naming rules.

/// Convert a schema path to an environment variable name, e.g.
/// `["database", "host"]` becomes `DATABASE_HOST`.
pub fn path_to_var_name<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(|segment| segment.as_ref().to_uppercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Make sure the prefix ends with a single separating `_`.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.ends_with('_') {
        prefix.to_string()
    } else {
        format!("{prefix}_")
    }
}

/// Strip the normalized prefix off a variable name.
///
/// The caller must have checked that `key` starts with the normalized prefix.
pub fn strip_prefix<'a>(prefix: &str, key: &'a str) -> &'a str {
    let len = normalize_prefix(prefix).len();
    key.get(len..).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(&["field1"], "FIELD1"; "single segment")]
    #[test_case(&["database", "host"], "DATABASE_HOST"; "nested segments")]
    #[test_case(&["sub_config", "sub_field"], "SUB_CONFIG_SUB_FIELD"; "underscored segments")]
    fn path_to_var_name_joins_and_uppercases(path: &[&str], expected: &str) {
        assert_eq!(path_to_var_name(path), expected);
    }

    #[test_case("MYAPP", "MYAPP_"; "appends separator")]
    #[test_case("MYAPP_", "MYAPP_"; "keeps existing separator")]
    #[test_case("", "_"; "empty prefix")]
    fn normalize_prefix_appends_one_underscore(prefix: &str, expected: &str) {
        assert_eq!(normalize_prefix(prefix), expected);
    }

    #[test]
    fn normalize_prefix_is_idempotent() {
        let once = normalize_prefix("MYAPP");
        assert_eq!(normalize_prefix(&once), once);
    }

    #[test]
    fn strip_prefix_removes_normalized_prefix() {
        assert_eq!(strip_prefix("MYAPP", "MYAPP_DEBUG"), "DEBUG");
        assert_eq!(strip_prefix("MYAPP_", "MYAPP_DATABASE_HOST"), "DATABASE_HOST");
    }
}
