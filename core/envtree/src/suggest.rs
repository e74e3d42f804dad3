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

//! "Did you mean" suggestions for mistyped variable names.

const MAX_SUGGESTIONS: usize = 3;

/// Find known names close to `unknown` by case-insensitive Levenshtein
/// distance. Returns up to three suggestions, closest first.
pub(crate) fn find_similar_names<'a, I>(unknown: &str, known: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let unknown_lower = unknown.to_lowercase();
    let mut suggestions: Vec<(&str, usize)> = known
        .into_iter()
        .filter_map(|candidate| {
            let distance = strsim::levenshtein(&unknown_lower, &candidate.to_lowercase());
            let threshold = (unknown.len().max(candidate.len()) * 3 / 10).max(3);
            (distance <= threshold).then_some((candidate, distance))
        })
        .collect();

    suggestions.sort_by(|(a_name, a_dist), (b_name, b_dist)| {
        a_dist.cmp(b_dist).then_with(|| a_name.cmp(b_name))
    });
    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
        .into_iter()
        .map(|(name, _)| name.to_string())
        .collect()
}
