// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::de::DeserializeOwned;

/// Decodes locally persisted JSON, degrading to the default on any failure.
///
/// Local persistence is a best-effort cache, never a required source of
/// truth: a missing value, an empty string, or corrupt JSON all yield
/// `T::default()` instead of propagating an error.
///
/// # Arguments
///
/// * `raw` - The raw persisted value, if any
#[must_use]
pub fn parse_or_default<T>(raw: Option<&str>) -> T
where
    T: DeserializeOwned + Default,
{
    raw.filter(|value| !value.is_empty())
        .and_then(|value| serde_json::from_str(value).ok())
        .unwrap_or_default()
}
