use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::KestrelConfig;

/// JSON Schema for `kestrel.toml`, for editor completion and validation.
#[must_use]
pub fn json_schema() -> RootSchema {
    schema_for!(KestrelConfig)
}
