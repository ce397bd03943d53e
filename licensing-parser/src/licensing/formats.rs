//! Output format implementations for forest serialization
//!
//! - json: the interchange record shape, readable back with [`forest_from_json`]
//! - yaml: the same records as YAML
//! - treeviz: one line per node, for humans

pub mod json;
pub mod registry;
pub mod treeviz;
pub mod yaml;

pub use json::{forest_from_json, to_json_string, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params, TreevizFormatter};
pub use yaml::YamlFormatter;
