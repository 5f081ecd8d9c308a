//! Output writers for generated levels.

mod json;
mod png;

pub use json::{plan_to_json, write_plan_json};
pub use png::{render_preview, write_preview, UNMATCHED};
