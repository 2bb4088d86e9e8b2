//! CLI output: JSON envelope for config commands, text report for renames.

mod response;
pub mod summary;

pub use response::{map_cmd_result, map_cmd_result_to_json, print_error_plain, print_json_result};
