use std::path::Path;

use serde_json::json;

use crate::cli::open_list;
use crate::error::TasklistError;
use crate::output;

pub fn run(json_output: bool, dir: Option<&Path>) -> i32 {
    super::finish(run_inner(json_output, dir), json_output)
}

fn run_inner(json_output: bool, dir: Option<&Path>) -> Result<i32, TasklistError> {
    let list = open_list(dir)?;
    let stats = list.stats();

    if json_output {
        output::json::print(&output::json::success(json!({
            "stats": output::json::stats_json(&stats),
            "load_status": list.load_status().as_str()
        })));
    } else {
        output::text::print_stats(&stats);
    }
    Ok(0)
}
