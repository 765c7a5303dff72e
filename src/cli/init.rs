use std::env;
use std::path::Path;

use serde_json::json;

use crate::db::connection;
use crate::error::TasklistError;
use crate::output;

pub fn run(dir: Option<&Path>, json_output: bool) -> i32 {
    super::finish(run_inner(dir, json_output), json_output)
}

fn run_inner(dir: Option<&Path>, json_output: bool) -> Result<i32, TasklistError> {
    let root = match dir {
        Some(d) => d.to_path_buf(),
        None => env::current_dir()?,
    };
    let path = connection::init_db(&root)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "path": path.to_string_lossy()
        })));
    } else {
        println!("Initialized tasklist at {}", path.display());
    }
    Ok(0)
}
