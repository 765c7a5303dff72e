use std::path::Path;

use chrono::Local;
use serde_json::json;

use crate::cli::open_list;
use crate::error::TasklistError;
use crate::models::{PriorityFilter, StatusFilter};
use crate::output;

pub fn run(
    status: StatusFilter,
    priority: PriorityFilter,
    search: &str,
    json_output: bool,
    dir: Option<&Path>,
) -> i32 {
    super::finish(run_inner(status, priority, search, json_output, dir), json_output)
}

fn run_inner(
    status: StatusFilter,
    priority: PriorityFilter,
    search: &str,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let mut list = open_list(dir)?;
    list.set_status_filter(status);
    list.set_priority_filter(priority);
    list.set_search(search);

    let view = list.view();
    let stats = list.stats();

    if json_output {
        let mut data = json!({
            "tasks": view.iter().map(|t| output::json::task_json(t)).collect::<Vec<_>>(),
            "stats": output::json::stats_json(&stats),
            "filters": output::json::filters_json(&list.filters(), list.search()),
            "load_status": list.load_status().as_str()
        });
        if let Some(staged) = list.staged() {
            data["staged"] = output::json::draft_json(staged);
        }
        output::json::print(&output::json::success(data));
    } else {
        output::text::print_task_list(&view, Local::now().date_naive());
        println!();
        output::text::print_stats(&stats);
        if let Some(staged) = list.staged() {
            println!("\nEdit in progress (run `tasklist add` to save):");
            output::text::print_draft(staged);
        }
    }
    Ok(0)
}
