use std::path::Path;

use chrono::Local;
use serde_json::json;

use crate::app::TaskList;
use crate::cli::commands::{TaskCommands, TaskFields};
use crate::cli::open_list;
use crate::error::TasklistError;
use crate::models::{TaskDraft, DUE_DATE_FORMAT};
use crate::persist::BlobStore;
use crate::output;

pub fn run(cmd: TaskCommands, json_output: bool, dir: Option<&Path>) -> i32 {
    let result = match cmd {
        TaskCommands::Add { title, fields } => run_add(title, fields, json_output, dir),
        TaskCommands::Show { id } => run_show(&id, json_output, dir),
        TaskCommands::Toggle { id } => run_toggle(&id, json_output, dir),
        TaskCommands::Delete { id } => run_delete(&id, json_output, dir),
        TaskCommands::Edit { id } => run_edit(&id, json_output, dir),
        TaskCommands::Update { id, title, fields } => {
            run_update(&id, title, fields, json_output, dir)
        }
    };
    super::finish(result, json_output)
}

fn run_add(
    title: Option<String>,
    fields: TaskFields,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let mut list = open_list(dir)?;

    // A staged edit supplies the defaults; explicit values override it.
    let mut draft = list.next_draft();
    if let Some(title) = title {
        draft.title = title;
    }
    apply_fields(&mut draft, fields);

    let task = list.add(draft)?;
    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(&task),
            "persisted": list.last_persist().is_ok()
        })));
    } else {
        println!("Added task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_show(
    reference: &str,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let list = open_list(dir)?;
    let task = list
        .resolve(reference)?
        .ok_or_else(|| TasklistError::task_not_found(reference))?;

    if json_output {
        output::json::print(&output::json::success(json!({
            "task": output::json::task_json(task)
        })));
    } else {
        output::text::print_task(task, Local::now().date_naive());
    }
    Ok(0)
}

fn run_toggle(
    reference: &str,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let mut list = open_list(dir)?;
    let Some(id) = resolve_id(&list, reference)? else {
        return Ok(print_unmatched(reference, json_output));
    };
    let Some(completed) = list.toggle(&id) else {
        return Ok(print_unmatched(reference, json_output));
    };

    let task = list.find(&id).cloned();
    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": true,
            "task": task.as_ref().map(output::json::task_json),
            "persisted": list.last_persist().is_ok()
        })));
    } else if let Some(task) = task {
        let verb = if completed { "Completed" } else { "Reopened" };
        println!("{verb}: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_delete(
    reference: &str,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let mut list = open_list(dir)?;
    let Some(id) = resolve_id(&list, reference)? else {
        return Ok(print_unmatched(reference, json_output));
    };
    let Some(task) = list.delete(&id) else {
        return Ok(print_unmatched(reference, json_output));
    };

    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": true,
            "task": output::json::task_json(&task),
            "persisted": list.last_persist().is_ok()
        })));
    } else {
        println!("Deleted task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn run_edit(
    reference: &str,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let mut list = open_list(dir)?;
    let Some(id) = resolve_id(&list, reference)? else {
        return Ok(print_unmatched(reference, json_output));
    };
    let Some(staged) = list.begin_edit(&id).cloned() else {
        return Ok(print_unmatched(reference, json_output));
    };

    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": true,
            "removed_id": id,
            "staged": output::json::draft_json(&staged),
            "persisted": list.last_persist().is_ok()
        })));
    } else {
        println!("Editing task {id}. It has been removed; run `tasklist add` to save it again.");
        println!("Staged values:");
        output::text::print_draft(&staged);
    }
    Ok(0)
}

fn run_update(
    reference: &str,
    title: Option<String>,
    fields: TaskFields,
    json_output: bool,
    dir: Option<&Path>,
) -> Result<i32, TasklistError> {
    let mut list = open_list(dir)?;
    let Some(current) = list.resolve(reference)?.cloned() else {
        return Ok(print_unmatched(reference, json_output));
    };

    let mut draft = TaskDraft::from(&current);
    if let Some(title) = title {
        draft.title = title;
    }
    apply_fields(&mut draft, fields);

    let Some(task) = list.update(&current.id, draft)? else {
        return Ok(print_unmatched(reference, json_output));
    };
    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": true,
            "task": output::json::task_json(&task),
            "persisted": list.last_persist().is_ok()
        })));
    } else {
        println!("Updated task: {} ({})", task.title, task.id);
    }
    Ok(0)
}

fn apply_fields(draft: &mut TaskDraft, fields: TaskFields) {
    if let Some(description) = fields.description {
        draft.description = Some(description);
    }
    if let Some(priority) = fields.priority {
        draft.priority = priority;
    }
    if let Some(category) = fields.category {
        draft.category = category;
    }
    if let Some(due) = fields.due {
        draft.due_date = Some(due.format(DUE_DATE_FORMAT).to_string());
    }
    if fields.clear_due {
        draft.due_date = None;
    }
}

fn resolve_id<S: BlobStore>(
    list: &TaskList<S>,
    reference: &str,
) -> Result<Option<String>, TasklistError> {
    Ok(list.resolve(reference)?.map(|t| t.id.clone()))
}

/// Unknown IDs are a no-op, not an error.
fn print_unmatched(reference: &str, json_output: bool) -> i32 {
    if json_output {
        output::json::print(&output::json::success(json!({
            "changed": false,
            "reference": reference
        })));
    } else {
        println!("No task matched '{reference}'.");
    }
    0
}
