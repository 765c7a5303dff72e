use serde_json::{json, Value};

use crate::error::TasklistError;
use crate::models::{FilterState, Task, TaskDraft};
use crate::query::Statistics;

pub fn print(v: &Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()));
}

pub fn success(data: Value) -> Value {
    json!({
        "success": true,
        "data": data
    })
}

pub fn error(err: &TasklistError) -> Value {
    json!({
        "success": false,
        "error": {
            "code": err.code.as_str(),
            "message": err.message
        }
    })
}

pub fn stats_json(s: &Statistics) -> Value {
    json!({
        "total": s.total,
        "pending": s.pending,
        "completed": s.completed,
        "high_priority": s.high_priority
    })
}

pub fn task_json(t: &Task) -> Value {
    json!({
        "id": t.id,
        "title": t.title,
        "description": t.description,
        "priority": t.priority.as_str(),
        "category": t.category,
        "due_date": t.due_date,
        "completed": t.completed
    })
}

pub fn draft_json(d: &TaskDraft) -> Value {
    json!({
        "title": d.title,
        "description": d.description,
        "priority": d.priority.as_str(),
        "category": d.category,
        "due_date": d.due_date
    })
}

pub fn filters_json(f: &FilterState, search: &str) -> Value {
    json!({
        "status": f.status.as_str(),
        "priority": f.priority.as_str(),
        "search": search
    })
}
