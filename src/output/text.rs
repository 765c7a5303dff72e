use chrono::NaiveDate;

use crate::models::{Task, TaskDraft};
use crate::query::Statistics;

pub fn print_task(t: &Task, today: NaiveDate) {
    println!("Task: {} ({})", t.title, t.id);
    if let Some(ref desc) = t.description {
        println!("  Description: {desc}");
    }
    println!("  Status: {}", if t.completed { "completed" } else { "pending" });
    println!("  Priority: {}", t.priority.as_str());
    if !t.category.is_empty() {
        println!("  Category: {}", t.category);
    }
    if let Some(ref due) = t.due_date {
        let overdue = if t.is_overdue(today) { " (overdue)" } else { "" };
        println!("  Due: {due}{overdue}");
    }
}

pub fn print_task_list(tasks: &[&Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }
    for t in tasks {
        let mut line = format!(
            "  [{}] {} ({}) p={}",
            if t.completed { "x" } else { " " },
            t.title,
            short_id(&t.id),
            t.priority.as_str(),
        );
        if !t.category.is_empty() {
            line.push_str(&format!(" #{}", t.category));
        }
        if let Some(ref due) = t.due_date {
            line.push_str(&format!(" due {due}"));
            if t.is_overdue(today) {
                line.push_str(" (overdue)");
            }
        }
        println!("{line}");
    }
}

pub fn print_stats(s: &Statistics) {
    println!(
        "Tasks: total={} pending={} completed={} high_priority={}",
        s.total, s.pending, s.completed, s.high_priority
    );
}

pub fn print_draft(d: &TaskDraft) {
    println!("  Title: {}", d.title);
    if let Some(ref desc) = d.description {
        println!("  Description: {desc}");
    }
    println!("  Priority: {}", d.priority.as_str());
    if !d.category.is_empty() {
        println!("  Category: {}", d.category);
    }
    if let Some(ref due) = d.due_date {
        println!("  Due: {due}");
    }
}

fn short_id(id: &str) -> &str {
    id.get(id.len().saturating_sub(8)..).unwrap_or(id)
}
