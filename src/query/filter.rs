use crate::models::{PriorityFilter, StatusFilter, Task};

/// Tasks admitted by both filters and the title search, in collection order.
///
/// The search is a case-insensitive substring match against the title only;
/// description and category are not searched. An empty search admits all.
pub fn filtered_view<'a>(
    tasks: &'a [Task],
    status: StatusFilter,
    priority: PriorityFilter,
    search: &str,
) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|t| status_admits(status, t))
        .filter(|t| priority_admits(priority, t))
        .filter(|t| needle.is_empty() || t.title.to_lowercase().contains(&needle))
        .collect()
}

fn status_admits(status: StatusFilter, task: &Task) -> bool {
    match status {
        StatusFilter::All => true,
        StatusFilter::Pending => !task.completed,
        StatusFilter::Completed => task.completed,
    }
}

fn priority_admits(priority: PriorityFilter, task: &Task) -> bool {
    match priority {
        PriorityFilter::All => true,
        PriorityFilter::Only(p) => task.priority == p,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskDraft};

    fn sample() -> Vec<Task> {
        let rows = [
            ("1", "Buy milk", Priority::Low, false),
            ("2", "Pay bills", Priority::High, false),
            ("3", "Call MOM", Priority::Medium, true),
            ("4", "Buy stamps", Priority::High, true),
        ];
        rows
            .into_iter()
            .map(|(id, title, priority, completed)| {
                let mut t = TaskDraft::new(title)
                    .with_priority(priority)
                    .with_category("errands")
                    .into_task(id.into())
                    .unwrap();
                t.completed = completed;
                t
            })
            .collect()
    }

    fn ids(view: &[&Task]) -> Vec<String> {
        view.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_identity() {
        let tasks = sample();
        let view = filtered_view(&tasks, StatusFilter::All, PriorityFilter::All, "");
        assert_eq!(ids(&view), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_status() {
        let tasks = sample();
        let pending = filtered_view(&tasks, StatusFilter::Pending, PriorityFilter::All, "");
        assert_eq!(ids(&pending), vec!["1", "2"]);
        let done = filtered_view(&tasks, StatusFilter::Completed, PriorityFilter::All, "");
        assert_eq!(ids(&done), vec!["3", "4"]);
    }

    #[test]
    fn test_priority_and_search_compose() {
        let tasks = sample();
        let only_high = PriorityFilter::Only(Priority::High);
        let high = filtered_view(&tasks, StatusFilter::All, only_high, "");
        assert_eq!(ids(&high), vec!["2", "4"]);
        let high_buy = filtered_view(&tasks, StatusFilter::All, only_high, "BUY");
        assert_eq!(ids(&high_buy), vec!["4"]);
        let pending_high_buy = filtered_view(&tasks, StatusFilter::Pending, only_high, "buy");
        assert!(pending_high_buy.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_and_title_only() {
        let tasks = sample();
        let mom = filtered_view(&tasks, StatusFilter::All, PriorityFilter::All, "mom");
        assert_eq!(ids(&mom), vec!["3"]);
        let category = filtered_view(&tasks, StatusFilter::All, PriorityFilter::All, "errands");
        assert!(category.is_empty());
    }

    #[test]
    fn test_relaxing_constraints_never_shrinks() {
        let tasks = sample();
        let statuses = [StatusFilter::All, StatusFilter::Pending, StatusFilter::Completed];
        let priorities = [
            PriorityFilter::All,
            PriorityFilter::Only(Priority::Low),
            PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::High),
        ];
        for status in statuses {
            for priority in priorities {
                for search in ["", "buy", "b", "zzz"] {
                    let narrow = ids(&filtered_view(&tasks, status, priority, search));
                    let relaxed = [
                        ids(&filtered_view(&tasks, StatusFilter::All, priority, search)),
                        ids(&filtered_view(&tasks, status, PriorityFilter::All, search)),
                        ids(&filtered_view(&tasks, status, priority, "")),
                    ];
                    for wider in relaxed {
                        assert!(narrow.iter().all(|id| wider.contains(id)));
                    }
                }
            }
        }
    }
}
