use serde::Serialize;

use crate::models::{Priority, Task};

/// Counts over the full collection, independent of any filter or search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub high_priority: usize,
}

impl Statistics {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut s, t| {
            s.total += 1;
            if t.completed {
                s.completed += 1;
            } else {
                s.pending += 1;
            }
            if t.priority == Priority::High {
                s.high_priority += 1;
            }
            s
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskDraft;

    #[test]
    fn test_empty() {
        assert_eq!(Statistics::from_tasks(&[]), Statistics::default());
    }

    fn tasks(rows: &[(Priority, bool)]) -> Vec<Task> {
        rows.iter()
            .enumerate()
            .map(|(i, &(p, completed))| {
                let mut t = TaskDraft::new("t").with_priority(p).into_task(i.to_string()).unwrap();
                t.completed = completed;
                t
            })
            .collect()
    }

    fn assert_consistent(s: &Statistics) {
        assert_eq!(s.pending + s.completed, s.total, "{s:?}");
        assert!(s.high_priority <= s.total, "{s:?}");
    }

    #[test]
    fn test_counts() {
        let tasks = tasks(&[
            (Priority::Low, false),
            (Priority::High, true),
            (Priority::High, false),
        ]);

        let s = Statistics::from_tasks(&tasks);
        assert_eq!(s.total, 3);
        assert_eq!(s.pending, 2);
        assert_eq!(s.completed, 1);
        assert_eq!(s.high_priority, 2);
        assert_consistent(&s);
    }

    #[test]
    fn test_single_task() {
        let s = Statistics::from_tasks(&tasks(&[(Priority::High, true)]));
        assert_eq!((s.total, s.pending, s.completed, s.high_priority), (1, 0, 1, 1));
        assert_consistent(&s);

        let s = Statistics::from_tasks(&tasks(&[(Priority::Low, false)]));
        assert_eq!((s.total, s.pending, s.completed, s.high_priority), (1, 1, 0, 0));
        assert_consistent(&s);
    }

    #[test]
    fn test_relations_hold_for_mixed_collections() {
        let combos: Vec<(Priority, bool)> = [Priority::Low, Priority::Medium, Priority::High]
            .into_iter()
            .flat_map(|p| [(p, false), (p, true)])
            .collect();
        assert_consistent(&Statistics::from_tasks(&[]));
        // Every prefix and every single-combo repetition.
        for n in 1..=combos.len() {
            let s = Statistics::from_tasks(&tasks(&combos[..n]));
            assert_eq!(s.total, n);
            assert_consistent(&s);
        }
        for &combo in &combos {
            let s = Statistics::from_tasks(&tasks(&[combo; 4]));
            let high = if combo.0 == Priority::High { 4 } else { 0 };
            assert_eq!(s.high_priority, high);
            assert_eq!(s.completed, if combo.1 { 4 } else { 0 });
            assert_consistent(&s);
        }
    }
}
