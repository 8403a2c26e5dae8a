//! Filtering and ordering of the task list.

use crate::task::{ParseEnumError, Priority, Task};
use std::cmp::Reverse;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which tasks to show by completion state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.is_completed(),
            StatusFilter::Completed => task.is_completed(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "completed" => Ok(StatusFilter::Completed),
            _ => Err(ParseEnumError::new("status filter", s)),
        }
    }
}

impl Display for StatusFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::Completed => "completed",
        })
    }
}

/// Which tasks to show by priority.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(priority) => task.priority() == *priority,
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>()
            .map(PriorityFilter::Only)
            .map_err(|_| ParseEnumError::new("priority filter", s))
    }
}

impl Display for PriorityFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityFilter::All => f.write_str("all"),
            PriorityFilter::Only(priority) => Display::fmt(priority, f),
        }
    }
}

/// Keeps the tasks matching both filters, preserving their order.
pub fn filter<'a, I>(tasks: I, status: StatusFilter, priority: PriorityFilter) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| status.matches(task) && priority.matches(task))
        .collect()
}

/// Orders tasks for display: pending first, then higher priority, then
/// earlier due date. The sort is stable.
pub fn sort(tasks: &mut [&Task]) {
    tasks.sort_by_key(|task| {
        (
            task.is_completed(),
            Reverse(task.priority().rank()),
            task.due_date(),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskDraft;
    use chrono::NaiveDate;

    fn task(id: &str, priority: Priority, completed: bool, due: (i32, u32, u32)) -> Task {
        let due = NaiveDate::from_ymd_opt(due.0, due.1, due.2).unwrap();
        let mut task = Task::from_draft(
            id.to_string(),
            TaskDraft::new(id, due).with_priority(priority),
        );
        task.completed = completed;
        task
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|task| task.id().to_string()).collect()
    }

    mod filter_tests {
        use super::*;

        fn sample() -> Vec<Task> {
            vec![
                task("a", Priority::High, false, (2024, 1, 10)),
                task("b", Priority::High, true, (2024, 1, 11)),
                task("c", Priority::Low, true, (2024, 1, 12)),
                task("d", Priority::Medium, false, (2024, 1, 13)),
                task("e", Priority::High, true, (2024, 1, 14)),
            ]
        }

        #[test]
        fn all_filters_keep_everything_in_order() {
            let tasks = sample();

            let shown = filter(&tasks, StatusFilter::All, PriorityFilter::All);

            assert_eq!(ids(&shown), vec!["a", "b", "c", "d", "e"]);
        }

        #[test]
        fn completed_and_high_must_both_hold() {
            let tasks = sample();

            let shown = filter(
                &tasks,
                StatusFilter::Completed,
                PriorityFilter::Only(Priority::High),
            );

            assert_eq!(ids(&shown), vec!["b", "e"]);
        }

        #[test]
        fn pending_filter_excludes_completed() {
            let tasks = sample();

            let shown = filter(&tasks, StatusFilter::Pending, PriorityFilter::All);

            assert_eq!(ids(&shown), vec!["a", "d"]);
        }

        #[test]
        fn priority_filter_alone() {
            let tasks = sample();

            let shown = filter(
                &tasks,
                StatusFilter::All,
                PriorityFilter::Only(Priority::Low),
            );

            assert_eq!(ids(&shown), vec!["c"]);
        }

        #[test]
        fn parses_filter_names() {
            assert_eq!(
                "completed".parse::<StatusFilter>(),
                Ok(StatusFilter::Completed)
            );
            assert_eq!("all".parse::<PriorityFilter>(), Ok(PriorityFilter::All));
            assert_eq!(
                "Medium".parse::<PriorityFilter>(),
                Ok(PriorityFilter::Only(Priority::Medium))
            );
            assert!("done".parse::<StatusFilter>().is_err());
            assert!("urgent".parse::<PriorityFilter>().is_err());
        }
    }

    mod sort_tests {
        use super::*;

        #[test]
        fn pending_high_then_medium_then_completed() {
            let a = task("A", Priority::High, false, (2024, 1, 10));
            let b = task("B", Priority::Medium, false, (2024, 1, 5));
            let c = task("C", Priority::High, true, (2024, 1, 1));
            let mut tasks = vec![&c, &b, &a];

            sort(&mut tasks);

            assert_eq!(ids(&tasks), vec!["A", "B", "C"]);
        }

        #[test]
        fn equal_priority_orders_by_due_date() {
            let late = task("late", Priority::Low, false, (2024, 3, 1));
            let early = task("early", Priority::Low, false, (2024, 2, 1));
            let mut tasks = vec![&late, &early];

            sort(&mut tasks);

            assert_eq!(ids(&tasks), vec!["early", "late"]);
        }

        #[test]
        fn full_ties_keep_input_order() {
            let first = task("first", Priority::Medium, false, (2024, 1, 1));
            let second = task("second", Priority::Medium, false, (2024, 1, 1));
            let third = task("third", Priority::Medium, false, (2024, 1, 1));
            let mut tasks = vec![&second, &third, &first];

            sort(&mut tasks);

            assert_eq!(ids(&tasks), vec!["second", "third", "first"]);
        }

        #[test]
        fn completed_tasks_sort_among_themselves() {
            let low = task("low", Priority::Low, true, (2024, 1, 1));
            let high = task("high", Priority::High, true, (2024, 6, 1));
            let pending = task("pending", Priority::Low, false, (2024, 12, 1));
            let mut tasks = vec![&low, &high, &pending];

            sort(&mut tasks);

            assert_eq!(ids(&tasks), vec!["pending", "high", "low"]);
        }
    }
}
