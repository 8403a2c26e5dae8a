use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// A single entry of the task manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) description: String,
    #[serde(with = "due_date_format")]
    pub(crate) due_date: NaiveDate,
    pub(crate) priority: Priority,
    pub(crate) completed: bool,
}

impl Task {
    /// Builds a pending task from a draft that already passed validation.
    pub(crate) fn from_draft(id: String, draft: TaskDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            completed: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns the editable fields of this task, used to prefill an edit.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
        }
    }
}

/// Urgency of a task. Ordered so that `High` compares greatest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort weight: high 3, medium 2, low 1.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(ParseEnumError::new("priority", s)),
        }
    }
}

/// Raised when a priority or filter name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title is required")]
    EmptyTitle,
    #[error("Due date {due} cannot be in the past (today is {today})")]
    DueDateInPast { due: NaiveDate, today: NaiveDate },
    #[error("Completed tasks cannot be edited")]
    Completed,
}

/// The fields a user submits when creating or editing a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
}

impl TaskDraft {
    /// An empty form: no title or description, due today, medium priority.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: today,
            priority: Priority::default(),
        }
    }

    pub fn new(title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            due_date,
            priority: Priority::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Checks the submission rules against the given calendar day.
    pub fn validate(&self, today: NaiveDate) -> Result<(), TaskError> {
        if self.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle);
        }
        if self.due_date < today {
            return Err(TaskError::DueDateInPast {
                due: self.due_date,
                today,
            });
        }
        Ok(())
    }
}

/// Today's date in the host's local timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Formats a due date as the UTC instant of its midnight in `tz`.
pub(crate) fn due_date_to_text<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> String {
    let midnight = date.and_time(NaiveTime::MIN);
    let instant = tz
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight));
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Reads a stored due date, either an RFC 3339 date-time or a bare `YYYY-MM-DD`.
pub(crate) fn due_date_from_text<Tz: TimeZone>(
    text: &str,
    tz: &Tz,
) -> Result<NaiveDate, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(instant) => Ok(instant.with_timezone(tz).date_naive()),
        Err(_) => NaiveDate::parse_from_str(text, "%Y-%m-%d"),
    }
}

mod due_date_format {
    use super::{due_date_from_text, due_date_to_text};
    use chrono::{Local, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&due_date_to_text(*date, &Local))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let text = String::deserialize(deserializer)?;
        due_date_from_text(&text, &Local).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod validation_tests {
        use super::*;

        #[test]
        fn accepts_due_date_of_today() {
            let today = date(2024, 1, 10);
            let draft = TaskDraft::new("Write report", today);

            assert_eq!(draft.validate(today), Ok(()));
        }

        #[test]
        fn rejects_due_date_of_yesterday() {
            let today = date(2024, 1, 10);
            let draft = TaskDraft::new("Write report", date(2024, 1, 9));

            assert_eq!(
                draft.validate(today),
                Err(TaskError::DueDateInPast {
                    due: date(2024, 1, 9),
                    today
                })
            );
        }

        #[test]
        fn rejects_whitespace_title() {
            let today = date(2024, 1, 10);
            let draft = TaskDraft::new("   \t", today);

            assert_eq!(draft.validate(today), Err(TaskError::EmptyTitle));
        }

        #[test]
        fn blank_draft_is_due_today_with_medium_priority() {
            let today = date(2024, 1, 10);
            let draft = TaskDraft::blank(today);

            assert_eq!(draft.due_date, today);
            assert_eq!(draft.priority, Priority::Medium);
            assert_eq!(draft.validate(today), Err(TaskError::EmptyTitle));
        }
    }

    mod priority_tests {
        use super::*;

        #[test]
        fn ranks_high_above_medium_above_low() {
            assert_eq!(Priority::High.rank(), 3);
            assert_eq!(Priority::Medium.rank(), 2);
            assert_eq!(Priority::Low.rank(), 1);
            assert!(Priority::High > Priority::Medium && Priority::Medium > Priority::Low);
        }

        #[test]
        fn parses_names_case_insensitively() {
            assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
            assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
            assert!("urgent".parse::<Priority>().is_err());
        }
    }

    mod due_date_text_tests {
        use super::*;

        #[test]
        fn stores_local_midnight_as_utc_instant() {
            let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();

            let text = due_date_to_text(date(2024, 1, 10), &brasilia);

            assert_eq!(text, "2024-01-10T03:00:00.000Z");
        }

        #[test]
        fn reads_instant_back_as_local_calendar_day() {
            let brasilia = FixedOffset::west_opt(3 * 3600).unwrap();

            let parsed =
                due_date_from_text("2024-01-10T03:00:00.000Z", &brasilia).unwrap();

            assert_eq!(parsed, date(2024, 1, 10));
        }

        #[test]
        fn same_instant_reads_as_previous_day_further_west() {
            let honolulu = FixedOffset::west_opt(10 * 3600).unwrap();

            let parsed =
                due_date_from_text("2024-01-10T03:00:00.000Z", &honolulu).unwrap();

            assert_eq!(parsed, date(2024, 1, 9));
        }

        #[test]
        fn reads_bare_dates() {
            assert_eq!(
                due_date_from_text("2024-02-29", &Utc).unwrap(),
                date(2024, 2, 29)
            );
        }

        #[test]
        fn rejects_garbage() {
            assert!(due_date_from_text("next tuesday", &Utc).is_err());
        }
    }

    #[test]
    fn task_json_uses_camel_case_fields() {
        let task = Task::from_draft(
            "abc".to_string(),
            TaskDraft::new("Title", date(2024, 1, 10))
                .with_priority(Priority::High),
        );

        let value = serde_json::to_value(&task).unwrap();

        assert_eq!(value["id"], "abc");
        assert_eq!(value["priority"], "high");
        assert_eq!(value["completed"], false);
        assert!(value["dueDate"].is_string());
        assert!(value.get("due_date").is_none());
    }

    #[test]
    fn task_json_round_trips() {
        let mut task = Task::from_draft(
            "abc".to_string(),
            TaskDraft::new("Title", date(2024, 3, 31))
                .with_description("details")
                .with_priority(Priority::Low),
        );
        task.completed = true;

        let json = serde_json::to_string(&task).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(back, task);
    }
}
