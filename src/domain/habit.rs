use crate::domain::id::{HabitId, LogEntryId};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// How often a habit is expected to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

/// How a habit's daily observation is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingType {
    /// Yes/no completion
    Boolean,
    /// Numeric amount (hours, pages, ...)
    Quantity,
}

impl fmt::Display for TrackingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "Yes/No"),
            Self::Quantity => write!(f, "Quantity"),
        }
    }
}

/// A habit the user tracks day by day
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub frequency: HabitFrequency,
    pub tracking_type: TrackingType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Creates a daily habit with the given tracking type
    pub fn new(name: String, tracking_type: TrackingType) -> Self {
        Self {
            id: HabitId::generate(),
            name,
            frequency: HabitFrequency::Daily,
            tracking_type,
            goal: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_frequency(mut self, frequency: HabitFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets a goal; only quantity habits keep one
    pub fn with_goal(mut self, goal: f64) -> Self {
        self.set_goal(Some(goal));
        self
    }

    pub fn set_goal(&mut self, goal: Option<f64>) {
        self.goal = match self.tracking_type {
            TrackingType::Quantity => goal.filter(|g| g.is_finite() && *g > 0.0),
            TrackingType::Boolean => None,
        };
    }

    /// Changes the tracking type, dropping the goal when switching to boolean
    pub fn set_tracking_type(&mut self, tracking_type: TrackingType) {
        self.tracking_type = tracking_type;
        if tracking_type == TrackingType::Boolean {
            self.goal = None;
        }
    }
}

/// One day's observation for a habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitLogEntry {
    pub id: LogEntryId,
    pub habit_id: HabitId,
    /// Calendar day of the observation; `None` when the stored value was unreadable
    #[serde(default, deserialize_with = "deserialize_calendar_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HabitLogEntry {
    pub fn new(habit_id: HabitId, date: NaiveDate) -> Self {
        Self {
            id: LogEntryId::generate(),
            habit_id,
            date: Some(date),
            completed: None,
            quantity: None,
            notes: None,
        }
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Whether this entry counts toward a streak
    pub fn is_hit(&self) -> bool {
        self.completed == Some(true) || self.quantity.map_or(false, |q| q > 0.0)
    }
}

/// Parses a stored calendar day, dropping any time-of-day component.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Timestamps keep the calendar day as written, not shifted to UTC.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(|value| value.as_str())
        .and_then(parse_calendar_date))
}

/// Value recorded when logging a habit for a day
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogValue {
    Completed(bool),
    Quantity(Option<f64>),
}

/// Records a habit observation for `date`, updating the existing entry for
/// that day if there is one.
///
/// Boolean habits store `completed` (a quantity value counts as not done);
/// quantity habits store `quantity` (NaN or a boolean value is stored as
/// absent). The notes always replace whatever was there.
pub fn upsert_log<'a>(
    logs: &'a mut Vec<HabitLogEntry>,
    habit: &Habit,
    date: NaiveDate,
    value: LogValue,
    notes: Option<String>,
) -> &'a HabitLogEntry {
    let index = match logs
        .iter()
        .position(|log| log.habit_id == habit.id && log.date == Some(date))
    {
        Some(index) => index,
        None => {
            logs.push(HabitLogEntry::new(habit.id.clone(), date));
            logs.len() - 1
        }
    };

    let entry = &mut logs[index];
    match habit.tracking_type {
        TrackingType::Boolean => {
            entry.completed = Some(matches!(value, LogValue::Completed(true)));
        }
        TrackingType::Quantity => {
            entry.quantity = match value {
                LogValue::Quantity(q) => q.filter(|q| !q.is_nan()),
                LogValue::Completed(_) => None,
            };
        }
    }
    entry.notes = notes;
    &logs[index]
}

/// Finds the log entry for a habit on a given day
pub fn log_for<'a>(
    logs: &'a [HabitLogEntry],
    habit_id: &HabitId,
    date: NaiveDate,
) -> Option<&'a HabitLogEntry> {
    logs.iter()
        .find(|log| &log.habit_id == habit_id && log.date == Some(date))
}

/// A habit's recorded value on one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

/// Per-day values for the `days` days ending at `as_of`, oldest first.
///
/// Boolean habits report 1.0 for a completed day and 0.0 otherwise;
/// quantity habits report the logged quantity or 0.0. Days before the
/// earliest representable date are left out.
pub fn completion_series(
    habit: &Habit,
    logs: &[HabitLogEntry],
    as_of: NaiveDate,
    days: u32,
) -> Vec<DailyValue> {
    (0..i64::from(days))
        .rev()
        .filter_map(|offset| as_of.checked_sub_signed(Duration::days(offset)))
        .map(|date| {
            let log = log_for(logs, &habit.id, date);
            let value = match habit.tracking_type {
                TrackingType::Boolean => {
                    if log.and_then(|l| l.completed).unwrap_or(false) {
                        1.0
                    } else {
                        0.0
                    }
                }
                TrackingType::Quantity => log.and_then(|l| l.quantity).unwrap_or(0.0),
            };
            DailyValue { date, value }
        })
        .collect()
}
