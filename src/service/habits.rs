use crate::{
    config::AppConfig,
    domain::{
        compute_streak, completion_series, log_for, upsert_log, DailyValue, Habit, HabitId,
        HabitLogEntry, LogValue, Streak, TrackingType,
    },
    error::{Result, StudyFlowError},
    service::require_name,
    storage::{CollectionKey, Collections},
};
use chrono::NaiveDate;
use tracing::info;

/// Habit definitions, their daily logs and derived streaks
pub struct HabitTracker {
    collections: Collections,
    history_days: u32,
}

impl HabitTracker {
    pub fn new(collections: Collections, config: &AppConfig) -> Self {
        Self {
            collections,
            history_days: config.history_days,
        }
    }

    pub async fn habits(&self) -> Result<Vec<Habit>> {
        self.collections.read(CollectionKey::Habits).await
    }

    pub async fn logs(&self) -> Result<Vec<HabitLogEntry>> {
        self.collections.read(CollectionKey::HabitLogs).await
    }

    async fn find_habit(&self, id: &HabitId) -> Result<Habit> {
        self.habits()
            .await?
            .into_iter()
            .find(|h| &h.id == id)
            .ok_or_else(|| StudyFlowError::HabitNotFound(id.to_string()))
    }

    pub async fn add_habit(&self, name: &str, tracking_type: TrackingType) -> Result<Habit> {
        let habit = Habit::new(require_name(name, "Habit")?, tracking_type);
        let mut habits = self.habits().await?;
        habits.push(habit.clone());
        self.collections.write(CollectionKey::Habits, &habits).await?;
        Ok(habit)
    }

    /// Replaces a stored habit with the given definition
    pub async fn update_habit(&self, updated: Habit) -> Result<()> {
        let mut habits = self.habits().await?;
        let slot = habits
            .iter_mut()
            .find(|h| h.id == updated.id)
            .ok_or_else(|| StudyFlowError::HabitNotFound(updated.id.to_string()))?;
        *slot = updated;
        self.collections.write(CollectionKey::Habits, &habits).await
    }

    /// Deletes a habit and all of its log entries, returning how many logs went with it
    pub async fn delete_habit(&self, id: &HabitId) -> Result<usize> {
        let mut habits = self.habits().await?;
        let before = habits.len();
        habits.retain(|h| &h.id != id);
        if habits.len() == before {
            return Err(StudyFlowError::HabitNotFound(id.to_string()));
        }

        let mut logs = self.logs().await?;
        let log_count = logs.len();
        logs.retain(|log| &log.habit_id != id);
        let removed = log_count - logs.len();

        self.collections.write(CollectionKey::Habits, &habits).await?;
        self.collections.write(CollectionKey::HabitLogs, &logs).await?;
        info!(habit = %id, removed_logs = removed, "Deleted habit");
        Ok(removed)
    }

    /// Records the habit's value for `date`, replacing that day's entry if present
    pub async fn log_habit(
        &self,
        id: &HabitId,
        date: NaiveDate,
        value: LogValue,
        notes: Option<String>,
    ) -> Result<HabitLogEntry> {
        let habit = self.find_habit(id).await?;
        let mut logs = self.logs().await?;
        let entry = upsert_log(&mut logs, &habit, date, value, notes).clone();
        self.collections.write(CollectionKey::HabitLogs, &logs).await?;
        Ok(entry)
    }

    pub async fn log_on(&self, id: &HabitId, date: NaiveDate) -> Result<Option<HabitLogEntry>> {
        let logs = self.logs().await?;
        Ok(log_for(&logs, id, date).cloned())
    }

    pub async fn streak(&self, id: &HabitId, as_of: NaiveDate) -> Result<Streak> {
        let habit = self.find_habit(id).await?;
        let logs = self.logs().await?;
        Ok(compute_streak(&habit.id, &logs, as_of))
    }

    /// Streaks of every habit, in habit order
    pub async fn streaks(&self, as_of: NaiveDate) -> Result<Vec<(Habit, Streak)>> {
        let habits = self.habits().await?;
        let logs = self.logs().await?;
        Ok(habits
            .into_iter()
            .map(|habit| {
                let streak = compute_streak(&habit.id, &logs, as_of);
                (habit, streak)
            })
            .collect())
    }

    /// Daily values over the configured history window ending at `as_of`
    pub async fn history(&self, id: &HabitId, as_of: NaiveDate) -> Result<Vec<DailyValue>> {
        let habit = self.find_habit(id).await?;
        let logs = self.logs().await?;
        Ok(completion_series(&habit, &logs, as_of, self.history_days))
    }
}
