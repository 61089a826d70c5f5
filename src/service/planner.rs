use crate::{
    config::AppConfig,
    domain::{
        clear_course, upcoming_tasks, Course, CourseId, Priority, StatusCounts, SubTaskId, Task,
        TaskFilter, TaskId, TaskStatus,
    },
    error::{Result, StudyFlowError},
    service::require_name,
    storage::{CollectionKey, Collections},
};
use chrono::NaiveDate;
use tracing::info;

/// Study planner tasks and courses
pub struct Planner {
    collections: Collections,
    upcoming_window_days: u32,
    upcoming_limit: usize,
}

impl Planner {
    pub fn new(collections: Collections, config: &AppConfig) -> Self {
        Self {
            collections,
            upcoming_window_days: config.upcoming_window_days,
            upcoming_limit: config.upcoming_limit,
        }
    }

    pub async fn tasks(&self) -> Result<Vec<Task>> {
        self.collections.read(CollectionKey::Tasks).await
    }

    pub async fn courses(&self) -> Result<Vec<Course>> {
        self.collections.read(CollectionKey::Courses).await
    }

    /// Loads tasks, applies `change` to the one with `id` and saves them back
    async fn modify_task<F>(&self, id: &TaskId, change: F) -> Result<Task>
    where
        F: FnOnce(&mut Task) -> Result<()>,
    {
        let mut tasks = self.tasks().await?;
        let task = tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StudyFlowError::TaskNotFound(id.to_string()))?;
        change(task)?;
        let updated = task.clone();
        self.collections.write(CollectionKey::Tasks, &tasks).await?;
        Ok(updated)
    }

    pub async fn add_task(&self, title: &str, priority: Priority) -> Result<Task> {
        let task = Task::new(require_name(title, "Task")?, priority);
        self.insert_task(task).await
    }

    /// Stores a fully built task
    pub async fn insert_task(&self, task: Task) -> Result<Task> {
        let mut tasks = self.tasks().await?;
        tasks.push(task.clone());
        self.collections.write(CollectionKey::Tasks, &tasks).await?;
        Ok(task)
    }

    /// Replaces a stored task, keeping its creation time
    pub async fn update_task(&self, updated: Task) -> Result<Task> {
        let id = updated.id.clone();
        self.modify_task(&id, move |task| {
            let created_at = task.created_at;
            *task = updated;
            task.created_at = created_at;
            Ok(())
        })
        .await
    }

    pub async fn delete_task(&self, id: &TaskId) -> Result<()> {
        let mut tasks = self.tasks().await?;
        let before = tasks.len();
        tasks.retain(|t| &t.id != id);
        if tasks.len() == before {
            return Err(StudyFlowError::TaskNotFound(id.to_string()));
        }
        self.collections.write(CollectionKey::Tasks, &tasks).await
    }

    pub async fn set_status(&self, id: &TaskId, status: TaskStatus) -> Result<Task> {
        self.modify_task(id, |task| {
            task.set_status(status);
            Ok(())
        })
        .await
    }

    pub async fn add_sub_task(&self, id: &TaskId, title: &str) -> Result<Task> {
        let title = require_name(title, "Sub-task")?;
        self.modify_task(id, |task| {
            task.add_sub_task(title);
            Ok(())
        })
        .await
    }

    pub async fn toggle_sub_task(&self, id: &TaskId, sub_task: &SubTaskId) -> Result<Task> {
        self.modify_task(id, |task| task.toggle_sub_task(sub_task)).await
    }

    pub async fn filtered_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let tasks = self.tasks().await?;
        Ok(filter.apply(&tasks).into_iter().cloned().collect())
    }

    /// Open tasks due soon, per the configured window and limit
    pub async fn upcoming(&self, today: NaiveDate) -> Result<Vec<Task>> {
        let tasks = self.tasks().await?;
        Ok(
            upcoming_tasks(&tasks, today, self.upcoming_window_days, self.upcoming_limit)
                .into_iter()
                .cloned()
                .collect(),
        )
    }

    pub async fn status_counts(&self) -> Result<StatusCounts> {
        let tasks = self.tasks().await?;
        Ok(StatusCounts::tally(&tasks))
    }

    pub async fn add_course(&self, name: &str) -> Result<Course> {
        let course = Course::new(require_name(name, "Course")?);
        let mut courses = self.courses().await?;
        courses.push(course.clone());
        self.collections.write(CollectionKey::Courses, &courses).await?;
        Ok(course)
    }

    /// Replaces a stored course's name and color, keeping its creation time
    pub async fn update_course(&self, updated: Course) -> Result<Course> {
        let name = require_name(&updated.name, "Course")?;
        let mut courses = self.courses().await?;
        let course = courses
            .iter_mut()
            .find(|c| c.id == updated.id)
            .ok_or_else(|| StudyFlowError::CourseNotFound(updated.id.to_string()))?;
        course.name = name;
        course.color = updated.color;
        let saved = course.clone();
        self.collections.write(CollectionKey::Courses, &courses).await?;
        Ok(saved)
    }

    /// Deletes a course; its tasks stay but lose the course reference
    pub async fn delete_course(&self, id: &CourseId) -> Result<usize> {
        let mut courses = self.courses().await?;
        let before = courses.len();
        courses.retain(|c| &c.id != id);
        if courses.len() == before {
            return Err(StudyFlowError::CourseNotFound(id.to_string()));
        }

        let mut tasks = self.tasks().await?;
        let detached = clear_course(&mut tasks, id);

        self.collections.write(CollectionKey::Courses, &courses).await?;
        self.collections.write(CollectionKey::Tasks, &tasks).await?;
        info!(course = %id, detached_tasks = detached, "Deleted course");
        Ok(detached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::test_utils::memory_collections;
    use chrono::{TimeZone, Utc};

    fn planner() -> Planner {
        let (collections, config) = memory_collections();
        Planner::new(collections, &config)
    }

    #[tokio::test]
    async fn test_task_lifecycle() {
        let planner = planner();
        let task = planner.add_task("Lab report", Priority::High).await.unwrap();

        let task = planner.add_sub_task(&task.id, "Collect data").await.unwrap();
        let sub_task = task.sub_tasks[0].id.clone();
        let task = planner.toggle_sub_task(&task.id, &sub_task).await.unwrap();
        assert!(task.sub_tasks[0].is_completed);

        let task = planner.set_status(&task.id, TaskStatus::InProgress).await.unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);

        let counts = planner.status_counts().await.unwrap();
        assert_eq!(counts.in_progress, 1);

        planner.delete_task(&task.id).await.unwrap();
        assert!(planner.tasks().await.unwrap().is_empty());
        assert!(matches!(
            planner.delete_task(&task.id).await,
            Err(StudyFlowError::TaskNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_toggle_missing_sub_task_is_not_saved() {
        let planner = planner();
        let task = planner.add_task("Essay", Priority::Low).await.unwrap();

        let result = planner
            .toggle_sub_task(&task.id, &SubTaskId::from("missing"))
            .await;
        assert!(matches!(result, Err(StudyFlowError::SubTaskNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let planner = planner();
        let task = planner.add_task("Essay", Priority::Low).await.unwrap();

        let mut edited = task.clone();
        edited.title = "Essay draft".to_string();
        edited.created_at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let saved = planner.update_task(edited).await.unwrap();

        assert_eq!(saved.title, "Essay draft");
        assert_eq!(saved.created_at, task.created_at);
    }

    #[tokio::test]
    async fn test_delete_course_detaches_tasks() {
        let planner = planner();
        let course = planner.add_course("Biology").await.unwrap();
        let task = Task::new("Cells".to_string(), Priority::Medium).with_course(course.id.clone());
        planner.insert_task(task).await.unwrap();

        let filter = TaskFilter {
            course_id: Some(course.id.clone()),
            search: String::new(),
        };
        assert_eq!(planner.filtered_tasks(&filter).await.unwrap().len(), 1);

        assert_eq!(planner.delete_course(&course.id).await.unwrap(), 1);
        assert!(planner.courses().await.unwrap().is_empty());
        assert_eq!(planner.tasks().await.unwrap().len(), 1);
        assert!(planner.filtered_tasks(&filter).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_course_renames_and_keeps_created_at() {
        let planner = planner();
        let course = planner.add_course("Biology").await.unwrap();
        planner.add_course("Chemistry").await.unwrap();

        let mut edited = course.clone();
        edited.name = "Molecular Biology".to_string();
        edited.color = Some("#22c55e".to_string());
        edited.created_at = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let saved = planner.update_course(edited).await.unwrap();
        assert_eq!(saved.name, "Molecular Biology");
        assert_eq!(saved.created_at, course.created_at);

        let courses = planner.courses().await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].id, course.id);
        assert_eq!(courses[0].name, "Molecular Biology");
        assert_eq!(courses[0].color.as_deref(), Some("#22c55e"));
        assert_eq!(courses[0].created_at, course.created_at);
        assert_eq!(courses[1].name, "Chemistry");
    }

    #[tokio::test]
    async fn test_update_course_errors() {
        let planner = planner();
        assert!(matches!(
            planner.update_course(Course::new("Ghost".to_string())).await,
            Err(StudyFlowError::CourseNotFound(_))
        ));

        let course = planner.add_course("Physics").await.unwrap();
        let mut blank = course.clone();
        blank.name = "  ".to_string();
        assert!(matches!(
            planner.update_course(blank).await,
            Err(StudyFlowError::InvalidInput(_))
        ));
        assert_eq!(planner.courses().await.unwrap()[0].name, "Physics");
    }

    #[tokio::test]
    async fn test_upcoming_uses_config() {
        let planner = planner();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        for day in 1..=9 {
            let due = Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap();
            planner
                .insert_task(Task::new(format!("Due {}", day), Priority::Low).with_due_date(due))
                .await
                .unwrap();
        }

        let upcoming = planner.upcoming(today).await.unwrap();
        assert_eq!(upcoming.len(), 5);
        assert_eq!(upcoming[0].title, "Due 1");
        assert_eq!(upcoming[4].title, "Due 5");
    }
}
