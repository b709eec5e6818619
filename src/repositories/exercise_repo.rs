use chrono::{DateTime, Utc};
use rusqlite::ToSql;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Exercise, FromSqliteRow, LogFilter};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert an exercise for `user_id`. The caller is responsible for
    /// checking that the user exists.
    pub async fn create(
        &self,
        user_id: &str,
        description: &str,
        duration: f64,
        date: DateTime<Utc>,
    ) -> Result<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            description: description.to_string(),
            duration,
            date,
        };
        let exercise_clone = exercise.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, user_id, description, duration, date)
                 VALUES (?, ?, ?, ?, ?)",
                rusqlite::params![
                    exercise_clone.id,
                    exercise_clone.user_id,
                    exercise_clone.description,
                    exercise_clone.duration,
                    exercise_clone.date
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(exercise)
    }

    /// A user's exercises matching `filter`, in insertion order. The limit is
    /// applied after ordering, so the earliest entries are kept.
    pub async fn find_log(&self, user_id: &str, filter: &LogFilter) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        let filter = filter.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;

            let mut query = String::from(
                "SELECT id, user_id, description, duration, date FROM exercises WHERE user_id = ?",
            );
            let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(user_id)];

            if let Some(from) = filter.from {
                query.push_str(" AND date >= ?");
                params.push(Box::new(from));
            }
            if let Some(to) = filter.to {
                query.push_str(" AND date <= ?");
                params.push(Box::new(to));
            }

            query.push_str(" ORDER BY rowid");

            if let Some(limit) = filter.limit {
                query.push_str(" LIMIT ?");
                params.push(Box::new(limit));
            }

            let mut stmt = conn.prepare(&query)?;
            let exercises = stmt
                .query_map(
                    rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())),
                    Exercise::from_row,
                )?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    #[allow(dead_code)] // Used by integration tests
    pub async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM exercises WHERE user_id = ?",
                [&user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;
    use chrono::TimeZone;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, d, 0, 0, 0).unwrap()
    }

    async fn seed(repo: &ExerciseRepository, user_id: &str) {
        repo.create(user_id, "run", 30.0, day(10)).await.unwrap();
        repo.create(user_id, "swim", 45.0, day(15)).await.unwrap();
        repo.create(user_id, "bike", 60.0, day(20)).await.unwrap();
        repo.create(user_id, "walk", 15.0, day(5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_exercise() {
        let repo = ExerciseRepository::new(setup_test_db());

        let exercise = repo.create("user1", "run", 30.0, day(15)).await.unwrap();

        assert_eq!(exercise.user_id, "user1");
        assert_eq!(exercise.description, "run");
        assert_eq!(exercise.duration, 30.0);
        assert_eq!(exercise.date, day(15));
        assert!(!exercise.id.is_empty());
    }

    #[tokio::test]
    async fn test_find_log_roundtrips_fields() {
        let repo = ExerciseRepository::new(setup_test_db());
        let date = Utc.with_ymd_and_hms(2023, 1, 15, 13, 45, 12).unwrap();

        let created = repo.create("user1", "yoga", 22.5, date).await.unwrap();
        let log = repo.find_log("user1", &LogFilter::default()).await.unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].id, created.id);
        assert_eq!(log[0].description, "yoga");
        assert_eq!(log[0].duration, 22.5);
        assert_eq!(log[0].date, date);
    }

    #[tokio::test]
    async fn test_find_log_insertion_order() {
        let repo = ExerciseRepository::new(setup_test_db());
        seed(&repo, "user1").await;

        let log = repo.find_log("user1", &LogFilter::default()).await.unwrap();
        let names: Vec<_> = log.iter().map(|e| e.description.as_str()).collect();

        assert_eq!(names, vec!["run", "swim", "bike", "walk"]);
    }

    #[tokio::test]
    async fn test_find_log_only_own_exercises() {
        let repo = ExerciseRepository::new(setup_test_db());
        seed(&repo, "user1").await;
        repo.create("user2", "row", 10.0, day(15)).await.unwrap();

        let log = repo.find_log("user2", &LogFilter::default()).await.unwrap();

        assert_eq!(log.len(), 1);
        assert_eq!(log[0].description, "row");
    }

    #[tokio::test]
    async fn test_find_log_inclusive_range() {
        let repo = ExerciseRepository::new(setup_test_db());
        seed(&repo, "user1").await;

        let filter = LogFilter {
            from: Some(day(10)),
            to: Some(day(15)),
            limit: None,
        };
        let log = repo.find_log("user1", &filter).await.unwrap();
        let names: Vec<_> = log.iter().map(|e| e.description.as_str()).collect();

        assert_eq!(names, vec!["run", "swim"]);
    }

    #[tokio::test]
    async fn test_find_log_open_ended_ranges() {
        let repo = ExerciseRepository::new(setup_test_db());
        seed(&repo, "user1").await;

        let from_only = LogFilter {
            from: Some(day(15)),
            ..Default::default()
        };
        let to_only = LogFilter {
            to: Some(day(9)),
            ..Default::default()
        };

        assert_eq!(repo.find_log("user1", &from_only).await.unwrap().len(), 2);
        assert_eq!(repo.find_log("user1", &to_only).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_log_limit_keeps_earliest_inserted() {
        let repo = ExerciseRepository::new(setup_test_db());
        seed(&repo, "user1").await;

        let filter = LogFilter {
            limit: Some(2),
            ..Default::default()
        };
        let log = repo.find_log("user1", &filter).await.unwrap();
        let names: Vec<_> = log.iter().map(|e| e.description.as_str()).collect();

        assert_eq!(names, vec!["run", "swim"]);
    }

    #[tokio::test]
    async fn test_count_by_user() {
        let repo = ExerciseRepository::new(setup_test_db());
        seed(&repo, "user1").await;

        assert_eq!(repo.count_by_user("user1").await.unwrap(), 4);
        assert_eq!(repo.count_by_user("user2").await.unwrap(), 0);
    }
}
