use std::collections::BTreeSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::auth::{AuthError, AuthService, RegisterRequest};
use crate::models::*;
use crate::repositories::RecordRepository;

pub const DEMO_USER: &str = "user1";

/// Loads the demo accounts and their sample workout/goal.
pub struct DemoSeeder {
    auth_service: AuthService,
    workouts: Arc<dyn RecordRepository<WorkoutRecord>>,
    goals: Arc<dyn RecordRepository<GoalRecord>>,
}

impl DemoSeeder {
    pub fn new(
        auth_service: AuthService,
        workouts: Arc<dyn RecordRepository<WorkoutRecord>>,
        goals: Arc<dyn RecordRepository<GoalRecord>>,
    ) -> Self {
        Self {
            auth_service,
            workouts,
            goals,
        }
    }

    pub async fn seed_all(&self) -> Result<()> {
        tracing::info!("Starting demo data seeding...");

        self.seed_users().await?;
        self.seed_workouts()?;
        self.seed_goals()?;

        tracing::info!("Demo data seeding completed!");
        Ok(())
    }

    async fn seed_users(&self) -> Result<()> {
        let demo_users = vec![
            RegisterRequest {
                username: DEMO_USER.to_string(),
                email: "user1@example.com".to_string(),
                password: "password123".to_string(),
                profile: UserProfile {
                    age: 30,
                    gender: Gender::Male,
                    height_cm: 175.0,
                    weight_kg: 70.0,
                    fitness_level: FitnessLevel::Intermediate,
                    goals: BTreeSet::from([GoalTag::WeightLoss, GoalTag::MuscleGain]),
                },
            },
            RegisterRequest {
                username: "user2".to_string(),
                email: "user2@example.com".to_string(),
                password: "password456".to_string(),
                profile: UserProfile {
                    age: 25,
                    gender: Gender::Female,
                    height_cm: 165.0,
                    weight_kg: 55.0,
                    fitness_level: FitnessLevel::Beginner,
                    goals: BTreeSet::from([GoalTag::WeightLoss, GoalTag::Flexibility]),
                },
            },
        ];

        for request in demo_users {
            let username = request.username.clone();
            match self.auth_service.register(request).await {
                Ok(_) => tracing::info!(username = %username, "Created demo user"),
                Err(AuthError::UsernameAlreadyExists) | Err(AuthError::EmailAlreadyExists) => {}
                Err(err) => {
                    return Err(err).with_context(|| format!("failed to seed demo user {username}"))
                }
            }
        }

        Ok(())
    }

    fn seed_workouts(&self) -> Result<()> {
        if !self.workouts.list(DEMO_USER)?.is_empty() {
            return Ok(());
        }

        let workout = WorkoutRecord {
            id: 0,
            workout_type: "strength".to_string(),
            duration_minutes: 60.0,
            calories_burned: 300.0,
            exercises: vec!["深蹲".to_string(), "卧推".to_string()],
            notes: "感觉很好".to_string(),
            date: demo_timestamp(2024, 1, 15)?,
        };

        self.workouts.append(DEMO_USER, workout)?;
        tracing::info!("Created demo workout");
        Ok(())
    }

    fn seed_goals(&self) -> Result<()> {
        if !self.goals.list(DEMO_USER)?.is_empty() {
            return Ok(());
        }

        let goal = GoalRecord {
            id: 0,
            goal_type: "weight_loss".to_string(),
            target: 5.0,
            current: 2.5,
            unit: "kg".to_string(),
            deadline: NaiveDate::from_ymd_opt(2024, 3, 1),
            status: GoalStatus::Active,
            created_at: demo_timestamp(2024, 1, 1)?,
        };

        self.goals.append(DEMO_USER, goal)?;
        tracing::info!("Created demo goal");
        Ok(())
    }
}

fn demo_timestamp(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .map(|naive| naive.and_utc())
        .context("invalid demo timestamp")
}
