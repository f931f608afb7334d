use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::dto::CreateMealPlanRequest;
use crate::error::AppError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "meal_type", rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "day_of_week", rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Plan header. The four totals are a derived projection of the item set and
/// are only ever written by the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A single (day, meal-type, date, recipe) assignment within a plan.
/// `recipe_id` is a weak reference: the recipe may lack nutrition data or be
/// gone entirely, and every read site must tolerate that.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlanItem {
    pub id: Uuid,
    pub meal_plan_id: Uuid,
    pub recipe_id: Uuid,
    pub meal_type: MealType,
    pub day_of_week: DayOfWeek,
    pub date: Date,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// Persistence port for meal plans. The Postgres implementation is the real
/// thing; tests substitute an in-memory fake.
#[async_trait]
pub trait MealPlanRepo: Send + Sync {
    /// Inserts the plan header and all items as one atomic unit. A failure on
    /// any item insert rolls back the whole creation.
    async fn create(&self, owner_id: Uuid, req: &CreateMealPlanRequest)
        -> Result<Uuid, AppError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MealPlan>, AppError>;

    /// All plans for a user, newest start date first.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<MealPlan>, AppError>;

    /// Items for a plan, ordered by date then meal type.
    async fn list_items(&self, plan_id: Uuid) -> Result<Vec<MealPlanItem>, AppError>;

    /// Writes the derived totals and advances `updated_at`. Returns false when
    /// no plan with that id exists.
    async fn update_totals(&self, plan_id: Uuid, totals: NutritionTotals)
        -> Result<bool, AppError>;

    /// Hard delete; items go with the plan. Returns false when nothing matched.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgMealPlanRepo {
    db: PgPool,
}

impl PgMealPlanRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MealPlanRepo for PgMealPlanRepo {
    async fn create(
        &self,
        owner_id: Uuid,
        req: &CreateMealPlanRequest,
    ) -> Result<Uuid, AppError> {
        let mut tx = self.db.begin().await?;

        let plan_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO meal_plans (id, user_id, name, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(plan_id)
        .bind(owner_id)
        .bind(req.name.trim())
        .bind(req.start_date)
        .bind(req.end_date)
        .execute(&mut *tx)
        .await?;

        for meal in &req.meals {
            sqlx::query(
                r#"
                INSERT INTO meal_plan_items (id, meal_plan_id, recipe_id, meal_type, day_of_week, date)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(plan_id)
            .bind(meal.recipe_id)
            .bind(meal.meal_type)
            .bind(meal.day_of_week)
            .bind(meal.date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(plan_id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MealPlan>, AppError> {
        let plan = sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, user_id, name, start_date, end_date,
                   total_calories, total_protein, total_carbs, total_fat,
                   created_at, updated_at
            FROM meal_plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(plan)
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<MealPlan>, AppError> {
        let plans = sqlx::query_as::<_, MealPlan>(
            r#"
            SELECT id, user_id, name, start_date, end_date,
                   total_calories, total_protein, total_carbs, total_fat,
                   created_at, updated_at
            FROM meal_plans
            WHERE user_id = $1
            ORDER BY start_date DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;
        Ok(plans)
    }

    async fn list_items(&self, plan_id: Uuid) -> Result<Vec<MealPlanItem>, AppError> {
        let items = sqlx::query_as::<_, MealPlanItem>(
            r#"
            SELECT id, meal_plan_id, recipe_id, meal_type, day_of_week, date, created_at
            FROM meal_plan_items
            WHERE meal_plan_id = $1
            ORDER BY date, meal_type
            "#,
        )
        .bind(plan_id)
        .fetch_all(&self.db)
        .await?;
        Ok(items)
    }

    async fn update_totals(
        &self,
        plan_id: Uuid,
        totals: NutritionTotals,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE meal_plans
            SET total_calories = $2, total_protein = $3, total_carbs = $4, total_fat = $5,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(plan_id)
        .bind(totals.calories)
        .bind(totals.protein)
        .bind(totals.carbs)
        .bind(totals.fat)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        // meal_plan_items has ON DELETE CASCADE on meal_plan_id
        let result = sqlx::query("DELETE FROM meal_plans WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
