//! In-memory fakes for the persistence and recipe ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::CreateMealPlanRequest;
use super::repo::{MealPlan, MealPlanItem, MealPlanRepo, NutritionTotals};
use crate::error::AppError;
use crate::recipes::{RecipeNutrition, RecipeStore, RecipeSummary};

#[derive(Default)]
pub struct InMemoryMealPlanRepo {
    inner: Mutex<Inner>,
    fail_next_create: AtomicBool,
}

#[derive(Default)]
struct Inner {
    plans: HashMap<Uuid, MealPlan>,
    items: HashMap<Uuid, Vec<MealPlanItem>>,
}

impl InMemoryMealPlanRepo {
    /// Makes the next `create` fail before anything is written, standing in
    /// for a transaction rollback.
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl MealPlanRepo for InMemoryMealPlanRepo {
    async fn create(
        &self,
        owner_id: Uuid,
        req: &CreateMealPlanRequest,
    ) -> Result<Uuid, AppError> {
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }

        let now = OffsetDateTime::now_utc();
        let plan_id = Uuid::new_v4();
        let plan = MealPlan {
            id: plan_id,
            user_id: owner_id,
            name: req.name.trim().to_string(),
            start_date: req.start_date,
            end_date: req.end_date,
            total_calories: 0.0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            created_at: now,
            updated_at: now,
        };
        let items = req
            .meals
            .iter()
            .map(|meal| MealPlanItem {
                id: Uuid::new_v4(),
                meal_plan_id: plan_id,
                recipe_id: meal.recipe_id,
                meal_type: meal.meal_type,
                day_of_week: meal.day_of_week,
                date: meal.date,
                created_at: now,
            })
            .collect();

        let mut inner = self.inner.lock().unwrap();
        inner.plans.insert(plan_id, plan);
        inner.items.insert(plan_id, items);
        Ok(plan_id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MealPlan>, AppError> {
        Ok(self.inner.lock().unwrap().plans.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<MealPlan>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut plans: Vec<MealPlan> = inner
            .plans
            .values()
            .filter(|p| p.user_id == owner_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        Ok(plans)
    }

    async fn list_items(&self, plan_id: Uuid) -> Result<Vec<MealPlanItem>, AppError> {
        let inner = self.inner.lock().unwrap();
        let mut items = inner.items.get(&plan_id).cloned().unwrap_or_default();
        items.sort_by_key(|i| (i.date, i.meal_type));
        Ok(items)
    }

    async fn update_totals(
        &self,
        plan_id: Uuid,
        totals: NutritionTotals,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(plan) = inner.plans.get_mut(&plan_id) else {
            return Ok(false);
        };
        plan.total_calories = totals.calories;
        plan.total_protein = totals.protein;
        plan.total_carbs = totals.carbs;
        plan.total_fat = totals.fat;
        plan.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let existed = inner.plans.remove(&id).is_some();
        inner.items.remove(&id);
        Ok(existed)
    }
}

#[derive(Default)]
pub struct FakeRecipeStore {
    nutrition: Mutex<HashMap<Uuid, RecipeNutrition>>,
    recipes: Mutex<HashMap<Uuid, RecipeSummary>>,
}

impl FakeRecipeStore {
    pub fn add_nutrition(&self, nutrition: RecipeNutrition) -> Uuid {
        let id = Uuid::new_v4();
        self.nutrition.lock().unwrap().insert(id, nutrition);
        id
    }

    pub fn add_recipe(&self, id: Uuid, recipe: RecipeSummary) {
        self.recipes.lock().unwrap().insert(id, recipe);
    }
}

#[async_trait]
impl RecipeStore for FakeRecipeStore {
    async fn get_nutrition(&self, recipe_id: Uuid) -> anyhow::Result<Option<RecipeNutrition>> {
        Ok(self.nutrition.lock().unwrap().get(&recipe_id).cloned())
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> anyhow::Result<Option<RecipeSummary>> {
        Ok(self.recipes.lock().unwrap().get(&recipe_id).cloned())
    }
}
