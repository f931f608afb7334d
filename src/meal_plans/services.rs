use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::aggregator;
use super::dto::{CreateMealPlanRequest, MealPlanItemDetails};
use super::repo::{MealPlan, MealPlanItem, MealPlanRepo};
use crate::error::AppError;
use crate::recipes::RecipeStore;

/// Thin orchestration over the aggregator and the two ports. Ownership is
/// enforced on delete only; reads are open to any authenticated caller.
#[derive(Clone)]
pub struct MealPlanService {
    plans: Arc<dyn MealPlanRepo>,
    recipes: Arc<dyn RecipeStore>,
}

impl MealPlanService {
    pub fn new(plans: Arc<dyn MealPlanRepo>, recipes: Arc<dyn RecipeStore>) -> Self {
        Self { plans, recipes }
    }

    pub async fn create(
        &self,
        req: &CreateMealPlanRequest,
        owner_id: Uuid,
    ) -> Result<(MealPlan, Vec<MealPlanItem>), AppError> {
        aggregator::create_plan(self.plans.as_ref(), self.recipes.as_ref(), req, owner_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<MealPlan, AppError> {
        self.plans.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    pub async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<MealPlan>, AppError> {
        self.plans.find_by_owner(owner_id).await
    }

    /// Items with best-effort recipe enrichment: a recipe that cannot be
    /// resolved leaves the display fields empty instead of failing the call.
    pub async fn list_items(&self, id: Uuid) -> Result<Vec<MealPlanItemDetails>, AppError> {
        let items = self.plans.list_items(id).await?;

        let mut details = Vec::with_capacity(items.len());
        for item in items {
            let recipe = match self.recipes.get_recipe(item.recipe_id).await {
                Ok(recipe) => recipe,
                Err(e) => {
                    warn!(error = %e, recipe_id = %item.recipe_id, "recipe enrichment failed");
                    None
                }
            };
            details.push(MealPlanItemDetails::from_item(item, recipe));
        }
        Ok(details)
    }

    pub async fn delete(&self, id: Uuid, requesting_user: Uuid) -> Result<(), AppError> {
        let plan = self.plans.find_by_id(id).await?.ok_or(AppError::NotFound)?;
        if plan.user_id != requesting_user {
            return Err(AppError::Forbidden);
        }
        if !self.plans.delete(id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    pub async fn recompute(&self, id: Uuid) -> Result<(), AppError> {
        aggregator::recompute_totals(self.plans.as_ref(), self.recipes.as_ref(), id).await
    }
}
