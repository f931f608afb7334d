//! Builds plans and keeps their cached nutrition totals consistent with the
//! item set. Totals are a pure function of current items; they are recomputed,
//! never accepted from clients.

use uuid::Uuid;

use super::dto::CreateMealPlanRequest;
use super::repo::{MealPlan, MealPlanItem, MealPlanRepo, NutritionTotals};
use crate::error::AppError;
use crate::recipes::RecipeStore;

/// Shape check for a creation request. Pure; no cross-item validation is done
/// (duplicate slots are allowed, and item dates are not checked against the
/// plan range — matching what the product currently accepts).
pub fn validate_creation(req: &CreateMealPlanRequest) -> Result<(), AppError> {
    let name_len = req.name.trim().chars().count();
    if !(3..=255).contains(&name_len) {
        return Err(AppError::validation("name must be between 3 and 255 characters"));
    }
    if req.meals.is_empty() {
        return Err(AppError::validation("at least one meal required"));
    }
    if req.start_date > req.end_date {
        return Err(AppError::validation("start_date must be on or before end_date"));
    }
    Ok(())
}

/// Re-derives the four plan totals from the current item set and writes them
/// back. A recipe with no nutrition record, or a record with null fields,
/// contributes zero. Idempotent for an unchanged item set.
pub async fn recompute_totals(
    plans: &dyn MealPlanRepo,
    recipes: &dyn RecipeStore,
    plan_id: Uuid,
) -> Result<(), AppError> {
    let items = plans.list_items(plan_id).await?;

    let mut totals = NutritionTotals::default();
    for item in &items {
        let Some(nutrition) = recipes.get_nutrition(item.recipe_id).await? else {
            continue;
        };
        totals.calories += nutrition.calories.unwrap_or(0.0);
        totals.protein += nutrition.protein.unwrap_or(0.0);
        totals.carbs += nutrition.carbohydrates.unwrap_or(0.0);
        totals.fat += nutrition.fat.unwrap_or(0.0);
    }

    if !plans.update_totals(plan_id, totals).await? {
        return Err(AppError::NotFound);
    }
    Ok(())
}

/// Validates and persists a new plan (header + items in one transaction),
/// then recomputes totals so the plan is returned with correct aggregates.
pub async fn create_plan(
    plans: &dyn MealPlanRepo,
    recipes: &dyn RecipeStore,
    req: &CreateMealPlanRequest,
    owner_id: Uuid,
) -> Result<(MealPlan, Vec<MealPlanItem>), AppError> {
    validate_creation(req)?;

    let plan_id = plans.create(owner_id, req).await?;
    recompute_totals(plans, recipes, plan_id).await?;

    let plan = plans.find_by_id(plan_id).await?.ok_or(AppError::NotFound)?;
    let items = plans.list_items(plan_id).await?;
    Ok((plan, items))
}
