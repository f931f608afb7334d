use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo::{DayOfWeek, MealPlan, MealPlanItem, MealType};
use crate::recipes::RecipeSummary;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMealPlanRequest {
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub meals: Vec<MealItemSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MealItemSpec {
    pub recipe_id: Uuid,
    pub meal_type: MealType,
    pub day_of_week: DayOfWeek,
    pub date: Date,
}

#[derive(Debug, Serialize)]
pub struct CreatedMealPlanResponse {
    pub message: String,
    pub meal_plan: MealPlan,
    pub items: Vec<MealPlanItem>,
}

#[derive(Debug, Serialize)]
pub struct MealPlanResponse {
    pub meal_plan: MealPlan,
}

#[derive(Debug, Serialize)]
pub struct MealPlanListResponse {
    pub meal_plans: Vec<MealPlan>,
}

/// Plan item plus whatever display data the recipe lookup could provide.
#[derive(Debug, Serialize)]
pub struct MealPlanItemDetails {
    pub id: Uuid,
    pub meal_plan_id: Uuid,
    pub recipe_id: Uuid,
    pub meal_type: MealType,
    pub day_of_week: DayOfWeek,
    pub date: Date,
    pub created_at: OffsetDateTime,
    pub recipe_title: Option<String>,
    pub recipe_image: Option<String>,
}

impl MealPlanItemDetails {
    pub fn from_item(item: MealPlanItem, recipe: Option<RecipeSummary>) -> Self {
        let (recipe_title, recipe_image) = match recipe {
            Some(r) => (Some(r.title), r.image_url),
            None => (None, None),
        };
        Self {
            id: item.id,
            meal_plan_id: item.meal_plan_id,
            recipe_id: item.recipe_id,
            meal_type: item.meal_type,
            day_of_week: item.day_of_week,
            date: item.date,
            created_at: item.created_at,
            recipe_title,
            recipe_image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealPlanItemsResponse {
    pub items: Vec<MealPlanItemDetails>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
