//! Read-only interface to the recipe service. The meal-plan core never owns
//! recipe data; it looks up nutrition facts for aggregation and title/image
//! for item enrichment, tolerating missing targets at every call site.

mod store;

pub use store::PgRecipeStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Per-recipe nutrition facts. Any field may be absent; an absent record and
/// an all-null record contribute the same (nothing) to plan totals.
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow)]
pub struct RecipeNutrition {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbohydrates: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sodium: Option<f64>,
}

/// Display data attached to plan items for read convenience.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeSummary {
    pub title: String,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn get_nutrition(&self, recipe_id: Uuid) -> anyhow::Result<Option<RecipeNutrition>>;
    async fn get_recipe(&self, recipe_id: Uuid) -> anyhow::Result<Option<RecipeSummary>>;
}
