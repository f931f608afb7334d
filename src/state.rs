use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::meal_plans::repo::{MealPlanRepo, PgMealPlanRepo};
use crate::meal_plans::services::MealPlanService;
use crate::recipes::{PgRecipeStore, RecipeStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub meal_plans: MealPlanService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let plans = Arc::new(PgMealPlanRepo::new(db.clone())) as Arc<dyn MealPlanRepo>;
        let recipes = Arc::new(PgRecipeStore::new(db.clone())) as Arc<dyn RecipeStore>;

        Ok(Self::from_parts(db, config, plans, recipes))
    }

    pub fn from_parts(
        db: PgPool,
        config: Arc<AppConfig>,
        plans: Arc<dyn MealPlanRepo>,
        recipes: Arc<dyn RecipeStore>,
    ) -> Self {
        Self {
            db,
            config,
            meal_plans: MealPlanService::new(plans, recipes),
        }
    }
}
