use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RecipeNutrition, RecipeStore, RecipeSummary};

/// Recipe lookup backed by the tables the recipe service maintains.
#[derive(Clone)]
pub struct PgRecipeStore {
    db: PgPool,
}

impl PgRecipeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn get_nutrition(&self, recipe_id: Uuid) -> anyhow::Result<Option<RecipeNutrition>> {
        let nutrition = sqlx::query_as::<_, RecipeNutrition>(
            r#"
            SELECT calories, protein, carbohydrates, fat, fiber, sugar, sodium
            FROM recipe_nutrition
            WHERE recipe_id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(nutrition)
    }

    async fn get_recipe(&self, recipe_id: Uuid) -> anyhow::Result<Option<RecipeSummary>> {
        let recipe = sqlx::query_as::<_, RecipeSummary>(
            r#"
            SELECT title, image_url
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(recipe_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(recipe)
    }
}
