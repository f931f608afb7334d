use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{
    CreateMealPlanRequest, CreatedMealPlanResponse, MealPlanItemsResponse, MealPlanListResponse,
    MealPlanResponse, MessageResponse,
};
use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meal-plans", post(create_meal_plan))
        .route("/meal-plans/user", get(get_user_meal_plans))
        .route(
            "/meal-plans/:id",
            get(get_meal_plan).delete(delete_meal_plan),
        )
        .route("/meal-plans/:id/items", get(get_meal_plan_items))
        .route("/meal-plans/:id/nutrition", put(update_nutrition_totals))
}

#[instrument(skip(state, payload))]
pub async fn create_meal_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateMealPlanRequest>,
) -> Result<(StatusCode, Json<CreatedMealPlanResponse>), AppError> {
    let (meal_plan, items) = state.meal_plans.create(&payload, user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedMealPlanResponse {
            message: "Meal plan created successfully".into(),
            meal_plan,
            items,
        }),
    ))
}

// Reads are open to any authenticated user; only delete is owner-gated.
#[instrument(skip(state))]
pub async fn get_meal_plan(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealPlanResponse>, AppError> {
    let meal_plan = state.meal_plans.get(id).await?;
    Ok(Json(MealPlanResponse { meal_plan }))
}

#[instrument(skip(state))]
pub async fn get_user_meal_plans(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MealPlanListResponse>, AppError> {
    let meal_plans = state.meal_plans.list_for_owner(user_id).await?;
    Ok(Json(MealPlanListResponse { meal_plans }))
}

#[instrument(skip(state))]
pub async fn get_meal_plan_items(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MealPlanItemsResponse>, AppError> {
    let items = state.meal_plans.list_items(id).await?;
    Ok(Json(MealPlanItemsResponse { items }))
}

#[instrument(skip(state))]
pub async fn delete_meal_plan(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.meal_plans.delete(id, user_id).await?;
    Ok(Json(MessageResponse {
        message: "Meal plan deleted successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn update_nutrition_totals(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    state.meal_plans.recompute(id).await?;
    Ok(Json(MessageResponse {
        message: "Nutrition totals updated successfully".into(),
    }))
}
