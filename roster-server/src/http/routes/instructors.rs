//! Instructor endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;

use super::common::{FormDescriptor, FormRedirect};
use crate::db::repos::{Course, Instructor, InstructorRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::InstructorForm;

/// Instructor detail page
#[derive(Serialize)]
pub struct InstructorDetail {
    pub instructor: Instructor,
    pub courses: Vec<Course>,
}

/// Instructor edit page
#[derive(Serialize)]
pub struct InstructorEditPage {
    pub instructor: Instructor,
    pub form: FormDescriptor,
}

/// GET /instructors
async fn list_instructors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Instructor>>, ApiError> {
    let instructors = InstructorRepo::new(&state.pool).list().await?;
    Ok(Json(instructors))
}

/// GET /instructors/{id}
async fn get_instructor(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<InstructorDetail>, ApiError> {
    let repo = InstructorRepo::new(&state.pool);
    let instructor = repo.get(id).await?;
    let courses = repo.courses(id).await?;

    tracing::debug!(instructor_id = id, courses = courses.len(), "Loaded instructor");
    Ok(Json(InstructorDetail { instructor, courses }))
}

/// GET /instructors/create
async fn create_form() -> Json<FormDescriptor> {
    Json(FormDescriptor::post(
        "/instructors/create",
        &["id", "name", "department"],
    ))
}

/// POST /instructors/create
async fn create_instructor(
    State(state): State<Arc<AppState>>,
    Form(form): Form<InstructorForm>,
) -> Result<FormRedirect, ApiError> {
    let input = form.validate()?;
    let instructor = InstructorRepo::new(&state.pool).create(input).await?;

    tracing::info!(instructor_id = instructor.id, "Created instructor");
    Ok(FormRedirect::to(
        "/instructors",
        format!("\"{}\" was successfully created!", instructor.name),
    ))
}

/// GET /instructors/{id}/edit
async fn edit_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<InstructorEditPage>, ApiError> {
    let instructor = InstructorRepo::new(&state.pool).get(id).await?;
    Ok(Json(InstructorEditPage {
        instructor,
        form: FormDescriptor::post(format!("/instructors/{id}/edit"), &["name", "department"]),
    }))
}

/// POST /instructors/{id}/edit
async fn update_instructor(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Form(form): Form<InstructorForm>,
) -> Result<FormRedirect, ApiError> {
    let repo = InstructorRepo::new(&state.pool);
    repo.get(id).await?;

    let input = form.validate()?;
    let instructor = repo.update(id, input).await?;

    tracing::info!(instructor_id = instructor.id, "Updated instructor");
    Ok(FormRedirect::to(
        "/instructors",
        format!("\"{}\" was successfully updated!", instructor.name),
    ))
}

/// POST /instructors/{id}/delete
async fn delete_instructor(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<FormRedirect, ApiError> {
    let instructor = InstructorRepo::new(&state.pool).delete(id).await?;

    tracing::info!(instructor_id = instructor.id, "Deleted instructor");
    Ok(FormRedirect::deleted("/instructors", &instructor.name))
}

/// Instructor routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/instructors", get(list_instructors))
        .route("/instructors/create", get(create_form).post(create_instructor))
        .route("/instructors/{id}", get(get_instructor))
        .route("/instructors/{id}/edit", get(edit_form).post(update_instructor))
        .route("/instructors/{id}/delete", post(delete_instructor))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::db::InstructorRepo;
    use crate::test_support::{get, migrated_app, post_form, seeded_app};

    #[tokio::test]
    async fn create_and_show() {
        let (app, _pool) = migrated_app().await;

        let res = post_form(
            &app,
            "/instructors/create",
            "id=12&name=Grace+Hopper&department=Computer+Science",
        )
        .await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location.as_deref(), Some("/instructors"));

        let detail = get(&app, "/instructors/12").await;
        assert_eq!(detail.body["instructor"]["name"], "Grace Hopper");
        assert_eq!(detail.body["courses"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn create_requires_department() {
        let (app, pool) = migrated_app().await;

        let res = post_form(&app, "/instructors/create", "name=Grace+Hopper&department=").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["field"], "department");
        assert_eq!(InstructorRepo::new(&pool).count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn detail_lists_courses() {
        let (app, _pool) = seeded_app().await;

        let res = get(&app, "/instructors/589").await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["courses"][0]["title"], "Database Systems");
    }

    #[tokio::test]
    async fn edit_updates_department() {
        let (app, pool) = seeded_app().await;

        let res = post_form(&app, "/instructors/673/edit", "name=Sandra+Wilson&department=Genetics").await;

        assert_eq!(res.status, StatusCode::SEE_OTHER);
        let stored = InstructorRepo::new(&pool).get(673).await.unwrap();
        assert_eq!(stored.name, "Sandra Wilson");
        assert_eq!(stored.department, "Genetics");
    }

    #[tokio::test]
    async fn delete_teaching_instructor_conflicts() {
        let (app, _pool) = seeded_app().await;

        let res = post_form(&app, "/instructors/990/delete", "").await;

        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(get(&app, "/instructors/990").await.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_idle_instructor() {
        let (app, _pool) = seeded_app().await;

        let res = post_form(&app, "/instructors/456/delete", "").await;

        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.body["message"], "\"Jim George\" was successfully deleted!");
    }
}
