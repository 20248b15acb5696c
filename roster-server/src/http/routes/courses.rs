//! Course endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;

use super::common::{FormDescriptor, FormRedirect};
use crate::db::repos::{Course, CourseRepo, EnrolledStudent, Instructor, InstructorRepo};
use crate::http::error::ApiError;
use crate::http::extractors::ValidId;
use crate::http::server::AppState;
use crate::models::CourseForm;

/// Course detail page: the course, who teaches it, and who takes it
#[derive(Serialize)]
pub struct CourseDetail {
    pub course: Course,
    pub instructor: Instructor,
    pub students: Vec<EnrolledStudent>,
}

/// Course edit page, with the instructors a course can be assigned to
#[derive(Serialize)]
pub struct CourseEditPage {
    pub course: Course,
    pub instructors: Vec<Instructor>,
    pub form: FormDescriptor,
}

/// GET /courses
async fn list_courses(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Course>>, ApiError> {
    let courses = CourseRepo::new(&state.pool).list().await?;
    Ok(Json(courses))
}

/// GET /courses/{id}
async fn get_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CourseDetail>, ApiError> {
    let repo = CourseRepo::new(&state.pool);
    let course = repo.get(id).await?;
    let students = repo.students(id).await?;
    let instructor = repo.instructor(id).await?;

    tracing::debug!(course_id = id, students = students.len(), "Loaded course");
    Ok(Json(CourseDetail {
        course,
        instructor,
        students,
    }))
}

/// GET /courses/create
async fn create_form() -> Json<FormDescriptor> {
    Json(FormDescriptor::post(
        "/courses/create",
        &["id", "title", "instructor_id"],
    ))
}

/// POST /courses/create
async fn create_course(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CourseForm>,
) -> Result<FormRedirect, ApiError> {
    let input = form.validate()?;
    let course = CourseRepo::new(&state.pool).create(input).await?;

    tracing::info!(course_id = course.id, instructor_id = course.instructor_id, "Created course");
    Ok(FormRedirect::to(
        "/courses",
        format!("\"{}\" was successfully created!", course.title),
    ))
}

/// GET /courses/{id}/edit
async fn edit_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<CourseEditPage>, ApiError> {
    let course = CourseRepo::new(&state.pool).get(id).await?;
    let instructors = InstructorRepo::new(&state.pool).list().await?;
    Ok(Json(CourseEditPage {
        course,
        instructors,
        form: FormDescriptor::post(format!("/courses/{id}/edit"), &["title", "instructor_id"]),
    }))
}

/// POST /courses/{id}/edit
async fn update_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Form(form): Form<CourseForm>,
) -> Result<FormRedirect, ApiError> {
    let repo = CourseRepo::new(&state.pool);
    repo.get(id).await?;

    let input = form.validate()?;
    let course = repo.update(id, input).await?;

    tracing::info!(course_id = course.id, instructor_id = course.instructor_id, "Updated course");
    Ok(FormRedirect::to(
        "/courses",
        format!("\"{}\" was successfully updated!", course.title),
    ))
}

/// POST /courses/{id}/delete
async fn delete_course(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<FormRedirect, ApiError> {
    let course = CourseRepo::new(&state.pool).delete(id).await?;

    tracing::info!(course_id = course.id, "Deleted course");
    Ok(FormRedirect::deleted("/courses", &course.title))
}

/// Course routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/create", get(create_form).post(create_course))
        .route("/courses/{id}", get(get_course))
        .route("/courses/{id}/edit", get(edit_form).post(update_course))
        .route("/courses/{id}/delete", post(delete_course))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::db::CourseRepo;
    use crate::test_support::{get, post_form, seeded_app};

    #[tokio::test]
    async fn detail_has_instructor_and_students() {
        let (app, _pool) = seeded_app().await;

        let res = get(&app, "/courses/9076").await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["course"]["title"], "Software Engineering");
        assert_eq!(res.body["instructor"]["id"], 535);
        let students: Vec<_> = res.body["students"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| (s["id"].as_i64().unwrap(), s["grade"].as_i64().unwrap()))
            .collect();
        assert_eq!(students, vec![(387, 100), (190, 77)]);
    }

    #[tokio::test]
    async fn empty_title_is_rejected_without_insert() {
        let (app, pool) = seeded_app().await;
        let before = CourseRepo::new(&pool).count().await.unwrap();

        let res = post_form(&app, "/courses/create", "title=&instructor_id=535").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["message"], "title is required");
        assert_eq!(CourseRepo::new(&pool).count().await.unwrap(), before);
    }

    #[tokio::test]
    async fn non_integer_instructor_id() {
        let (app, _pool) = seeded_app().await;

        let res = post_form(&app, "/courses/create", "title=Genetics&instructor_id=abc").await;

        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(res.body["message"], "instructor id must be an integer");
    }

    #[tokio::test]
    async fn unknown_instructor_conflicts() {
        let (app, pool) = seeded_app().await;

        let res = post_form(&app, "/courses/create", "title=Genetics&instructor_id=1").await;

        assert_eq!(res.status, StatusCode::CONFLICT);
        assert_eq!(res.body["message"], "instructor 1 does not exist");
        assert_eq!(CourseRepo::new(&pool).count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn create_and_edit() {
        let (app, pool) = seeded_app().await;

        let res = post_form(&app, "/courses/create", "id=5000&title=Genetics&instructor_id=673").await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.location.as_deref(), Some("/courses"));

        let page = get(&app, "/courses/5000/edit").await;
        assert_eq!(page.body["instructors"].as_array().unwrap().len(), 7);

        let res = post_form(&app, "/courses/5000/edit", "title=Genetics+II&instructor_id=456").await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);

        let stored = CourseRepo::new(&pool).get(5000).await.unwrap();
        assert_eq!(stored.title, "Genetics II");
        assert_eq!(stored.instructor_id, 456);
    }

    #[tokio::test]
    async fn delete_course() {
        let (app, _pool) = seeded_app().await;

        let res = post_form(&app, "/courses/7654/delete", "").await;
        assert_eq!(res.status, StatusCode::SEE_OTHER);
        assert_eq!(res.body["message"], "\"Health Informatics\" was successfully deleted!");

        let student = get(&app, "/students/101").await;
        assert_eq!(student.body["courses"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn enrollment_leaves_instructor_unchanged() {
        let (app, _pool) = seeded_app().await;

        post_form(&app, "/students/387/edit/add9076", "grade=100").await;
        let res = get(&app, "/courses/9076").await;

        assert_eq!(res.body["instructor"]["id"], 535);
        assert_eq!(res.body["students"].as_array().unwrap().len(), 3);
    }
}
