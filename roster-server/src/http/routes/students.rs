//! Student endpoints
//!
//! Includes the enrollment actions reached from the student edit page.

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Serialize;

use super::common::{FormDescriptor, FormRedirect};
use crate::db::repos::{Course, CourseRepo, EnrolledCourse, EnrollmentRepo, Student, StudentRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{CourseAction, StudentCourseAction, ValidId};
use crate::http::server::AppState;
use crate::models::{GradeForm, StudentForm};

const STUDENT_FIELDS: &[&str] = &["id", "name", "credits"];

/// Student detail page
#[derive(Serialize)]
pub struct StudentDetail {
    pub student: Student,
    pub courses: Vec<EnrolledCourse>,
}

/// Student edit page: the record, its enrollments, and every course on offer
#[derive(Serialize)]
pub struct StudentEditPage {
    pub student: Student,
    pub courses: Vec<EnrolledCourse>,
    pub other_courses: Vec<Course>,
    pub form: FormDescriptor,
}

/// GET /students
async fn list_students(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = StudentRepo::new(&state.pool).list().await?;
    Ok(Json(students))
}

/// GET /students/{id}
async fn get_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<StudentDetail>, ApiError> {
    let repo = StudentRepo::new(&state.pool);
    let student = repo.get(id).await?;
    let courses = repo.courses(id).await?;

    tracing::debug!(student_id = id, courses = courses.len(), "Loaded student");
    Ok(Json(StudentDetail { student, courses }))
}

/// GET /students/create
async fn create_form() -> Json<FormDescriptor> {
    Json(FormDescriptor::post("/students/create", STUDENT_FIELDS))
}

/// POST /students/create
async fn create_student(
    State(state): State<Arc<AppState>>,
    Form(form): Form<StudentForm>,
) -> Result<FormRedirect, ApiError> {
    let input = form.validate()?;
    let student = StudentRepo::new(&state.pool).create(input).await?;

    tracing::info!(student_id = student.id, "Created student");
    Ok(FormRedirect::to(
        "/students",
        format!("\"{}\" was successfully created!", student.name),
    ))
}

/// GET /students/{id}/edit
async fn edit_form(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<StudentEditPage>, ApiError> {
    let repo = StudentRepo::new(&state.pool);
    let student = repo.get(id).await?;
    let courses = repo.courses(id).await?;
    let other_courses = CourseRepo::new(&state.pool).list().await?;

    Ok(Json(StudentEditPage {
        student,
        courses,
        other_courses,
        form: FormDescriptor::post(format!("/students/{id}/edit"), &["name", "credits"]),
    }))
}

/// POST /students/{id}/edit
async fn update_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    Form(form): Form<StudentForm>,
) -> Result<FormRedirect, ApiError> {
    let repo = StudentRepo::new(&state.pool);
    repo.get(id).await?;

    let input = form.validate()?;
    let student = repo.update(id, input).await?;

    tracing::info!(student_id = student.id, "Updated student");
    Ok(FormRedirect::to(
        "/students",
        format!("\"{}\" was successfully updated!", student.name),
    ))
}

/// GET /students/{id}/edit/add{course_id} - grade form
async fn course_action_form(
    StudentCourseAction { student_id, action }: StudentCourseAction,
) -> Result<Json<FormDescriptor>, ApiError> {
    match action {
        CourseAction::Add(course_id) => Ok(Json(FormDescriptor::post(
            format!("/students/{student_id}/edit/add{course_id}"),
            &["grade"],
        ))),
        CourseAction::Delete(_) => Err(ApiError::MethodNotAllowed),
    }
}

/// POST /students/{id}/edit/add{course_id} (enroll) or
/// /students/{id}/edit/delete{course_id} (unenroll)
async fn course_action(
    State(state): State<Arc<AppState>>,
    StudentCourseAction { student_id, action }: StudentCourseAction,
    headers: HeaderMap,
    form: Result<Form<GradeForm>, FormRejection>,
) -> Result<FormRedirect, ApiError> {
    let back = format!("/students/{student_id}/edit");
    let enrollments = EnrollmentRepo::new(&state.pool);

    match action {
        CourseAction::Add(course_id) => {
            let form = match form {
                Ok(Form(form)) => form,
                // A bodiless post has no content type; that is an empty grade
                Err(FormRejection::InvalidFormContentType(_))
                    if !headers.contains_key(header::CONTENT_TYPE) =>
                {
                    GradeForm::default()
                }
                Err(rejection) => return Err(rejection.into()),
            };
            let grade = form.validate()?;
            let enrollment = enrollments.enroll(student_id, course_id, grade).await?;

            tracing::info!(student_id, course_id, grade = enrollment.grade, "Enrolled student");
            Ok(FormRedirect::to(back, "grade saved"))
        }
        CourseAction::Delete(course_id) => {
            let removed = enrollments.unenroll(student_id, course_id).await?;

            tracing::info!(student_id, course_id, removed, "Unenrolled student");
            Ok(FormRedirect::to(back, "course removed"))
        }
    }
}

/// POST /students/{id}/delete
async fn delete_student(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<FormRedirect, ApiError> {
    let student = StudentRepo::new(&state.pool).delete(id).await?;

    tracing::info!(student_id = student.id, "Deleted student");
    Ok(FormRedirect::deleted("/students", &student.name))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/create", get(create_form).post(create_student))
        .route("/students/{id}", get(get_student))
        .route("/students/{id}/edit", get(edit_form).post(update_student))
        .route(
            "/students/{id}/edit/{action}",
            get(course_action_form).post(course_action),
        )
        .route("/students/{id}/delete", post(delete_student))
}
