//! Response shapes shared by the resource routes

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// JSON stand-in for an HTML form page: where to post and which fields.
#[derive(Debug, Serialize)]
pub struct FormDescriptor {
    pub action: String,
    pub method: &'static str,
    pub fields: &'static [&'static str],
}

impl FormDescriptor {
    pub fn post(action: impl Into<String>, fields: &'static [&'static str]) -> Self {
        Self {
            action: action.into(),
            method: "POST",
            fields,
        }
    }
}

/// Outcome of a successful form submission: `303 See Other` to `location`,
/// with the confirmation message in the body.
#[derive(Debug)]
pub struct FormRedirect {
    pub location: String,
    pub message: String,
}

impl FormRedirect {
    pub fn to(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Confirmation after a delete, naming the removed record.
    pub fn deleted(location: impl Into<String>, label: &str) -> Self {
        Self::to(location, format!("\"{}\" was successfully deleted!", label))
    }
}

impl IntoResponse for FormRedirect {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "message": self.message,
            "location": self.location,
        }));

        (
            StatusCode::SEE_OTHER,
            [(header::LOCATION, self.location)],
            body,
        )
            .into_response()
    }
}
