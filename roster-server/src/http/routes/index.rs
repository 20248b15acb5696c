//! Landing page

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Landing page body
#[derive(Serialize)]
pub struct IndexResponse {
    pub service: &'static str,
    pub sections: [&'static str; 3],
}

/// GET /
async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        service: "roster",
        sections: ["/students", "/instructors", "/courses"],
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn links_every_section() {
        let Json(body) = index().await;
        assert_eq!(body.sections, ["/students", "/instructors", "/courses"]);
    }
}
