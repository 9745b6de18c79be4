use axum::{extract::State, response::Html};

use crate::{web::WebResult, AppState};

/// The static landing page.
pub async fn home(State(app_state): State<AppState>) -> WebResult<Html<String>> {
    let body = app_state.templ_mgr.render_html_to_string("index.html")?;

    Ok(Html(body))
}
