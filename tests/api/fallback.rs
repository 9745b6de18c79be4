use anyhow::Result;
use reqwest::{Method, StatusCode};
use uuid::Uuid;

use crate::helpers::{assert_error_message, TestApp};

#[tokio::test]
async fn invalid_path_404() -> Result<()> {
    let app = TestApp::spawn().await?;

    for path in ["/invalidpath", "/subscribers/names/extra"] {
        let res = app.get(path).await?;
        assert_error_message(res, StatusCode::NOT_FOUND, "Error - Route not found").await?;
    }

    Ok(())
}

#[tokio::test]
async fn unsupported_method_404() -> Result<()> {
    let app = TestApp::spawn().await?;
    let id = Uuid::new_v4();

    let cases = [
        (Method::PUT, "/subscribers".to_string()),
        (Method::DELETE, "/subscribers".to_string()),
        (Method::DELETE, "/subscribers/names".to_string()),
        (Method::PATCH, format!("/subscribers/{id}")),
        (Method::POST, "/".to_string()),
    ];

    for (method, path) in cases {
        let res = app
            .http_client
            .request(method.clone(), app.url(&path))
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::NOT_FOUND,
            "Wrong response for: {method} {path}"
        );
        assert_error_message(res, StatusCode::NOT_FOUND, "Error - Route not found").await?;
    }

    Ok(())
}

#[tokio::test]
async fn responses_carry_a_request_id() -> Result<()> {
    let app = TestApp::spawn().await?;

    for path in ["/subscribers", "/invalidpath"] {
        let res = app.get(path).await?;
        let req_id = res
            .headers()
            .get("x-request-id")
            .and_then(|id| id.to_str().ok())
            .map(Uuid::parse_str);
        assert!(
            matches!(req_id, Some(Ok(_))),
            "missing request id for: {path}"
        );
    }

    Ok(())
}
