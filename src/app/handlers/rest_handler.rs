use crate::domain::model::Site;
use crate::domain::ports::SectionHandler;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Generic default handler: pushes a section's configuration to a fixed REST
/// endpoint under the site. Array configurations are pushed one element at a
/// time, in order; anything else goes out as a single request. What the site
/// makes of the payload is its own business.
pub struct RestSectionHandler {
    section: String,
    path: String,
}

impl RestSectionHandler {
    pub fn new(section: &str, path: &str) -> Self {
        Self {
            section: section.to_string(),
            path: path.to_string(),
        }
    }

    async fn push(&self, site: &Site, body: &Value) -> Result<()> {
        tracing::debug!("POST {} ({} entry)", self.path, self.section);
        let response = site.post(&self.path, body).await?;
        response.error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl SectionHandler for RestSectionHandler {
    async fn provision(&self, site: &Site, config: &Value) -> Result<()> {
        match config {
            Value::Array(items) => {
                for item in items {
                    self.push(site, item).await?;
                }
            }
            other => self.push(site, other).await?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ProvisionError;
    use httpmock::prelude::*;
    use serde_json::json;

    fn site_for(server: &MockServer) -> Site {
        Site::new(&server.url("/sites/dev")).unwrap()
    }

    #[tokio::test]
    async fn test_object_config_sends_single_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/sites/dev/_api/web/navigation")
                .json_body(json!({"nodes": ["Home"]}));
            then.status(201);
        });

        let handler = RestSectionHandler::new("Navigation", "_api/web/navigation");
        handler
            .provision(&site_for(&server), &json!({"nodes": ["Home"]}))
            .await
            .unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_array_config_sends_one_request_per_element() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/sites/dev/_api/web/lists");
            then.status(201);
        });

        let handler = RestSectionHandler::new("Lists", "_api/web/lists");
        handler
            .provision(
                &site_for(&server),
                &json!([{"title": "Tasks"}, {"title": "Docs"}]),
            )
            .await
            .unwrap();

        mock.assert_hits(2);
    }

    #[tokio::test]
    async fn test_error_status_fails_the_handler() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/sites/dev/_api/web/lists");
            then.status(403);
        });

        let handler = RestSectionHandler::new("Lists", "_api/web/lists");
        let err = handler
            .provision(&site_for(&server), &json!({"title": "Tasks"}))
            .await
            .unwrap_err();

        mock.assert();
        assert!(matches!(err, ProvisionError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_array_push_stops_at_first_failing_element() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/sites/dev/_api/web/lists");
            then.status(500);
        });

        let handler = RestSectionHandler::new("Lists", "_api/web/lists");
        let result = handler
            .provision(
                &site_for(&server),
                &json!([{"title": "First"}, {"title": "Second"}]),
            )
            .await;

        assert!(result.is_err());
        mock.assert(); // only the first element was sent
    }
}
