use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Declarative description of what to provision on a site, keyed by section
/// name. Section configurations are opaque to the sequencing core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template {
    sections: HashMap<String, Value>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, config: Value) {
        self.sections.insert(name.into(), config);
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// Top-level section names, in no guaranteed order. Callers must sort
    /// before dispatch.
    pub fn section_names(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let template = serde_json::from_str(&content)?;
        Ok(template)
    }
}

/// Handle to the target collaboration site: base URL, shared HTTP client and
/// the default headers sent with every request. Handlers receive it by
/// reference; nothing here is mutated during a run.
#[derive(Debug, Clone)]
pub struct Site {
    url: Url,
    client: reqwest::Client,
    headers: HashMap<String, String>,
}

impl Site {
    pub fn new(url: &str) -> Result<Self> {
        Self::with_options(url, HashMap::new(), None)
    }

    pub fn with_options(
        url: &str,
        headers: HashMap<String, String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut url = Url::parse(url)?;
        // Url::join replaces the last path segment unless the base ends with
        // a slash, so normalize once here.
        if !url.path().ends_with('/') {
            url.set_path(&format!("{}/", url.path()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url,
            client: builder.build()?,
            headers,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let endpoint = self.endpoint(path)?;
        let mut request = self.client.get(endpoint);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        Ok(request.send().await?)
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<reqwest::Response> {
        let endpoint = self.endpoint(path)?;
        let mut request = self.client.post(endpoint).json(body);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        Ok(request.send().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.url.join(path.trim_start_matches('/'))?)
    }
}
