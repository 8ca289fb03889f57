use async_trait::async_trait;
use serde_json::{json, Value};
use site_provisioner::{
    HandlerMap, PriorityMap, Result, SectionHandler, Site, SiteProvisioner, Template,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Journal of (event, timestamp) pairs shared by the instrumented handlers.
type Journal = Arc<Mutex<Vec<(String, Instant)>>>;

struct InstrumentedHandler {
    name: String,
    journal: Journal,
    work: Duration,
}

impl InstrumentedHandler {
    fn new(name: &str, journal: Journal, work: Duration) -> Self {
        Self {
            name: name.to_string(),
            journal,
            work,
        }
    }
}

#[async_trait]
impl SectionHandler for InstrumentedHandler {
    async fn provision(&self, _site: &Site, _config: &Value) -> Result<()> {
        self.journal
            .lock()
            .await
            .push((format!("start:{}", self.name), Instant::now()));
        tokio::time::sleep(self.work).await;
        self.journal
            .lock()
            .await
            .push((format!("complete:{}", self.name), Instant::now()));
        Ok(())
    }
}

fn build_provisioner(handlers: Vec<InstrumentedHandler>, priorities: &[(&str, i32)]) -> SiteProvisioner {
    let mut map: HandlerMap = HashMap::new();
    for handler in handlers {
        map.insert(handler.name.clone(), Box::new(handler));
    }
    let priorities: PriorityMap = priorities
        .iter()
        .map(|(name, p)| (name.to_string(), *p))
        .collect();
    let site = Site::new("http://localhost/sites/test").unwrap();
    SiteProvisioner::with_handlers(site, map, priorities)
}

async fn timestamp_of(journal: &Journal, event: &str) -> Instant {
    let events = journal.lock().await;
    events
        .iter()
        .find(|(name, _)| name == event)
        .map(|(_, at)| *at)
        .unwrap_or_else(|| panic!("event {} not recorded", event))
}

#[tokio::test]
async fn test_second_section_starts_after_first_completes() {
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));
    let provisioner = build_provisioner(
        vec![
            InstrumentedHandler::new("A", journal.clone(), Duration::from_millis(50)),
            InstrumentedHandler::new("B", journal.clone(), Duration::from_millis(1)),
        ],
        &[("A", 1), ("B", 2)],
    );

    let mut template = Template::new();
    template.insert("A", json!({}));
    template.insert("B", json!({}));

    provisioner.apply_template(&template).await.unwrap();

    let a_complete = timestamp_of(&journal, "complete:A").await;
    let b_start = timestamp_of(&journal, "start:B").await;
    assert!(
        b_start >= a_complete,
        "B started before A completed: {:?} < {:?}",
        b_start,
        a_complete
    );
}

#[tokio::test]
async fn test_priority_table_controls_dispatch_order() {
    let journal: Journal = Arc::new(Mutex::new(Vec::new()));
    let provisioner = build_provisioner(
        vec![
            InstrumentedHandler::new("Lists", journal.clone(), Duration::from_millis(1)),
            InstrumentedHandler::new("Navigation", journal.clone(), Duration::from_millis(1)),
            InstrumentedHandler::new("Extra", journal.clone(), Duration::from_millis(1)),
        ],
        // Extra is unlisted and must run last at the default priority.
        &[("Navigation", 1), ("Lists", 2)],
    );

    let mut template = Template::new();
    template.insert("Extra", json!({}));
    template.insert("Lists", json!({}));
    template.insert("Navigation", json!({}));

    provisioner.apply_template(&template).await.unwrap();

    let events = journal.lock().await;
    let starts: Vec<&str> = events
        .iter()
        .filter(|(name, _)| name.starts_with("start:"))
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(starts, vec!["start:Navigation", "start:Lists", "start:Extra"]);
}

#[tokio::test]
async fn test_runs_against_different_sites_are_independent() {
    let journal_one: Journal = Arc::new(Mutex::new(Vec::new()));
    let journal_two: Journal = Arc::new(Mutex::new(Vec::new()));

    let first = build_provisioner(
        vec![InstrumentedHandler::new(
            "Lists",
            journal_one.clone(),
            Duration::from_millis(20),
        )],
        &[("Lists", 1)],
    );
    let second = build_provisioner(
        vec![InstrumentedHandler::new(
            "Lists",
            journal_two.clone(),
            Duration::from_millis(20),
        )],
        &[("Lists", 1)],
    );

    let mut template = Template::new();
    template.insert("Lists", json!({}));

    let (first_result, second_result) = tokio::join!(
        first.apply_template(&template),
        second.apply_template(&template)
    );
    first_result.unwrap();
    second_result.unwrap();

    assert_eq!(journal_one.lock().await.len(), 2);
    assert_eq!(journal_two.lock().await.len(), 2);
}
