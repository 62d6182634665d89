use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::api::{query_instances, InstanceQuery};
use crate::artifacts::ArtifactKind;
use crate::document::DocumentPatch;
use crate::models::AppState;

/// Progress checkbox id for the instance query.
pub const INSTANCE_QUERY_CB: &str = "instance-query-cb";

/// One checkbox per resource query. A query ticks its box when it finishes,
/// whatever the outcome; the progress table hides once every box is ticked.
#[derive(Clone, Debug, Default)]
pub struct QueryProgress {
    inner: Arc<Mutex<BTreeMap<String, ProgressEntry>>>,
}

#[derive(Clone, Debug)]
struct ProgressEntry {
    label: String,
    checked: bool,
}

impl QueryProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, ProgressEntry>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Adds (or resets) the checkbox for a query about to start.
    pub fn start(&self, checkbox_id: &str, label: &str) {
        self.lock().insert(
            checkbox_id.to_string(),
            ProgressEntry {
                label: label.to_string(),
                checked: false,
            },
        );
    }

    pub fn check(&self, checkbox_id: &str) {
        if let Some(entry) = self.lock().get_mut(checkbox_id) {
            entry.checked = true;
        }
    }

    pub fn is_checked(&self, checkbox_id: &str) -> bool {
        self.lock().get(checkbox_id).map(|e| e.checked).unwrap_or(false)
    }

    pub fn is_complete(&self) -> bool {
        self.lock().values().all(|e| e.checked)
    }

    /// `(checkbox id, label, checked)` in id order.
    pub fn rows(&self) -> Vec<(String, String, bool)> {
        self.lock()
            .iter()
            .map(|(id, e)| (id.clone(), e.label.clone(), e.checked))
            .collect()
    }

    /// Ticks `checkbox_id` and reports whether the progress display can be
    /// hidden.
    fn finish(&self, checkbox_id: &str) -> bool {
        self.check(checkbox_id);
        let complete = self.is_complete();
        if complete {
            tracing::info!("All queries complete; hiding query progress");
        }
        complete
    }
}

/// Queries the backend for instances and merges the result into `region`'s
/// document, then redraws. Failures are logged only. Either way the
/// instance checkbox ends up ticked; the return value says whether every
/// query is now complete.
pub async fn run_instance_query(state: &AppState, region: &str, query: InstanceQuery) -> bool {
    state.progress.start(INSTANCE_QUERY_CB, ArtifactKind::Instance.reference());
    tracing::info!(region, compartment = %query.compartment_id, subnet = ?query.subnet_id, "Instance query started");
    match query_instances(&state.client, &state.api_base_url, &query).await {
        Ok(instances) => {
            for instance in &instances {
                tracing::info!(name = ?instance.display_name, "Instance Query");
            }
            let count = instances.len();
            state
                .document(region)
                .update(|document| document.load(DocumentPatch::instances(instances)));
            state.redraw(region);
            tracing::info!(region, count, "Instance query merged");
        }
        Err(e) => {
            tracing::error!(region, error = %e, "Instance query failed");
        }
    }
    state.progress.finish(INSTANCE_QUERY_CB)
}

/// Fire-and-forget variant used by the HTTP layer.
pub fn spawn_instance_query(state: AppState, region: String, query: InstanceQuery) -> tokio::task::JoinHandle<bool> {
    state.progress.start(INSTANCE_QUERY_CB, ArtifactKind::Instance.reference());
    tokio::spawn(async move { run_instance_query(&state, &region, query).await })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_completes_when_every_box_is_checked() {
        let progress = QueryProgress::new();
        progress.start(INSTANCE_QUERY_CB, "Instance");
        progress.start("subnet-query-cb", "Subnet");
        assert!(!progress.finish(INSTANCE_QUERY_CB));
        assert!(progress.is_checked(INSTANCE_QUERY_CB));
        assert!(progress.finish("subnet-query-cb"));
        assert!(progress.is_complete());
    }

    #[test]
    fn restarting_unchecks() {
        let progress = QueryProgress::new();
        progress.start(INSTANCE_QUERY_CB, "Instance");
        progress.check(INSTANCE_QUERY_CB);
        progress.start(INSTANCE_QUERY_CB, "Instance");
        assert!(!progress.is_checked(INSTANCE_QUERY_CB));
        assert_eq!(progress.rows(), vec![(INSTANCE_QUERY_CB.to_string(), "Instance".to_string(), false)]);
    }
}
