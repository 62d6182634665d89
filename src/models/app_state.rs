use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::canvas::{render_canvas, CanvasView};
use crate::config::LayoutConfig;
use crate::document::{DocumentStore, Regions};
use crate::services::QueryProgress;

#[derive(Clone)]
pub struct AppState {
    pub regions: Regions,
    pub progress: QueryProgress,
    /// Most recent redraw per region.
    pub canvases: Arc<Mutex<HashMap<String, CanvasView>>>,
    pub api_base_url: String,
    pub client: reqwest::Client,
    pub layout: LayoutConfig,
}

impl AppState {
    pub fn new(api_base_url: String, client: reqwest::Client) -> Self {
        Self {
            regions: Regions::new(),
            progress: QueryProgress::new(),
            canvases: Arc::new(Mutex::new(HashMap::new())),
            api_base_url,
            client,
            layout: LayoutConfig::default(),
        }
    }

    pub fn document(&self, region: &str) -> DocumentStore {
        self.regions.get_or_create(region)
    }

    /// Re-renders the whole canvas for `region` from current document state.
    pub fn redraw(&self, region: &str) -> CanvasView {
        let store = self.document(region);
        let canvas = store.read(|document| render_canvas(document, &self.layout));
        tracing::debug!(region, revision = store.revision(), nodes = canvas.nodes.len(), "Redraw canvas");
        self.canvases
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(region.to_string(), canvas.clone());
        canvas
    }

    pub fn last_canvas(&self, region: &str) -> Option<CanvasView> {
        self.canvases
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(region)
            .cloned()
    }
}
