//! View state for label lists.
//!
//! [`LabelList`] owns a [`LabelListState`] and publishes every change through a
//! `watch` channel, so a view can [`LabelList::subscribe`] and re-render when
//! the labels or the loading flag change. Overlapping calls are not
//! serialized: whichever response resolves last overwrites `labels`.

use std::collections::BTreeMap;

use tokio::sync::watch;

use crate::errors::Result;
use crate::labels::LabelRepository;
use crate::models::{Label, LabelListOptions};

/// Snapshot of what a label view displays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelListState {
    /// Last fetched result, in server order
    pub labels: Vec<Label>,
    pub popular_labels: Vec<Label>,
    /// True only while a list or search request is in flight
    pub is_loading: bool,
    /// Last query passed to search
    pub search_query: String,
}

impl LabelListState {
    pub fn find_label_by_id(&self, label_id: i64) -> Option<&Label> {
        self.labels.iter().find(|label| label.id == Some(label_id))
    }

    /// Keyboard shortcut sequence per label id.
    pub fn short_keys(&self) -> BTreeMap<i64, Vec<String>> {
        self.labels
            .iter()
            .filter_map(|label| {
                let id = label.id?;
                Some((id, label.suffix_key.iter().cloned().collect()))
            })
            .collect()
    }
}

/// Which step of the popular-label fallback chain produced `labels`.
///
/// Popular labels only pre-populate quick-select controls, so a failure here
/// degrades to the plain list and then to nothing instead of surfacing an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopularSource {
    /// The ranked popular list was non-empty
    Popular,
    /// Popular was empty or failed; the plain list was used
    FullList,
    /// Both requests failed; `labels` is empty
    Unavailable,
}

/// Sets `is_loading` for its lifetime.
struct Loading<'a> {
    state: &'a watch::Sender<LabelListState>,
}

impl<'a> Loading<'a> {
    fn start(state: &'a watch::Sender<LabelListState>) -> Self {
        state.send_modify(|s| s.is_loading = true);
        Self { state }
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.is_loading = false);
    }
}

/// Label list controller owned by a view.
pub struct LabelList {
    repository: LabelRepository,
    state: watch::Sender<LabelListState>,
}

impl LabelList {
    pub fn new(repository: LabelRepository) -> Self {
        let (state, _) = watch::channel(LabelListState::default());
        Self { repository, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<LabelListState> {
        self.state.subscribe()
    }

    /// Copy of the current state.
    pub fn state(&self) -> LabelListState {
        self.state.borrow().clone()
    }

    pub fn find_label_by_id(&self, label_id: i64) -> Option<Label> {
        self.state.borrow().find_label_by_id(label_id).cloned()
    }

    pub fn short_keys(&self) -> BTreeMap<i64, Vec<String>> {
        self.state.borrow().short_keys()
    }

    /// Replace `labels` with a fresh listing. Errors propagate.
    pub async fn get_label_list(&self, project_id: &str, options: &LabelListOptions) -> Result<()> {
        let _loading = Loading::start(&self.state);

        let labels = self.repository.list(project_id, options).await?;
        self.state.send_modify(|s| s.labels = labels);

        Ok(())
    }

    /// Load popular labels, falling back to the plain list, then to nothing.
    /// Never fails.
    pub async fn get_popular_labels(&self, project_id: &str, limit: u32) -> PopularSource {
        match self.repository.list_popular(project_id, limit).await {
            Ok(popular) if !popular.is_empty() => {
                self.state.send_modify(|s| {
                    s.popular_labels = popular.clone();
                    s.labels = popular;
                });
                return PopularSource::Popular;
            }
            Ok(_) => {
                tracing::debug!(project_id, "No popular labels, falling back to list");
                self.state.send_modify(|s| {
                    s.popular_labels.clear();
                    s.labels.clear();
                });
            }
            Err(e) => {
                tracing::warn!(project_id, error = %e, "Failed to load popular labels");
            }
        }

        let options = LabelListOptions::new().limit(limit);
        match self.repository.list(project_id, &options).await {
            Ok(labels) => {
                self.state.send_modify(|s| s.labels = labels);
                PopularSource::FullList
            }
            Err(e) => {
                tracing::error!(project_id, error = %e, "Fallback label list also failed");
                self.state.send_modify(|s| s.labels.clear());
                PopularSource::Unavailable
            }
        }
    }

    /// Search labels. The query is recorded even if the request fails.
    pub async fn search_labels(&self, project_id: &str, query: &str, limit: u32) -> Result<()> {
        self.state.send_modify(|s| s.search_query = query.to_string());
        let _loading = Loading::start(&self.state);

        let labels = self.repository.search(project_id, query, limit).await?;
        self.state.send_modify(|s| s.labels = labels);

        Ok(())
    }

    /// Create a label, then reload the list.
    pub async fn create_label(&self, project_id: &str, label: &Label) -> Result<()> {
        self.repository.create(project_id, label).await?;
        self.get_label_list(project_id, &LabelListOptions::default())
            .await
    }

    /// Update a label. Local state is left for the caller to reconcile.
    pub async fn update_label(&self, project_id: &str, label: &Label) -> Result<Label> {
        self.repository.update(project_id, label).await
    }

    /// Delete the given labels, then reload the list.
    pub async fn delete_label_list(&self, project_id: &str, labels: &[Label]) -> Result<()> {
        let ids: Vec<i64> = labels.iter().filter_map(|label| label.id).collect();

        self.repository.bulk_delete(project_id, &ids).await?;
        self.get_label_list(project_id, &LabelListOptions::default())
            .await
    }
}
