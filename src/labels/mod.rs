//! Label repository.
//!
//! Every operation is one request with no retry. Responses are mapped field by
//! field from [`LabelPayload`] to [`Label`], and back on write.

use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use serde::Serialize;

use crate::api::ApiClient;
use crate::errors::{ClientError, Result};
use crate::models::{Label, LabelListOptions, LabelPayload, ListResponse, Page, SEARCH_ORDERING};

/// Message shown when an upload fails without a server-provided reason.
pub const UPLOAD_FALLBACK_MESSAGE: &str = "Text field is required";

/// The label kinds the backend serves, each under its own resource name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelType {
    Category,
    Span,
    Relation,
}

impl LabelType {
    pub fn resource(self) -> &'static str {
        match self {
            LabelType::Category => "category-type",
            LabelType::Span => "span-type",
            LabelType::Relation => "relation-type",
        }
    }
}

#[derive(Serialize)]
struct BulkDelete<'a> {
    ids: &'a [i64],
}

/// Repository for one project-scoped label resource.
#[derive(Clone)]
pub struct LabelRepository {
    client: ApiClient,
    resource: String,
}

impl LabelRepository {
    /// Repository for the plain `label` resource.
    pub fn new(client: ApiClient) -> Self {
        Self::with_resource(client, "label")
    }

    pub fn for_type(client: ApiClient, label_type: LabelType) -> Self {
        Self::with_resource(client, label_type.resource())
    }

    pub fn with_resource(client: ApiClient, resource: impl Into<String>) -> Self {
        Self {
            client,
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    fn collection_url(&self, project_id: &str) -> String {
        format!("/projects/{}/{}s", project_id, self.resource)
    }

    fn item_url(&self, project_id: &str, label_id: i64) -> String {
        format!("/projects/{}/{}s/{}", project_id, self.resource, label_id)
    }

    /// List labels. Paginated and bare-array responses give the same result.
    pub async fn list(&self, project_id: &str, options: &LabelListOptions) -> Result<Vec<Label>> {
        let response: ListResponse<LabelPayload> = self
            .client
            .get(&self.collection_url(project_id), &options.to_query())
            .await?;

        Ok(response.into_items().into_iter().map(Label::from).collect())
    }

    /// List labels keeping the page envelope.
    pub async fn list_page(
        &self,
        project_id: &str,
        options: &LabelListOptions,
    ) -> Result<Page<Label>> {
        let response: ListResponse<LabelPayload> = self
            .client
            .get(&self.collection_url(project_id), &options.to_query())
            .await?;

        Ok(response.into_page().map(Label::from))
    }

    /// Server-ranked most used labels. Never paginated.
    pub async fn list_popular(&self, project_id: &str, limit: u32) -> Result<Vec<Label>> {
        let url = format!("{}/popular", self.collection_url(project_id));
        let items: Vec<LabelPayload> = self
            .client
            .get(&url, &[("limit", limit.to_string())])
            .await?;

        Ok(items.into_iter().map(Label::from).collect())
    }

    /// Substring search, most used first then alphabetical.
    pub async fn search(&self, project_id: &str, query: &str, limit: u32) -> Result<Vec<Label>> {
        let options = LabelListOptions::new()
            .search(query)
            .limit(limit)
            .ordering(SEARCH_ORDERING);

        self.list(project_id, &options).await
    }

    /// Every label of the project in one unpaginated response.
    pub async fn list_all(&self, project_id: &str) -> Result<Vec<Label>> {
        self.list(project_id, &LabelListOptions::new().no_page()).await
    }

    pub async fn find_by_id(&self, project_id: &str, label_id: i64) -> Result<Label> {
        let item: LabelPayload = self
            .client
            .get(&self.item_url(project_id, label_id), &[])
            .await?;

        Ok(item.into())
    }

    pub async fn create(&self, project_id: &str, item: &Label) -> Result<Label> {
        let created: LabelPayload = self
            .client
            .post(&self.collection_url(project_id), &LabelPayload::from(item))
            .await?;

        Ok(created.into())
    }

    /// Partial update keyed by the label's id.
    pub async fn update(&self, project_id: &str, item: &Label) -> Result<Label> {
        let label_id = item.id.ok_or_else(|| {
            ClientError::Validation(format!("Label {:?} has no id to update", item.text))
        })?;

        let updated: LabelPayload = self
            .client
            .patch(&self.item_url(project_id, label_id), &LabelPayload::from(item))
            .await?;

        Ok(updated.into())
    }

    /// Delete several labels in one request.
    pub async fn bulk_delete(&self, project_id: &str, label_ids: &[i64]) -> Result<()> {
        let _: IgnoredAny = self
            .client
            .delete(&self.collection_url(project_id), &BulkDelete { ids: label_ids })
            .await?;

        Ok(())
    }

    /// Upload a label definition file.
    ///
    /// A rejected upload becomes [`ClientError::Upload`] carrying the server's
    /// `detail`, or [`UPLOAD_FALLBACK_MESSAGE`] when there is none.
    pub async fn upload_file(&self, project_id: &str, form: Form) -> Result<()> {
        let url = format!("/projects/{}/{}-upload", project_id, self.resource);

        match self.client.post_multipart::<IgnoredAny>(&url, form).await {
            Ok(_) => Ok(()),
            Err(err @ ClientError::Status { .. }) => Err(ClientError::Upload(
                err.detail()
                    .unwrap_or_else(|| UPLOAD_FALLBACK_MESSAGE.to_string()),
            )),
            Err(err) => Err(err),
        }
    }
}

/// Multipart form holding a JSON label file under the `file` field.
pub fn label_upload_form(file_name: &str, contents: Vec<u8>) -> Result<Form> {
    let part = Part::bytes(contents)
        .file_name(file_name.to_string())
        .mime_str("application/json")?;

    Ok(Form::new().part("file", part))
}
