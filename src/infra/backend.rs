//! Backend-as-a-service client over the hosted REST query interface.
//!
//! Constructed once from settings and passed down by reference; never a
//! process-global. Rows are deserialized into raw structs and validated
//! into typed records at this boundary, so malformed data is rejected
//! before it can reach any transformation or rendering code.

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use crate::config::BackendSettings;
use crate::domain::{
    entities::{ExperienceRecord, SkillRecord},
    types::ExperienceCategory,
};

use super::error::InfraError;

const REST_PREFIX: &str = "rest/v1/";

#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base: Url,
    api_key: String,
}

impl BackendClient {
    pub fn new(settings: &BackendSettings) -> Result<Self, InfraError> {
        let base = settings
            .url
            .join(REST_PREFIX)
            .map_err(|err| InfraError::backend(format!("invalid backend base URL: {err}")))?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(|err| InfraError::backend(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base,
            api_key: settings.api_key.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("folio/", env!("CARGO_PKG_VERSION"))
    }

    /// Fetch every skill record, ordered by id ascending.
    pub async fn skills(&self) -> Result<Vec<SkillRecord>, InfraError> {
        let rows: Vec<SkillRow> = self
            .select("skill", &[("select", "*"), ("order", "id.asc")])
            .await?;
        rows.into_iter().map(SkillRow::into_record).collect()
    }

    /// Fetch the experience records for one category, ordered by id
    /// ascending.
    pub async fn experiences(
        &self,
        category: ExperienceCategory,
    ) -> Result<Vec<ExperienceRecord>, InfraError> {
        let filter = format!("eq.{}", category.as_str());
        let rows: Vec<ExperienceRow> = self
            .select(
                "experience",
                &[
                    ("select", "*"),
                    ("category", filter.as_str()),
                    ("order", "id.asc"),
                ],
            )
            .await?;
        rows.into_iter().map(ExperienceRow::into_record).collect()
    }

    async fn select<T: for<'de> Deserialize<'de>>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, InfraError> {
        let mut url = self
            .base
            .join(table)
            .map_err(|err| InfraError::backend(format!("invalid table path `{table}`: {err}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        debug!(table, "querying backend");
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|err| InfraError::backend(format!("request to `{table}` failed: {err}")))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|err| {
            InfraError::backend(format!("failed to read `{table}` response: {err}"))
        })?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(InfraError::backend(format!(
                "`{table}` query returned status {status}: {body}"
            )));
        }

        serde_json::from_slice(&bytes).map_err(|err| {
            InfraError::backend(format!("failed to parse `{table}` response: {err}"))
        })
    }
}

#[derive(Debug, Deserialize)]
struct SkillRow {
    id: Option<i64>,
    name: Option<String>,
    category: Option<String>,
    is_highlight: Option<bool>,
}

impl SkillRow {
    fn into_record(self) -> Result<SkillRecord, InfraError> {
        let id = self
            .id
            .ok_or_else(|| InfraError::backend("skill row is missing `id`"))?;
        Ok(SkillRecord {
            id,
            name: required(self.name, "skill", id, "name")?,
            category: required(self.category, "skill", id, "category")?,
            is_highlight: self.is_highlight.unwrap_or(false),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ExperienceRow {
    id: Option<i64>,
    category: Option<String>,
    organization: Option<String>,
    title: Option<String>,
    role: Option<String>,
    content: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
}

impl ExperienceRow {
    fn into_record(self) -> Result<ExperienceRecord, InfraError> {
        let id = self
            .id
            .ok_or_else(|| InfraError::backend("experience row is missing `id`"))?;

        let raw_category = required(self.category, "experience", id, "category")?;
        let category = match raw_category.as_str() {
            "work" => ExperienceCategory::Work,
            "education" => ExperienceCategory::Education,
            other => {
                return Err(InfraError::backend(format!(
                    "experience row {id} has unknown category `{other}`"
                )));
            }
        };

        Ok(ExperienceRecord {
            id,
            category,
            organization: required(self.organization, "experience", id, "organization")?,
            title: required(self.title, "experience", id, "title")?,
            role: self.role.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            start_date: required(self.start_date, "experience", id, "start_date")?,
            end_date: required(self.end_date, "experience", id, "end_date")?,
        })
    }
}

fn required(
    value: Option<String>,
    table: &str,
    id: i64,
    column: &str,
) -> Result<String, InfraError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(InfraError::backend(format!(
            "{table} row {id} is missing `{column}`"
        ))),
    }
}
