//! Related-topics and related-queries fetchers
//!
//! Both consume the `relatedsearches` endpoint. The payload carries two
//! ranked lists: the first is the "top" section, the second "rising". The
//! service only supports these breakdowns for single-keyword comparisons,
//! so multi-keyword queries short-circuit to an empty table before any
//! network call.

use serde::Deserialize;
use tracing::debug;

use crate::client::widgets::{request_json, Widget, WidgetSet};
use crate::client::{TrendsClient, WIDGET_PREFIX};
use crate::error::{Result, TrendsError};
use crate::models::{QueryRow, RelatedSection, TopicRow};
use crate::query::TrendsQuery;

const RELATEDSEARCHES_PATH: &str = "/trends/api/widgetdata/relatedsearches";

#[derive(Debug, Deserialize)]
struct RelatedEnvelope {
    default: RelatedDefault,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedDefault {
    #[serde(default)]
    ranked_list: Vec<RankedList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedList {
    #[serde(default)]
    ranked_keyword: Vec<RankedKeyword>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedKeyword {
    #[serde(default)]
    topic: Option<Topic>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    value: Option<i64>,
    #[serde(default)]
    formatted_value: String,
}

#[derive(Debug, Deserialize)]
struct Topic {
    mid: String,
    title: String,
    #[serde(rename = "type")]
    topic_type: String,
}

/// Map a ranked-list index to its section tag
fn section_for(index: usize) -> RelatedSection {
    if index == 0 {
        RelatedSection::Top
    } else {
        RelatedSection::Rising
    }
}

impl TrendsClient {
    /// Fetch the related-topics table
    ///
    /// Empty (with no network call) for multi-keyword queries, and empty
    /// when the service omitted the widget from the explore response.
    ///
    /// # Errors
    ///
    /// `Remote` for non-2xx responses, `Parse` for envelope/schema
    /// mismatches, including topic entries without a topic object.
    pub async fn related_topics(
        &self,
        query: &TrendsQuery,
        widgets: &WidgetSet,
    ) -> Result<Vec<TopicRow>> {
        if !query.single_keyword() {
            debug!("skipping related topics: multi-keyword comparison");
            return Ok(Vec::new());
        }
        let Some(widget) = widgets.related_topics() else {
            return Ok(Vec::new());
        };

        let envelope = self.fetch_related(query, widget).await?;
        let keyword = &query.keywords()[0];

        let mut rows = Vec::new();
        for (index, list) in envelope.default.ranked_list.iter().enumerate() {
            let section = section_for(index);
            for entry in &list.ranked_keyword {
                let topic = entry.topic.as_ref().ok_or_else(|| {
                    TrendsError::parse("related-topics entry is missing its topic object")
                })?;
                rows.push(TopicRow {
                    section,
                    mid: topic.mid.clone(),
                    title: topic.title.clone(),
                    topic_type: topic.topic_type.clone(),
                    value: entry.value,
                    formatted_value: entry.formatted_value.clone(),
                    keyword: keyword.clone(),
                });
            }
        }

        debug!(rows = rows.len(), "related topics fetched");
        Ok(rows)
    }

    /// Fetch the related-queries table
    ///
    /// Same single-keyword restriction and empty-table behavior as
    /// [`TrendsClient::related_topics`].
    ///
    /// # Errors
    ///
    /// `Remote` for non-2xx responses, `Parse` for envelope/schema
    /// mismatches, including entries without query text.
    pub async fn related_queries(
        &self,
        query: &TrendsQuery,
        widgets: &WidgetSet,
    ) -> Result<Vec<QueryRow>> {
        if !query.single_keyword() {
            debug!("skipping related queries: multi-keyword comparison");
            return Ok(Vec::new());
        }
        let Some(widget) = widgets.related_queries() else {
            return Ok(Vec::new());
        };

        let envelope = self.fetch_related(query, widget).await?;
        let keyword = &query.keywords()[0];

        let mut rows = Vec::new();
        for (index, list) in envelope.default.ranked_list.iter().enumerate() {
            let section = section_for(index);
            for entry in &list.ranked_keyword {
                let text = entry.query.as_ref().ok_or_else(|| {
                    TrendsError::parse("related-queries entry is missing its query text")
                })?;
                rows.push(QueryRow {
                    section,
                    query: text.clone(),
                    value: entry.value,
                    formatted_value: entry.formatted_value.clone(),
                    keyword: keyword.clone(),
                });
            }
        }

        debug!(rows = rows.len(), "related queries fetched");
        Ok(rows)
    }

    async fn fetch_related(
        &self,
        query: &TrendsQuery,
        widget: &Widget,
    ) -> Result<RelatedEnvelope> {
        let params = [
            ("hl", query.locale().to_string()),
            ("tz", query.timezone().to_string()),
            ("req", request_json(widget)?),
            ("token", widget.token.clone()),
        ];
        let body = self
            .get_api(RELATEDSEARCHES_PATH, query.locale(), &params)
            .await?;
        Self::parse_enveloped(&body, WIDGET_PREFIX)
    }
}
