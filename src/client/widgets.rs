//! Widget (token) exchange against the explore endpoint
//!
//! Every query starts with one call to `trends/api/explore`, which trades
//! the comparison items for a list of widgets: opaque tokens plus the
//! request objects the widget-data endpoints expect. Widgets are ephemeral
//! and fetched fresh per call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::client::{TrendsClient, EXPLORE_PREFIX};
use crate::error::{Result, TrendsError};
use crate::models::ComparisonItem;
use crate::query::TrendsQuery;

const EXPLORE_PATH: &str = "/trends/api/explore";

/// Widget ids assigned by the service, one per fetchable sub-query
pub const WIDGET_TIMESERIES: &str = "TIMESERIES";
pub const WIDGET_GEO_MAP: &str = "GEO_MAP";
pub const WIDGET_RELATED_TOPICS: &str = "RELATED_TOPICS";
pub const WIDGET_RELATED_QUERIES: &str = "RELATED_QUERIES";

/// `req` payload for the explore call
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreRequest<'a> {
    comparison_item: &'a [ComparisonItem],
    category: i32,
    property: &'a str,
}

/// One widget from the explore response
///
/// `request` is kept as raw JSON: the widget-data endpoints expect it echoed
/// back verbatim (the region fetcher only rewrites its `resolution` field).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub request: Value,
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

/// The widgets the service issued for one comparison set
///
/// Time-series and region widgets are always present; the related widgets
/// are omitted by the service for multi-keyword comparisons.
#[derive(Debug, Clone)]
pub struct WidgetSet {
    widgets: Vec<Widget>,
}

impl WidgetSet {
    fn find(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// The time-series widget
    ///
    /// # Errors
    ///
    /// `Parse` when the explore response carried no such widget.
    pub fn time_series(&self) -> Result<&Widget> {
        self.find(WIDGET_TIMESERIES)
            .ok_or_else(|| TrendsError::parse("explore response has no TIMESERIES widget"))
    }

    /// The region-breakdown widget
    ///
    /// # Errors
    ///
    /// `Parse` when the explore response carried no such widget.
    pub fn geo_map(&self) -> Result<&Widget> {
        self.find(WIDGET_GEO_MAP)
            .ok_or_else(|| TrendsError::parse("explore response has no GEO_MAP widget"))
    }

    /// The related-topics widget, absent for multi-keyword comparisons
    pub fn related_topics(&self) -> Option<&Widget> {
        self.find(WIDGET_RELATED_TOPICS)
    }

    /// The related-queries widget, absent for multi-keyword comparisons
    pub fn related_queries(&self) -> Option<&Widget> {
        self.find(WIDGET_RELATED_QUERIES)
    }
}

impl TrendsClient {
    /// Exchange the comparison items for this call's widgets
    ///
    /// # Errors
    ///
    /// `Remote` for non-2xx responses, `Parse` when the body is missing the
    /// anti-scraping prefix or does not match the widget-list schema.
    pub async fn fetch_widgets(&self, query: &TrendsQuery) -> Result<WidgetSet> {
        let items = query.comparison_items();
        let req = ExploreRequest {
            comparison_item: &items,
            category: query.category(),
            property: query.product().as_wire(),
        };
        let req_json = serde_json::to_string(&req)
            .map_err(|e| TrendsError::parse(format!("explore request serialization: {e}")))?;

        let params = [
            ("hl", query.locale().to_string()),
            ("tz", query.timezone().to_string()),
            ("req", req_json),
        ];
        let body = self.get_api(EXPLORE_PATH, query.locale(), &params).await?;

        let response: ExploreResponse = Self::parse_enveloped(&body, EXPLORE_PREFIX)?;
        debug!(widgets = response.widgets.len(), "widget exchange complete");

        Ok(WidgetSet {
            widgets: response.widgets,
        })
    }
}

/// Serialize a widget's request object for a widget-data call
pub(crate) fn request_json(widget: &Widget) -> Result<String> {
    serde_json::to_string(&widget.request)
        .map_err(|e| TrendsError::parse(format!("widget request serialization: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn widget(id: &str) -> Widget {
        Widget {
            id: id.to_string(),
            token: format!("token-{id}"),
            request: json!({"resolution": "REGION"}),
        }
    }

    #[test]
    fn test_widget_set_lookup() {
        let set = WidgetSet {
            widgets: vec![widget(WIDGET_TIMESERIES), widget(WIDGET_GEO_MAP)],
        };
        assert!(set.time_series().is_ok());
        assert!(set.geo_map().is_ok());
        assert!(set.related_topics().is_none());
        assert!(set.related_queries().is_none());
    }

    #[test]
    fn test_missing_timeseries_is_parse_error() {
        let set = WidgetSet { widgets: vec![] };
        assert!(matches!(
            set.time_series().unwrap_err(),
            TrendsError::Parse(_)
        ));
    }

    #[test]
    fn test_explore_request_wire_shape() {
        let items = vec![ComparisonItem {
            keyword: "rust".to_string(),
            geo: "US".to_string(),
            time: "today 3-m".to_string(),
        }];
        let req = ExploreRequest {
            comparison_item: &items,
            category: 31,
            property: "",
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["comparisonItem"][0]["keyword"], "rust");
        assert_eq!(json["category"], 31);
        assert_eq!(json["property"], "");
    }

    #[test]
    fn test_widget_deserializes_without_token() {
        // Some widgets in real explore payloads carry no token; they must
        // not fail the whole exchange.
        let widget: Widget =
            serde_json::from_value(json!({"id": "HINTS", "request": {}})).unwrap();
        assert_eq!(widget.token, "");
    }
}
