//! Interest-over-time fetcher
//!
//! Consumes the TIMESERIES widget. The service returns one record per date
//! with a value array holding one entry per comparison item; this module
//! reshapes that wide form into the long row-per-(date, keyword) table the
//! caller sees. Sparse or still-accumulating points arrive flagged with
//! `isPartial` and are kept, not dropped.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::client::widgets::{request_json, WidgetSet};
use crate::client::{TrendsClient, WIDGET_PREFIX};
use crate::error::{Result, TrendsError};
use crate::models::InterestRow;
use crate::query::TrendsQuery;

const MULTILINE_PATH: &str = "/trends/api/widgetdata/multiline";

#[derive(Debug, Deserialize)]
struct MultilineEnvelope {
    default: MultilineDefault,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultilineDefault {
    #[serde(default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelinePoint {
    /// Unix seconds, as a decimal string
    time: String,
    formatted_time: String,
    value: Vec<u32>,
    #[serde(default)]
    is_partial: bool,
}

impl TrendsClient {
    /// Fetch and reshape the time series for all comparison items
    ///
    /// # Errors
    ///
    /// `Remote` for non-2xx responses, `Parse` for envelope/schema
    /// mismatches or value arrays shorter than the comparison set.
    pub async fn interest_over_time(
        &self,
        query: &TrendsQuery,
        widgets: &WidgetSet,
    ) -> Result<Vec<InterestRow>> {
        let widget = widgets.time_series()?;
        let items = query.comparison_items();

        let params = [
            ("hl", query.locale().to_string()),
            ("tz", query.timezone().to_string()),
            ("req", request_json(widget)?),
            ("token", widget.token.clone()),
        ];
        let body = self.get_api(MULTILINE_PATH, query.locale(), &params).await?;
        let envelope: MultilineEnvelope = Self::parse_enveloped(&body, WIDGET_PREFIX)?;

        let mut rows = Vec::with_capacity(envelope.default.timeline_data.len() * items.len());
        for point in &envelope.default.timeline_data {
            let date = parse_timestamp(&point.time)?;
            for (i, item) in items.iter().enumerate() {
                let hits = point.value.get(i).copied().ok_or_else(|| {
                    TrendsError::parse(format!(
                        "timeline point at {} has {} values for {} comparison items",
                        point.time,
                        point.value.len(),
                        items.len()
                    ))
                })?;
                rows.push(InterestRow {
                    date,
                    formatted_time: point.formatted_time.clone(),
                    keyword: item.keyword.clone(),
                    geo: item.geo.clone(),
                    hits,
                    partial: point.is_partial,
                });
            }
        }

        debug!(
            points = envelope.default.timeline_data.len(),
            rows = rows.len(),
            "interest over time fetched"
        );
        Ok(rows)
    }
}

/// Parse the service's Unix-seconds string into a UTC timestamp
///
/// Hourly widgets keep their sub-day component; daily widgets come out at
/// midnight UTC.
fn parse_timestamp(time: &str) -> Result<DateTime<Utc>> {
    let secs: i64 = time
        .parse()
        .map_err(|_| TrendsError::parse(format!("bad timeline timestamp {time:?}")))?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .ok_or_else(|| TrendsError::parse(format!("timeline timestamp {time:?} out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_daily() {
        let date = parse_timestamp("1262304000").unwrap(); // 2010-01-01 00:00:00 UTC
        assert_eq!(date.to_rfc3339(), "2010-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_keeps_hour() {
        let date = parse_timestamp("1262307600").unwrap(); // 2010-01-01 01:00:00 UTC
        assert_eq!(date.hour(), 1);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(matches!(
            parse_timestamp("not-a-number"),
            Err(TrendsError::Parse(_))
        ));
    }

    #[test]
    fn test_timeline_point_schema() {
        let json = r#"{
            "time": "1573776000",
            "formattedTime": "Nov 15, 2019",
            "formattedAxisTime": "Nov 15",
            "value": [61, 14],
            "hasData": [true, true],
            "formattedValue": ["61", "14"],
            "isPartial": true
        }"#;
        let point: TimelinePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.value, vec![61, 14]);
        assert!(point.is_partial);
    }

    #[test]
    fn test_timeline_point_partial_defaults_false() {
        let json = r#"{"time": "1573776000", "formattedTime": "Nov 15, 2019", "value": [61]}"#;
        let point: TimelinePoint = serde_json::from_str(json).unwrap();
        assert!(!point.is_partial);
    }
}
