//! Interest-by-region fetcher
//!
//! Consumes the GEO_MAP widget. One underlying endpoint serves three
//! resolutions — country/region, metro (DMA) and city — selected by
//! rewriting the `resolution` field of the widget's request before echoing
//! it back. A resolution the service does not support for the queried geo
//! is an empty table, not an error.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::widgets::{request_json, Widget, WidgetSet};
use crate::client::{TrendsClient, WIDGET_PREFIX};
use crate::error::{Result, TrendsError};
use crate::models::RegionRow;
use crate::query::TrendsQuery;

const COMPAREDGEO_PATH: &str = "/trends/api/widgetdata/comparedgeo";

#[derive(Debug, Deserialize)]
struct GeoEnvelope {
    default: GeoDefault,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoDefault {
    #[serde(default)]
    geo_map_data: Vec<GeoPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoPoint {
    geo_code: String,
    geo_name: String,
    #[serde(default)]
    value: Vec<u32>,
    #[serde(default)]
    has_data: Vec<bool>,
}

impl TrendsClient {
    /// Fetch the three regional breakdown tables
    ///
    /// Returns `(region, dma, city)`. The first resolution is `COUNTRY` for
    /// worldwide queries and `REGION` otherwise, matching what the service
    /// UI requests.
    ///
    /// # Errors
    ///
    /// `Remote` for non-2xx responses other than the 400 the service uses
    /// for unsupported resolutions, `Parse` for envelope/schema mismatches.
    pub async fn interest_by_region(
        &self,
        query: &TrendsQuery,
        widgets: &WidgetSet,
    ) -> Result<(Vec<RegionRow>, Vec<RegionRow>, Vec<RegionRow>)> {
        let widget = widgets.geo_map()?;

        let top = if query.worldwide() { "COUNTRY" } else { "REGION" };
        let region = self.fetch_resolution(query, widget, top).await?;
        let dma = self.fetch_resolution(query, widget, "DMA").await?;
        let city = self.fetch_resolution(query, widget, "CITY").await?;

        Ok((region, dma, city))
    }

    /// Fetch one resolution of the regional breakdown
    async fn fetch_resolution(
        &self,
        query: &TrendsQuery,
        widget: &Widget,
        resolution: &str,
    ) -> Result<Vec<RegionRow>> {
        let mut widget = widget.clone();
        let request = widget.request.as_object_mut().ok_or_else(|| {
            TrendsError::parse("GEO_MAP widget request is not a JSON object")
        })?;
        request.insert("resolution".to_string(), json!(resolution));

        let params = [
            ("hl", query.locale().to_string()),
            ("tz", query.timezone().to_string()),
            ("req", request_json(&widget)?),
            ("token", widget.token.clone()),
        ];
        let body = match self
            .get_api(COMPAREDGEO_PATH, query.locale(), &params)
            .await
        {
            Ok(body) => body,
            // The service answers 400 for resolutions it cannot break the
            // queried geo down into; that is an empty table, not a failure.
            Err(TrendsError::Remote { status: 400 }) => {
                debug!(resolution, "resolution not supported for this geo");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let envelope: GeoEnvelope = Self::parse_enveloped(&body, WIDGET_PREFIX)?;
        let items = query.comparison_items();

        let mut rows = Vec::with_capacity(envelope.default.geo_map_data.len() * items.len());
        for point in &envelope.default.geo_map_data {
            for (i, item) in items.iter().enumerate() {
                let has_data = point.has_data.get(i).copied().unwrap_or(true);
                let hits = if has_data {
                    point.value.get(i).copied()
                } else {
                    None
                };
                rows.push(RegionRow {
                    geo_code: point.geo_code.clone(),
                    geo_name: point.geo_name.clone(),
                    keyword: item.keyword.clone(),
                    hits,
                });
            }
        }

        debug!(resolution, rows = rows.len(), "regional breakdown fetched");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_schema() {
        let json = r#"{
            "geoCode": "US-CA",
            "geoName": "California",
            "value": [100],
            "formattedValue": ["100"],
            "hasData": [true],
            "maxValueIndex": 0
        }"#;
        let point: GeoPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.geo_code, "US-CA");
        assert_eq!(point.value, vec![100]);
    }

    #[test]
    fn test_empty_geo_map_data_allowed() {
        let envelope: GeoEnvelope = serde_json::from_str(r#"{"default":{}}"#).unwrap();
        assert!(envelope.default.geo_map_data.is_empty());
    }
}
