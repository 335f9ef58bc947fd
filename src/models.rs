// Core data structures for the gtrends client

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendsError};

/// Google product scope for a trends query
///
/// Restricts the search corpus the popularity signal is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GoogleProduct {
    /// Web search (the service default)
    #[default]
    Web,
    /// News search
    News,
    /// Image search
    Images,
    /// Google Shopping (wire name kept from the service)
    Froogle,
    /// YouTube search
    Youtube,
}

impl GoogleProduct {
    /// Parse from user input, accepting the names the service UI exposes
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "" | "web" => Ok(Self::Web),
            "news" => Ok(Self::News),
            "images" => Ok(Self::Images),
            "froogle" | "shopping" => Ok(Self::Froogle),
            "youtube" => Ok(Self::Youtube),
            other => Err(TrendsError::invalid_argument(format!(
                "unknown product scope {other:?} (expected web, news, images, froogle or youtube)"
            ))),
        }
    }

    /// Wire value for the explore request's `property` field
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Web => "",
            Self::News => "news",
            Self::Images => "images",
            Self::Froogle => "froogle",
            Self::Youtube => "youtube",
        }
    }

    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::News => "news",
            Self::Images => "images",
            Self::Froogle => "froogle",
            Self::Youtube => "youtube",
        }
    }
}

impl std::fmt::Display for GoogleProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

lazy_static! {
    static ref RE_HOURS: Regex = Regex::new(r"^now (\d{1,2})-H$").unwrap();
    static ref RE_DAYS: Regex = Regex::new(r"^now (\d{1,2})-d$").unwrap();
    static ref RE_MONTHS: Regex = Regex::new(r"^today (\d{1,2})-m$").unwrap();
    static ref RE_YEARS: Regex = Regex::new(r"^today\+(\d{1,2})-y$").unwrap();
    static ref RE_CUSTOM: Regex =
        Regex::new(r"^(\d{4}-\d{2}-\d{2}) (\d{4}-\d{2}-\d{2})$").unwrap();
}

/// Time range for a trends query
///
/// Parsed from the string grammar the service expects:
/// `"now N-H"`, `"now N-d"`, `"today N-m"`, `"today+N-y"`, `"all"`,
/// or an explicit `"YYYY-MM-DD YYYY-MM-DD"` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    /// Trailing hour window (`now 1-H`, `now 4-H`)
    PastHours(u32),
    /// Trailing day window (`now 1-d`, `now 7-d`)
    PastDays(u32),
    /// Trailing month window (`today 1-m`, `today 3-m`, `today 12-m`)
    PastMonths(u32),
    /// Trailing year window (`today+5-y`)
    PastYears(u32),
    /// Full history since service inception (2004)
    All,
    /// Explicit inclusive date range
    Custom(NaiveDate, NaiveDate),
}

impl TimeRange {
    /// Parse a time string, rejecting anything outside the grammar
    ///
    /// # Errors
    ///
    /// Returns `TrendsError::InvalidTimeFormat` for unrecognized shapes and
    /// for explicit ranges whose start date is after the end date.
    pub fn parse(s: &str) -> Result<Self> {
        let bad = || TrendsError::InvalidTimeFormat(s.to_string());

        if s == "all" {
            return Ok(Self::All);
        }
        if let Some(caps) = RE_HOURS.captures(s) {
            return caps[1].parse().map(Self::PastHours).map_err(|_| bad());
        }
        if let Some(caps) = RE_DAYS.captures(s) {
            return caps[1].parse().map(Self::PastDays).map_err(|_| bad());
        }
        if let Some(caps) = RE_MONTHS.captures(s) {
            return caps[1].parse().map(Self::PastMonths).map_err(|_| bad());
        }
        if let Some(caps) = RE_YEARS.captures(s) {
            return caps[1].parse().map(Self::PastYears).map_err(|_| bad());
        }
        if let Some(caps) = RE_CUSTOM.captures(s) {
            let start = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d").map_err(|_| bad())?;
            let end = NaiveDate::parse_from_str(&caps[2], "%Y-%m-%d").map_err(|_| bad())?;
            if start > end {
                return Err(bad());
            }
            return Ok(Self::Custom(start, end));
        }
        Err(bad())
    }

    /// Reproduce the exact wire string the service expects
    pub fn as_wire(&self) -> String {
        match self {
            Self::PastHours(n) => format!("now {n}-H"),
            Self::PastDays(n) => format!("now {n}-d"),
            Self::PastMonths(n) => format!("today {n}-m"),
            Self::PastYears(n) => format!("today+{n}-y"),
            Self::All => "all".to_string(),
            Self::Custom(start, end) => format!("{start} {end}"),
        }
    }

    /// Whether the service reports this window at sub-day granularity
    ///
    /// The `now`-form windows come back with hourly (or finer) timestamps;
    /// everything else is daily or coarser.
    pub fn is_hourly(&self) -> bool {
        matches!(self, Self::PastHours(_) | Self::PastDays(_))
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

/// One paired (keyword, geo, time) combination the service evaluates jointly
///
/// Field names match the explore request's `comparisonItem` wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonItem {
    pub keyword: String,
    pub geo: String,
    pub time: String,
}

/// Section tag for related-topics and related-queries rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelatedSection {
    /// Most popular over the window
    Top,
    /// Largest recent growth ("Breakout" when growth is unbounded)
    Rising,
}

impl RelatedSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Rising => "rising",
        }
    }
}

impl std::fmt::Display for RelatedSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One point of the long-form interest-over-time table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRow {
    /// Point timestamp; hourly windows keep their sub-day component
    pub date: DateTime<Utc>,
    /// Human-readable time label as reported by the service
    pub formatted_time: String,
    pub keyword: String,
    pub geo: String,
    /// Relative popularity, 0–100
    pub hits: u32,
    /// Set when the service marks the point as incomplete or low-volume
    pub partial: bool,
}

/// One row of a regional breakdown (country/region, DMA or city resolution)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRow {
    /// Service geo code for the area (e.g. `US-CA`, DMA id, city id)
    pub geo_code: String,
    /// Display name for the area
    pub geo_name: String,
    pub keyword: String,
    /// Relative popularity; `None` when the service reports no data
    pub hits: Option<u32>,
}

/// One related-topic row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicRow {
    pub section: RelatedSection,
    /// Knowledge-graph topic id (e.g. `/m/0d07ph`)
    pub mid: String,
    pub title: String,
    /// Topic category as reported by the service (e.g. "Programming language")
    pub topic_type: String,
    /// Relative value; absent for some rising entries
    pub value: Option<i64>,
    /// Display form of the value ("100", "+250%", "Breakout")
    pub formatted_value: String,
    pub keyword: String,
}

/// One related-query row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRow {
    pub section: RelatedSection,
    pub query: String,
    pub value: Option<i64>,
    pub formatted_value: String,
    pub keyword: String,
}

/// Type tag carried by the result bundle so renderers can pattern-match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BundleKind {
    Trends,
}

/// Immutable composite of the six result tables for one query
#[derive(Debug, Clone, Serialize)]
pub struct TrendsBundle {
    kind: BundleKind,
    pub interest_over_time: Vec<InterestRow>,
    pub interest_by_region: Vec<RegionRow>,
    pub interest_by_dma: Vec<RegionRow>,
    pub interest_by_city: Vec<RegionRow>,
    pub related_topics: Vec<TopicRow>,
    pub related_queries: Vec<QueryRow>,
}

impl TrendsBundle {
    /// Assemble a bundle from the four fetchers' outputs
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        interest_over_time: Vec<InterestRow>,
        interest_by_region: Vec<RegionRow>,
        interest_by_dma: Vec<RegionRow>,
        interest_by_city: Vec<RegionRow>,
        related_topics: Vec<TopicRow>,
        related_queries: Vec<QueryRow>,
    ) -> Self {
        Self {
            kind: BundleKind::Trends,
            interest_over_time,
            interest_by_region,
            interest_by_dma,
            interest_by_city,
            related_topics,
            related_queries,
        }
    }

    /// Type tag for downstream dispatch
    pub fn kind(&self) -> BundleKind {
        self.kind
    }
}

/// Row type that can be exported as one delimited-text record
pub trait CsvRecord {
    /// Comma-separated column names
    fn header() -> &'static str;

    /// Comma-separated, escaped field values
    fn record(&self) -> String;
}

/// Quote a field for delimited-text output when it needs it
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render rows as delimited text with a header line
pub fn to_csv<R: CsvRecord>(rows: &[R]) -> String {
    let mut out = String::from(R::header());
    out.push('\n');
    for row in rows {
        out.push_str(&row.record());
        out.push('\n');
    }
    out
}

impl CsvRecord for InterestRow {
    fn header() -> &'static str {
        "date,keyword,geo,hits,partial"
    }

    fn record(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.date.to_rfc3339(),
            csv_escape(&self.keyword),
            csv_escape(&self.geo),
            self.hits,
            self.partial
        )
    }
}

impl CsvRecord for RegionRow {
    fn header() -> &'static str {
        "geo_code,geo_name,keyword,hits"
    }

    fn record(&self) -> String {
        format!(
            "{},{},{},{}",
            csv_escape(&self.geo_code),
            csv_escape(&self.geo_name),
            csv_escape(&self.keyword),
            self.hits.map(|v| v.to_string()).unwrap_or_default()
        )
    }
}

impl CsvRecord for TopicRow {
    fn header() -> &'static str {
        "section,mid,title,topic_type,value,formatted_value,keyword"
    }

    fn record(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.section,
            csv_escape(&self.mid),
            csv_escape(&self.title),
            csv_escape(&self.topic_type),
            self.value.map(|v| v.to_string()).unwrap_or_default(),
            csv_escape(&self.formatted_value),
            csv_escape(&self.keyword)
        )
    }
}

impl CsvRecord for QueryRow {
    fn header() -> &'static str {
        "section,query,value,formatted_value,keyword"
    }

    fn record(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.section,
            csv_escape(&self.query),
            self.value.map(|v| v.to_string()).unwrap_or_default(),
            csv_escape(&self.formatted_value),
            csv_escape(&self.keyword)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_parse() {
        assert_eq!(GoogleProduct::parse("web").unwrap(), GoogleProduct::Web);
        assert_eq!(GoogleProduct::parse("").unwrap(), GoogleProduct::Web);
        assert_eq!(
            GoogleProduct::parse("YouTube").unwrap(),
            GoogleProduct::Youtube
        );
        assert!(GoogleProduct::parse("maps").is_err());
    }

    #[test]
    fn test_product_wire_values() {
        assert_eq!(GoogleProduct::Web.as_wire(), "");
        assert_eq!(GoogleProduct::Froogle.as_wire(), "froogle");
    }

    #[test]
    fn test_time_range_relative_forms() {
        assert_eq!(TimeRange::parse("now 1-H").unwrap(), TimeRange::PastHours(1));
        assert_eq!(TimeRange::parse("now 7-d").unwrap(), TimeRange::PastDays(7));
        assert_eq!(
            TimeRange::parse("today 12-m").unwrap(),
            TimeRange::PastMonths(12)
        );
        assert_eq!(
            TimeRange::parse("today+5-y").unwrap(),
            TimeRange::PastYears(5)
        );
        assert_eq!(TimeRange::parse("all").unwrap(), TimeRange::All);
    }

    #[test]
    fn test_time_range_custom_distinct_from_relative() {
        let custom = TimeRange::parse("2010-01-01 2010-04-03").unwrap();
        let relative = TimeRange::parse("today+5-y").unwrap();
        assert_ne!(custom, relative);
        assert!(matches!(custom, TimeRange::Custom(_, _)));
    }

    #[test]
    fn test_time_range_rejects_garbage() {
        for bad in ["bogus", "now 1-X", "today 3m", "2010-01-01", "2010-13-40 2011-01-01"] {
            assert!(
                matches!(TimeRange::parse(bad), Err(TrendsError::InvalidTimeFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_time_range_rejects_inverted_range() {
        assert!(TimeRange::parse("2020-05-01 2020-01-01").is_err());
    }

    #[test]
    fn test_time_range_wire_round_trip() {
        for s in ["now 4-H", "now 7-d", "today 3-m", "today+5-y", "all", "2010-01-01 2010-04-03"] {
            assert_eq!(TimeRange::parse(s).unwrap().as_wire(), s);
        }
    }

    #[test]
    fn test_hourly_granularity_flag() {
        assert!(TimeRange::parse("now 4-H").unwrap().is_hourly());
        assert!(TimeRange::parse("now 7-d").unwrap().is_hourly());
        assert!(!TimeRange::parse("today 3-m").unwrap().is_hourly());
        assert!(!TimeRange::parse("all").unwrap().is_hourly());
    }

    #[test]
    fn test_bundle_kind_tag() {
        let bundle = TrendsBundle::new(vec![], vec![], vec![], vec![], vec![], vec![]);
        assert_eq!(bundle.kind(), BundleKind::Trends);
    }

    #[test]
    fn test_csv_escaping() {
        let row = QueryRow {
            section: RelatedSection::Rising,
            query: "rust, the language".to_string(),
            value: None,
            formatted_value: "Breakout".to_string(),
            keyword: "rust".to_string(),
        };
        let csv = to_csv(&[row]);
        assert!(csv.starts_with("section,query,value,formatted_value,keyword\n"));
        assert!(csv.contains("\"rust, the language\""));
        assert!(csv.contains("Breakout"));
    }
}
