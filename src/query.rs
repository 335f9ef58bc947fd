//! Query construction and input validation
//!
//! A [`TrendsQuery`] is the validated parameter set for one call against the
//! Trends service. Construction checks everything against the static
//! reference tables in [`crate::refdata`] so that a bad parameter never
//! reaches the network.

use crate::error::{Result, TrendsError};
use crate::models::{ComparisonItem, GoogleProduct, TimeRange};
use crate::refdata;

/// Maximum number of keywords (and geos) the service compares in one call
pub const MAX_ITEMS: usize = 5;

/// Validated parameter set for one Trends call
#[derive(Debug, Clone)]
pub struct TrendsQuery {
    keywords: Vec<String>,
    geos: Vec<String>,
    time: TimeRange,
    category: i32,
    product: GoogleProduct,
    hl: String,
    tz: i32,
}

impl TrendsQuery {
    /// Validate keywords, geos and the time string into a query
    ///
    /// An empty `geos` slice means worldwide. Category defaults to 0 (all
    /// categories), product to web search, locale to `en-US` and timezone
    /// offset to 0; override them with the `with_*` methods.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` when the keyword/geo lengths are incompatible,
    ///   a list exceeds [`MAX_ITEMS`], or a keyword is blank
    /// - `InvalidTimeFormat` when `time` matches no recognized grammar
    /// - `InvalidGeo` when a geo code is not in the reference table
    pub fn new(keywords: &[&str], geos: &[&str], time: &str) -> Result<Self> {
        let keywords: Vec<String> = keywords.iter().map(|s| s.to_string()).collect();
        // Worldwide when no geo was given.
        let geos: Vec<String> = if geos.is_empty() {
            vec![String::new()]
        } else {
            geos.iter().map(|s| s.to_string()).collect()
        };

        let (klen, glen) = (keywords.len(), geos.len());
        if klen == 0 {
            return Err(TrendsError::invalid_argument(
                "at least one keyword is required",
            ));
        }
        if klen % glen != 0 && glen % klen != 0 {
            return Err(TrendsError::invalid_argument(format!(
                "keyword and geo lengths are incompatible: {klen} keywords cannot be paired \
                 with {glen} geos (one must be a multiple of the other)"
            )));
        }
        if klen > MAX_ITEMS {
            return Err(TrendsError::invalid_argument(format!(
                "too many keywords: {klen} (maximum {MAX_ITEMS})"
            )));
        }
        if glen > MAX_ITEMS {
            return Err(TrendsError::invalid_argument(format!(
                "too many geos: {glen} (maximum {MAX_ITEMS})"
            )));
        }
        if let Some(blank) = keywords.iter().position(|k| k.trim().is_empty()) {
            return Err(TrendsError::invalid_argument(format!(
                "keyword {} is blank",
                blank + 1
            )));
        }

        let time = TimeRange::parse(time)?;

        for geo in &geos {
            if !refdata::is_valid_geo(geo) {
                return Err(TrendsError::InvalidGeo(geo.clone()));
            }
        }

        Ok(Self {
            keywords,
            geos,
            time,
            category: 0,
            product: GoogleProduct::Web,
            hl: "en-US".to_string(),
            tz: 0,
        })
    }

    /// Set the category, validating it against the category table
    ///
    /// # Errors
    ///
    /// Returns `InvalidCategory` naming the offending id.
    pub fn with_category(mut self, category: i32) -> Result<Self> {
        if !refdata::is_valid_category(category) {
            return Err(TrendsError::InvalidCategory(category));
        }
        self.category = category;
        Ok(self)
    }

    /// Set the product scope
    pub fn with_product(mut self, product: GoogleProduct) -> Self {
        self.product = product;
        self
    }

    /// Set the response locale, validating it against the locale table
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for locales the service does not know.
    pub fn with_locale(mut self, hl: &str) -> Result<Self> {
        if !refdata::is_valid_locale(hl) {
            return Err(TrendsError::invalid_argument(format!(
                "unknown locale {hl:?}"
            )));
        }
        self.hl = hl.to_string();
        Ok(self)
    }

    /// Set the timezone offset in minutes west of UTC
    pub fn with_timezone(mut self, tz: i32) -> Self {
        self.tz = tz;
        self
    }

    /// Broadcast keywords against geos into the comparison rows the service
    /// evaluates jointly
    ///
    /// The longer list's length is a multiple of the shorter's (validated at
    /// construction); the shorter list cycles so item `i` pairs
    /// `keyword[i % klen]` with `geo[i % glen]`.
    pub fn comparison_items(&self) -> Vec<ComparisonItem> {
        let n = self.keywords.len().max(self.geos.len());
        let time = self.time.as_wire();
        (0..n)
            .map(|i| ComparisonItem {
                keyword: self.keywords[i % self.keywords.len()].clone(),
                geo: self.geos[i % self.geos.len()].clone(),
                time: time.clone(),
            })
            .collect()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn geos(&self) -> &[String] {
        &self.geos
    }

    pub fn time(&self) -> TimeRange {
        self.time
    }

    pub fn category(&self) -> i32 {
        self.category
    }

    pub fn product(&self) -> GoogleProduct {
        self.product
    }

    pub fn locale(&self) -> &str {
        &self.hl
    }

    pub fn timezone(&self) -> i32 {
        self.tz
    }

    /// Whether the query is eligible for related-topics/queries breakdowns
    ///
    /// The service only supports them for single-keyword queries.
    pub fn single_keyword(&self) -> bool {
        self.keywords.len() == 1
    }

    /// True when every geo is the worldwide sentinel
    pub fn worldwide(&self) -> bool {
        self.geos.iter().all(|g| g.is_empty())
    }
}
