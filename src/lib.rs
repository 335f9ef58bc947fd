//! gtrends - Google Trends client
//!
//! Queries the Trends web service for keyword popularity signals and
//! reshapes the prefixed-JSON payloads into consistent tables: interest
//! over time, interest by region/DMA/city, related topics and related
//! queries.
//!
//! # Architecture
//!
//! - [`query`] - Parameter validation and broadcast pairing
//! - [`client`] - Widget (token) exchange and the four table fetchers
//! - [`models`] - Result rows, tables and the composite bundle
//! - [`refdata`] - Static country/category/locale reference tables
//! - [`error`] - Unified error type
//!
//! Each call is stateless end to end: widgets are exchanged fresh, nothing
//! is cached, and nothing outlives the call.
//!
//! # Example
//!
//! ```no_run
//! use gtrends::client::TrendsClient;
//! use gtrends::query::TrendsQuery;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let query = TrendsQuery::new(&["rust"], &["US"], "today 12-m")?;
//!     let client = TrendsClient::new()?;
//!     let bundle = client.query(&query).await?;
//!     println!("{} time-series rows", bundle.interest_over_time.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod refdata;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::client::{ClientConfig, TrendsClient};
    pub use crate::error::{Result, TrendsError};
    pub use crate::models::{
        BundleKind, GoogleProduct, InterestRow, QueryRow, RegionRow, RelatedSection, TimeRange,
        TopicRow, TrendsBundle,
    };
    pub use crate::query::TrendsQuery;
}

// Direct re-exports for convenience
pub use client::TrendsClient;
pub use error::{Result, TrendsError};
pub use models::{GoogleProduct, TimeRange, TrendsBundle};
pub use query::TrendsQuery;
