use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gtrends::client::{ClientConfig, TrendsClient};
use gtrends::models::{self, GoogleProduct, TrendsBundle};
use gtrends::query::TrendsQuery;

#[derive(Parser)]
#[command(
    name = "gtrends",
    version,
    about = "Query Google Trends for keyword popularity signals",
    long_about = None
)]
struct Cli {
    /// Keyword(s) to compare (up to 5)
    #[arg(short, long, required = true, num_args = 1..=5)]
    keyword: Vec<String>,

    /// Geo code(s): ISO country or subdivision, empty for worldwide (up to 5)
    #[arg(short, long)]
    geo: Vec<String>,

    /// Time range, e.g. "now 7-d", "today 12-m", "all", "2010-01-01 2010-04-03"
    #[arg(short, long, default_value = "today 12-m")]
    time: String,

    /// Category id (0 = all categories)
    #[arg(short, long, default_value_t = 0)]
    category: i32,

    /// Product scope: web, news, images, froogle, youtube
    #[arg(short, long, default_value = "web")]
    product: String,

    /// Response locale
    #[arg(long, default_value = "en-US")]
    hl: String,

    /// Timezone offset in minutes west of UTC
    #[arg(long, default_value_t = 0)]
    tz: i32,

    /// Which table to print
    #[arg(long, value_enum, default_value_t = OutputTable::InterestOverTime)]
    table: OutputTable,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputTable {
    InterestOverTime,
    InterestByRegion,
    InterestByDma,
    InterestByCity,
    RelatedTopics,
    RelatedQueries,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

fn render(bundle: &TrendsBundle, table: OutputTable, format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Csv => match table {
            OutputTable::InterestOverTime => models::to_csv(&bundle.interest_over_time),
            OutputTable::InterestByRegion => models::to_csv(&bundle.interest_by_region),
            OutputTable::InterestByDma => models::to_csv(&bundle.interest_by_dma),
            OutputTable::InterestByCity => models::to_csv(&bundle.interest_by_city),
            OutputTable::RelatedTopics => models::to_csv(&bundle.related_topics),
            OutputTable::RelatedQueries => models::to_csv(&bundle.related_queries),
        },
        OutputFormat::Json => match table {
            OutputTable::InterestOverTime => {
                serde_json::to_string_pretty(&bundle.interest_over_time)?
            }
            OutputTable::InterestByRegion => {
                serde_json::to_string_pretty(&bundle.interest_by_region)?
            }
            OutputTable::InterestByDma => serde_json::to_string_pretty(&bundle.interest_by_dma)?,
            OutputTable::InterestByCity => serde_json::to_string_pretty(&bundle.interest_by_city)?,
            OutputTable::RelatedTopics => serde_json::to_string_pretty(&bundle.related_topics)?,
            OutputTable::RelatedQueries => serde_json::to_string_pretty(&bundle.related_queries)?,
        },
    };
    Ok(out)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let keywords: Vec<&str> = cli.keyword.iter().map(String::as_str).collect();
    let geos: Vec<&str> = cli.geo.iter().map(String::as_str).collect();

    let query = TrendsQuery::new(&keywords, &geos, &cli.time)?
        .with_category(cli.category)?
        .with_product(GoogleProduct::parse(&cli.product)?)
        .with_locale(&cli.hl)?
        .with_timezone(cli.tz);

    let client = TrendsClient::with_config(ClientConfig::from_env())?;
    let bundle = client.query(&query).await?;

    print!("{}", render(&bundle, cli.table, cli.format)?);
    Ok(())
}
