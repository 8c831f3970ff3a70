mod terminal_map;

use address_locator_core::{
    AddressForm, AddressResolver, Credentials, ElasticsearchStore, SearchOutcome,
    SearchServiceConfig, SearchSession, DEFAULT_INDEX,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use terminal_map::TerminalMap;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "address-locator", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Elasticsearch base URL
    #[arg(long, env = "ELASTIC_URL", default_value = "http://localhost:9200")]
    elastic_url: String,

    /// Street index holding the nested house numbers
    #[arg(long, env = "ELASTIC_INDEX", default_value = DEFAULT_INDEX)]
    index: String,

    /// Basic auth credentials as `username:password`
    #[arg(long, env = "ELASTIC_CREDENTIALS", hide_env_values = true)]
    credentials: Option<String>,

    /// Request timeout in seconds; the HTTP client default applies when unset.
    #[arg(long, env = "ELASTIC_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Locate an address given field by field.
    Search {
        #[arg(long)]
        department: String,
        #[arg(long)]
        province: String,
        #[arg(long)]
        district: String,
        /// Street name followed by the door number, e.g. "AV. AREQUIPA 1234".
        #[arg(long)]
        street: String,
    },
    /// Locate "<department>, <province>, <district>, <street> <number>".
    Locate {
        address: String,
    },
    /// Read one complete address per line from stdin, keeping a single marker.
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = SearchServiceConfig::new(&cli.elastic_url).with_index(&cli.index);
    if let Some(raw) = &cli.credentials {
        config = config.with_credentials(Credentials::parse(raw)?);
    } else {
        warn!("no search credentials configured; sending unauthenticated requests");
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config = config.with_timeout_secs(timeout_secs);
    }

    let store = ElasticsearchStore::new(&config)?;
    info!(
        version = app_version,
        url = %store.search_url(),
        started_at = %Utc::now().to_rfc3339(),
        "address-locator boot"
    );

    let session = SearchSession::new(AddressResolver::new(store), TerminalMap::new());
    let mut form = AddressForm::new();

    match cli.command {
        Command::Search {
            department,
            province,
            district,
            street,
        } => {
            form.set_department(department);
            form.set_province(province);
            form.set_district(district);
            form.set_street(street);

            let outcome = session.search_address(&form).await;
            report(&session, outcome)?;
        }
        Command::Locate { address } => {
            form.set_complete_address(address);

            let outcome = session.search_complete_address(&form).await;
            report(&session, outcome)?;
        }
        Command::Interactive => {
            println!(
                "enter addresses as `department, province, district, street number` (ctrl-d to quit)"
            );
            let mut lines = BufReader::new(tokio::io::stdin()).lines();

            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                form.set_complete_address(line);

                let outcome = session.search_complete_address(&form).await;
                if let Err(error) = report(&session, outcome) {
                    println!("{error}");
                }
            }

            let (markers, center) = session
                .with_map(|map| (map.marker_count(), map.camera().map(|camera| camera.center)))
                .unwrap_or_default();
            match center {
                Some(center) => info!(markers, %center, "interactive session finished"),
                None => info!(markers, "interactive session finished without a match"),
            }
        }
    }

    Ok(())
}

fn report(
    session: &SearchSession<ElasticsearchStore, TerminalMap>,
    outcome: SearchOutcome,
) -> anyhow::Result<()> {
    match outcome {
        SearchOutcome::Focused(location) => {
            println!("found: {location}");
            Ok(())
        }
        SearchOutcome::Superseded => Ok(()),
        _ => {
            let message = session
                .error()
                .unwrap_or_else(|| format!("search ended with {outcome:?}"));
            anyhow::bail!(message)
        }
    }
}
