mod display;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fecview_client::{HttpViewClient, ServiceConfig};
use fecview_compose::page::{DEFAULT_HOME_YEAR, DEFAULT_LINK_BASE};
use fecview_compose::rankings::PREVIEW_LEN;
use fecview_compose::{MissingCountPolicy, Navigator, PageOutcome, Pipeline, PipelineConfig};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Compose one page against a live view service and print it.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Page URL or path, e.g. `/view-object/?year=2020&bucket=candidates&id=P80000722`.
    page: String,

    /// Print the view model as JSON instead of a text card.
    #[arg(long)]
    json: bool,

    #[arg(long, env = "FECVIEW_SERVICE_URL", default_value = "http://localhost:8080")]
    service_url: String,

    /// Caller identifier sent with every request.
    #[arg(long, env = "FECVIEW_UID", default_value = "test007")]
    uid: String,

    /// Root for generated page links; relative page paths resolve against it.
    #[arg(long, env = "FECVIEW_LINK_BASE", default_value = DEFAULT_LINK_BASE)]
    link_base: String,

    /// Entries per dashboard panel; at least 1.
    #[arg(
        long,
        env = "FECVIEW_PREVIEW_LEN",
        default_value_t = PREVIEW_LEN,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    preview_len: usize,

    #[arg(long, env = "FECVIEW_HOME_YEAR", default_value = DEFAULT_HOME_YEAR)]
    home_year: String,

    /// `fail` hides a counterparty list with a missing count; `drop` skips the row.
    #[arg(long, env = "FECVIEW_MISSING_COUNTS", default_value_t = MissingCountPolicy::Fail)]
    missing_counts: MissingCountPolicy,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so `--json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::info!("fecview v{}", env!("CARGO_PKG_VERSION"));

    let service = HttpViewClient::new(&ServiceConfig {
        service_url: args.service_url.clone(),
        uid: args.uid.clone(),
    });
    let pipeline = Pipeline::new(
        Arc::new(service),
        PipelineConfig {
            link_base: args.link_base.clone(),
            preview_len: args.preview_len,
            home_year: args.home_year.clone(),
            missing_counts: args.missing_counts,
        },
    )
    .context("configuring page pipeline")?;

    let url = page_url(&args.page, &args.link_base)?;
    let token = Navigator::new().begin();
    let outcome = pipeline.render_url(&url, &token).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        display::print_outcome(&outcome);
    }

    if let PageOutcome::Failed { reason } = outcome {
        anyhow::bail!("page failed: {reason}");
    }
    Ok(())
}

/// Accept either an absolute page URL or a path under `link_base`.
fn page_url(page: &str, link_base: &str) -> anyhow::Result<Url> {
    match Url::parse(page) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(link_base).context("parsing link base")?;
            base.join(page)
                .with_context(|| format!("resolving {page} against {link_base}"))
        }
        Err(err) => Err(err).with_context(|| format!("parsing page url {page}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_page_resolves_against_link_base() {
        let url = page_url("/totals/?year=2020&category=rec", "http://localhost:8081").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/totals/?year=2020&category=rec");
    }

    #[test]
    fn absolute_page_is_kept() {
        let url = page_url("https://fec.example.org/", "http://localhost:8081").unwrap();
        assert_eq!(url.host_str(), Some("fec.example.org"));
    }

    #[test]
    fn args_parse_policy() {
        let args = Args::try_parse_from(["fecview", "/", "--missing-counts", "drop"]).unwrap();
        assert_eq!(args.missing_counts, MissingCountPolicy::Drop);
        assert!(!args.json);
    }

    #[test]
    fn zero_preview_len_is_refused() {
        assert!(Args::try_parse_from(["fecview", "/", "--preview-len", "0"]).is_err());
        let args = Args::try_parse_from(["fecview", "/", "--preview-len", "5"]).unwrap();
        assert_eq!(args.preview_len, 5);
    }
}
