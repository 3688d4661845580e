pub mod cli;
pub mod config;
pub mod entity;
pub mod filter;
pub mod query;
pub mod report;

use crate::config::QueryConfig;
use crate::entity::EntityKind;
use crate::filter::{FilterNode, FilterParser, compile, fields_for};
use crate::query::{Page, build_search};
use anyhow::Context;
pub use cli::{Cli, Commands, OutputFormat, cli_parse};
pub use entity::EntityShape;
pub use filter::{CompiledFilter, FilterError, QueryParam, parse};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8, quiet: bool) {
    let default_filter = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .try_init();
}

/// Parse `text` for `entity`, then scope it to `owner` when one is given
fn build_filter(
    parser: &FilterParser,
    entity: EntityKind,
    text: &str,
    owner: Option<i64>,
) -> anyhow::Result<Option<FilterNode>> {
    let shape = entity.shape();
    let node = parser
        .parse(text, shape)
        .context("Invalid filter expression")?;

    let Some(owner) = owner else {
        return Ok(node);
    };
    let guard = shape
        .owner_guard(owner)
        .with_context(|| format!("{entity} has no owner field to restrict by"))?;
    tracing::debug!(entity = %entity, owner, "Restricting filter to owner");
    Ok(Some(FilterNode::restrict(node, guard)))
}

fn emit(format: OutputFormat, text: String, json: serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{text}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&json)?),
    }
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    init_logging(cli.verbose, cli.quiet);

    let config: QueryConfig = crate::config::load_config(cli.config.as_deref())?;
    let parser = FilterParser::new(&config.filter);
    let format = cli.format;

    match &cli.command {
        Commands::Check { entity, filter } => {
            let node = build_filter(&parser, *entity, filter, None)?;
            emit(
                format,
                report::format_check_text(*entity, node.as_ref()),
                report::check_json(*entity, node.as_ref()),
            )
        }
        Commands::Compile {
            entity,
            owner,
            filter,
        } => {
            let node = build_filter(&parser, *entity, filter, *owner)?;
            let compiled = compile(node.as_ref());
            emit(
                format,
                report::format_compiled_text(&compiled),
                report::compiled_json(&compiled),
            )
        }
        Commands::Search {
            entity,
            owner,
            start,
            limit,
            filter,
        } => {
            let node = build_filter(&parser, *entity, filter, *owner)?;
            let compiled = compile(node.as_ref());
            let page = Page::clamped(*start, *limit, &config.paging);
            let stmt = build_search(&entity.shape().search, &compiled, page);
            emit(
                format,
                report::format_search_text(&stmt),
                report::search_json(&stmt),
            )
        }
        Commands::Fields { entity } => {
            let fields = fields_for(entity.shape());
            emit(
                format,
                report::format_fields_text(*entity, &fields),
                report::fields_json(*entity, &fields),
            )
        }
    }
}
