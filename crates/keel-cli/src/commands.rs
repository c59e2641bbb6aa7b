use std::fmt;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use keel_gauge::{Gauge, GaugeHandler, GaugeService, InMemoryGaugeService, Message};
use keel_store::{InMemoryRepository, Order, Page, PageRequest, Repository, Sort, StoreConfig};
use serde_json::Value;

use crate::cli::*;

/// Key of a loaded record. Integer keys order before string keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecordKey {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub key: RecordKey,
    pub value: Value,
}

fn record_key(record: &Record) -> RecordKey {
    record.key.clone()
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Page(args) => {
            let page = run_page(&args)?;
            print_page(&page, &cli.format)
        }
        Command::Gauge(args) => {
            let gauge = run_gauge(&args)?;
            print_gauge(&gauge, &cli.format)
        }
    }
}

/// Parse a JSON array of objects, keying each by `key_field`.
pub fn parse_records(input: &str, key_field: &str) -> anyhow::Result<Vec<Record>> {
    let values: Vec<Value> = serde_json::from_str(input).context("expected a JSON array")?;
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let key = match value.get(key_field) {
                Some(Value::String(s)) => RecordKey::Str(s.clone()),
                Some(Value::Number(n)) => match n.as_i64() {
                    Some(n) => RecordKey::Int(n),
                    None => bail!("record {i}: `{key_field}` is not an integer"),
                },
                _ => bail!("record {i} has no string or integer `{key_field}`"),
            };
            Ok(Record { key, value })
        })
        .collect()
}

/// Parse `property[,asc|desc]` into an [`Order`].
pub fn parse_order(spec: &str) -> anyhow::Result<Order> {
    let (property, direction) = match spec.split_once(',') {
        Some((p, d)) => (p, d),
        None => (spec, "asc"),
    };
    if property.is_empty() {
        bail!("empty sort property in `{spec}`");
    }
    match direction.to_ascii_lowercase().as_str() {
        "asc" => Ok(Order::asc(property)),
        "desc" => Ok(Order::desc(property)),
        other => bail!("unknown sort direction `{other}`"),
    }
}

fn load_config(path: Option<&Path>, file: &Path) -> anyhow::Result<StoreConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(StoreConfig::from_toml_str(&text)?)
        }
        None => {
            let name = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "records".into());
            Ok(StoreConfig::named(name))
        }
    }
}

pub fn run_page(args: &PageArgs) -> anyhow::Result<Page<Record>> {
    let input = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let records = parse_records(&input, &args.key)?;
    let config = load_config(args.config.as_deref(), &args.file)?;

    let repo = InMemoryRepository::with_config(config, record_key as fn(&Record) -> RecordKey);
    repo.save_all(records)?;

    let mut request = match args.page {
        Some(page) => PageRequest::of(page, args.size),
        None => PageRequest::new(args.offset.unwrap_or(0), args.size),
    };
    if !args.sort.is_empty() {
        let orders = args
            .sort
            .iter()
            .map(|s| parse_order(s))
            .collect::<anyhow::Result<Vec<_>>>()?;
        request = request.with_sort(Sort::new(orders));
    }
    Ok(repo.find_all_paged(&request)?)
}

pub fn run_gauge(args: &GaugeArgs) -> anyhow::Result<Gauge> {
    let service = Arc::new(InMemoryGaugeService::new());
    let handler = GaugeHandler::new(service.clone(), args.name.as_str())?;
    let payload = serde_json::from_str(&args.payload)
        .unwrap_or_else(|_| Value::String(args.payload.clone()));
    handler.process(Some(&Message::new(payload)))?;
    service
        .find(&args.name)?
        .with_context(|| format!("gauge {} vanished", args.name))
}

fn print_page(page: &Page<Record>, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let values = page.clone().map(|r| r.value);
            println!("{}", serde_json::to_string_pretty(&values)?);
        }
        OutputFormat::Text => {
            println!(
                "Page {} of {} ({} records total)",
                (page.number() + 1).to_string().bold(),
                page.total_pages().to_string().bold(),
                page.total().to_string().cyan(),
            );
            for record in page.content() {
                println!("  {}  {}", record.key.to_string().yellow(), record.value);
            }
            if page.is_empty() {
                println!("  {}", "(no records)".dimmed());
            }
        }
    }
    Ok(())
}

fn print_gauge(gauge: &Gauge, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(gauge)?),
        OutputFormat::Text => println!(
            "{} {} = {}",
            "✓".green().bold(),
            gauge.name.bold(),
            gauge.value.to_string().cyan()
        ),
    }
    Ok(())
}
