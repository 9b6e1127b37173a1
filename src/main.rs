use std::time::Duration;

use anyhow::bail;
use bkb::{
    Conversion, Converter,
    source::{
        self, Level,
        page::{Fetch, FetchOutcome, HttpFetcher, Offline, online_entry},
    },
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, Format, Input};

mod cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bkb=error".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Cli::parse();
    match args.command {
        Command::Cite {
            from,
            format,
            first,
        } => cite(from, format, first),
        Command::Source {
            label,
            previous_url,
            offline,
            timeout,
        } => {
            let fetcher: Box<dyn Fetch> = if offline {
                Box::new(Offline)
            } else {
                Box::new(HttpFetcher::with_timeout(Duration::from_secs(timeout)))
            };
            source_label(&label, previous_url.as_deref(), &*fetcher)
        }
        Command::Fetch { url, cite, timeout } => {
            fetch(&url, cite, &HttpFetcher::with_timeout(Duration::from_secs(timeout)))
        }
    }
}

fn cite(from: Vec<Input>, format: Format, first: bool) -> anyhow::Result<()> {
    let inputs = if from.is_empty() {
        vec![Input::Stdin]
    } else {
        from
    };

    let bar = if inputs.len() > 1 {
        let bar = ProgressBar::new(inputs.len() as u64);
        if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
            bar.set_style(style);
        }
        bar
    } else {
        ProgressBar::hidden()
    };

    let mut all = Conversion::default();
    for input in &inputs {
        bar.set_message(input.to_string());
        let text = input.read()?;
        let mut conv = Converter::new(&text).convert();
        if first {
            conv.citations.truncate(1);
        }
        all.citations.extend(conv.citations);
        all.skipped.extend(conv.skipped);
        bar.inc(1);
    }
    bar.finish_and_clear();

    match format {
        Format::Text => {
            for citation in &all.citations {
                println!("{citation}");
            }
        }
        Format::Json => {
            let skipped: Vec<_> = all
                .skipped
                .iter()
                .map(|e| json!({ "entry_id": e.entry_id(), "reason": e.to_string() }))
                .collect();
            let doc = json!({ "citations": all.citations, "skipped": skipped });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }

    for err in &all.skipped {
        eprintln!("{} {}", paint_err("✗"), err);
    }
    summary(all.citations.len(), all.skipped.len());
    Ok(())
}

fn source_label(label: &str, previous_url: Option<&str>, fetcher: &dyn Fetch) -> anyhow::Result<()> {
    let res = source::prepare(label, previous_url, fetcher);
    for notice in &res.notices {
        match notice.level {
            Level::Warning => eprintln!("{} {}", paint_warn("warning:"), notice.text),
            Level::Error => eprintln!("{} {}", paint_err("error:"), notice.text),
        }
    }
    if res.halted {
        bail!("could not resolve source label: {label}");
    }

    println!("{}", res.label);
    if let Some(url) = res.source_url {
        println!("{url}");
    }
    Ok(())
}

fn fetch(url: &str, cite: bool, fetcher: &dyn Fetch) -> anyhow::Result<()> {
    let Some(parsed) = source::is_url(url) else {
        eprintln!("{} not a web address: {url}", paint_err("✗"));
        summary(0, 1);
        return Ok(());
    };

    let failure = match fetcher.fetch_title(&parsed) {
        FetchOutcome::Title(title) => {
            let entry = online_entry(&title, &parsed, chrono::Utc::now().date_naive());
            if cite {
                match Converter::new(&entry).first_citation() {
                    Some(citation) => println!("{citation}"),
                    None => bail!("generated entry for {url} did not convert"),
                }
            } else {
                print!("{entry}");
            }
            summary(1, 0);
            return Ok(());
        }
        FetchOutcome::Forbidden => "access forbidden (HTTP 403)".to_string(),
        FetchOutcome::Status(code) => format!("unexpected HTTP status {code}"),
        FetchOutcome::Unreachable(reason) => format!("unreachable: {reason}"),
    };

    eprintln!("{} {url}: {failure}", paint_err("✗"));
    summary(0, 1);
    Ok(())
}

fn summary(ok: usize, failed: usize) {
    eprintln!("{} {}  {} {}", paint_ok("✓"), ok, paint_err("✗"), failed);
}

fn colour() -> bool {
    std::env::var_os("NO_COLOR").is_none_or(|v| v.is_empty())
}

fn paint_ok(s: &str) -> String {
    if colour() { s.green().to_string() } else { s.to_string() }
}

fn paint_warn(s: &str) -> String {
    if colour() { s.yellow().to_string() } else { s.to_string() }
}

fn paint_err(s: &str) -> String {
    if colour() { s.red().to_string() } else { s.to_string() }
}
