use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use holical::acquire::{AcquisitionPolicy, FileCache, HttpFetcher};
use holical::cli::Cli;
use holical::config::Config;
use holical::logging;
use holical::prompt::{ask_month, ask_year, check_month, LinePrompter, Prompter};
use holical::render::CalendarRenderer;
use holical::CalendarError;

/// Exit status for a year or month the calendar cannot show.
const EXIT_INVALID_INPUT: i32 = 2;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let mut config =
        Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(cache) = &cli.cache {
        config.cache_path = cache.clone();
    }
    if let Some(url) = &cli.url {
        config.dataset_url = url.clone();
    }
    let encoding = config.encoding()?;

    let mut prompter = LinePrompter::stdio();
    prompter.say("=== 月間カレンダー（祝日対応版） ===\n")?;

    let policy = AcquisitionPolicy::new(
        FileCache::new(config.cache_path.clone()),
        HttpFetcher::new(config.dataset_url.clone()),
        encoding,
    )
    .with_consent(cli.consent());
    let acquisition = policy.acquire(&mut prompter)?;

    prompter.say("")?;
    let year = match cli.year {
        Some(year) => year,
        None => ask_year(&mut prompter, config.fallback_year)?,
    };
    let month = match cli.month {
        Some(month) => check_month(month),
        None => ask_month(&mut prompter, config.fallback_month),
    };
    let month = match month {
        Ok(month) => month,
        Err(CalendarError::InvalidMonth { .. }) => {
            prompter.say("月は1から12の間で入力してください。")?;
            return Ok(EXIT_INVALID_INPUT);
        }
        Err(e) => return Err(e.into()),
    };

    let renderer = CalendarRenderer::new(config.presentation.clone());
    match renderer.render(year, month, &acquisition.store) {
        Ok(view) => {
            prompter.say("")?;
            prompter.say(&view.to_string())?;
            Ok(0)
        }
        Err(CalendarError::InvalidDate { .. }) => {
            prompter.say("年は1から9999の間で入力してください。")?;
            Ok(EXIT_INVALID_INPUT)
        }
        Err(e) => Err(e).context("failed to render calendar"),
    }
}
