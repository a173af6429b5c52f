use std::env;
use std::io::{self, Write};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{error, warn};
use num_enum::IntoPrimitive;

use teleporter::{SearchConfig, SearchError, SearchOutcome};

#[derive(Debug, Clone, Copy, IntoPrimitive)]
#[repr(u8)]
enum ExitStatus {
    Found = 0,
    NoSolution = 1,
    Failed = 2,
    Interrupted = 130,
}

fn config_from_args() -> Result<SearchConfig> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut config = SearchConfig::default();
    if let Some(target) = args.get(0) {
        config.target = target.parse()
            .with_context(|| format!("invalid target {:?}", target))?;
    }
    if let Some(max_k) = args.get(1) {
        config.max_k = max_k.parse()
            .with_context(|| format!("invalid max_k {:?}", max_k))?;
    }
    Ok(config)
}

fn run() -> Result<ExitStatus> {
    let config = config_from_args()?;
    let parallel = env::var("TELEPORTER_PARALLEL").map_or(false, |v| v == "1");

    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::Relaxed))
        .context("failed to install Ctrl-C handler")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = if parallel {
        config.search_parallel(&mut out, Some(&stop))
    } else {
        config.search(&mut out, Some(&stop))
    };
    match outcome {
        Ok(SearchOutcome::Found(_)) => Ok(ExitStatus::Found),
        Ok(SearchOutcome::NotFound) => Ok(ExitStatus::NoSolution),
        Ok(SearchOutcome::Interrupted) => {
            warn!("stopped by Ctrl-C");
            Ok(ExitStatus::Interrupted)
        }
        Err(e @ SearchError::Eval { .. }) => {
            error!("{}", e);
            Ok(ExitStatus::Failed)
        }
        Err(e) => Err(e.into()),
    }
}

fn main() {
    env_logger::builder()
        .format(|buf, record| writeln!(buf, "> {}", record.args()))
        .init();

    let status = run().unwrap_or_else(|e| {
        error!("{:#}", e);
        ExitStatus::Failed
    });
    process::exit(i32::from(u8::from(status)));
}
