use std::cell::RefCell;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use chatnav_app::config::{load_config, CONFIG_FILENAME};
use chatnav_app::controller::OverlayController;
use chatnav_app::host::ScriptedHost;
use chatnav_app::logging::{initialize, LogDestination};
use chatnav_app::scheduler::ManualScheduler;
use chatnav_app::surface::LogSurface;
use chatnav_core::Msg;
use chrono::Utc;

/// Offline inspector: runs the full extraction pipeline against a saved
/// chat page and prints the navigation list it would show.
fn main() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (page_path, search) = parse_args(&args)?;

    initialize(LogDestination::Terminal);

    let source = fs::read_to_string(&page_path)
        .with_context(|| format!("reading {}", page_path.display()))?;
    let config = load_config(Path::new(CONFIG_FILENAME));

    let scheduler = Rc::new(RefCell::new(ManualScheduler::new()));
    let mut controller = OverlayController::new(
        config,
        ScriptedHost::new(source),
        LogSurface,
        scheduler.clone(),
    )?;

    controller.start();
    // A saved page has no live mutation stream; drive the scheduled
    // one-shot timers immediately instead of waiting them out.
    loop {
        let timer = scheduler.borrow_mut().pop_next();
        let Some(timer) = timer else { break };
        controller.dispatch(Msg::TimerElapsed {
            handle: timer.handle,
            purpose: timer.purpose,
        });
    }

    if let Some(term) = search {
        controller.dispatch(Msg::SearchChanged(term));
    }

    let view = controller.view();
    println!(
        "Scanned {} at {}",
        page_path.display(),
        Utc::now().to_rfc3339()
    );
    if view.entries.is_empty() {
        println!("No user messages found.");
    } else {
        for entry in &view.entries {
            println!("{:>3}. {}", entry.ordinal, entry.preview);
        }
    }

    Ok(())
}

fn parse_args(args: &[String]) -> Result<(PathBuf, Option<String>)> {
    let mut page = None;
    let mut search = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--search" => {
                search = Some(
                    iter.next()
                        .context("--search requires a term")?
                        .clone(),
                );
            }
            other if page.is_none() => page = Some(PathBuf::from(other)),
            other => bail!("unexpected argument: {other}"),
        }
    }
    let page = page.context("usage: chatnav <page.html> [--search TERM]")?;
    Ok((page, search))
}
