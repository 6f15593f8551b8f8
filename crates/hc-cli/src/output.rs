// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! How `hc` reports: labelled lines on stderr for people, or one JSON
//! document on stdout under `--json`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::Relaxed);
}

fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Emit `doc` under `--json`, otherwise run `human`.
pub fn report(doc: Value, human: impl FnOnce()) {
    if is_json() {
        match serde_json::to_string_pretty(&doc) {
            Ok(s) => println!("{s}"),
            Err(_) => println!("{doc}"),
        }
    } else {
        human();
    }
}

pub fn label(key: &str, val: &str) {
    eprintln!("{} {}", format!("{key}:").bold(), val);
}

/// One pass/fail line of a local request check.
pub fn check(key: &str, outcome: Result<(), String>) {
    let shown = match outcome {
        Ok(()) => "ok".green().to_string(),
        Err(reason) => reason.red().to_string(),
    };
    label(key, &shown);
}

/// Journal status as the relayer reports it, coloured by finality.
pub fn submission_status(status: &str) -> ColoredString {
    match status {
        "mined" => status.green(),
        "reverted" => status.red(),
        _ => status.yellow(),
    }
}

/// Final line of a command; silent under `--json`.
pub fn outcome(ok: bool, msg: &str) {
    if !is_json() {
        let shown = if ok { msg.green() } else { msg.red() };
        eprintln!("{shown}");
    }
}

/// Spinner for a chain or relayer round trip; hidden under `--json`.
pub fn waiting(msg: &str) -> ProgressBar {
    if is_json() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

pub fn fail_with_hint(error: &str, hint: &str) -> anyhow::Error {
    anyhow::anyhow!("{}\n{} {}", error.red(), "hint:".bold(), hint)
}
