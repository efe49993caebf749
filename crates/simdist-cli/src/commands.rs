//! Subcommand handlers.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use simdist_core::{
    available_tiers, compute_bytes, convert_text_to_bytes, version, Dispatcher, ElementWidth,
    MetricKind,
};

#[derive(Serialize)]
struct InfoReport {
    version: &'static str,
    tier: &'static str,
    detected: &'static str,
    capped: bool,
    available: Vec<&'static str>,
}

#[derive(Serialize)]
struct ComputeReport {
    metric: &'static str,
    width: &'static str,
    tier: &'static str,
    dimensions: usize,
    value: f64,
}

pub fn info(dispatcher: &Dispatcher, json: bool) -> anyhow::Result<()> {
    let report = InfoReport {
        version: version(),
        tier: dispatcher.tier_label(),
        detected: dispatcher.detected_tier().label(),
        capped: dispatcher.is_capped(),
        available: available_tiers().into_iter().map(|t| t.label()).collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "simdist".bold(), report.version);
    let suffix = if report.capped {
        format!(" (capped, detected {})", report.detected)
    } else {
        String::new()
    };
    println!("  Active tier:     {}{suffix}", report.tier.green());
    println!("  Available tiers: {}", report.available.join(", "));
    Ok(())
}

pub fn compute(
    dispatcher: &Dispatcher,
    metric: MetricKind,
    width: ElementWidth,
    dimensions: Option<usize>,
    a: &str,
    b: &str,
    json: bool,
) -> anyhow::Result<()> {
    let left = convert_text_to_bytes(a, dimensions, width).context("first vector")?;
    let right = convert_text_to_bytes(b, dimensions, width).context("second vector")?;
    let value = compute_bytes(metric, width, &left, &right, dimensions)?;

    if json {
        let report = ComputeReport {
            metric: metric.label(),
            width: width.label(),
            tier: dispatcher.tier_label(),
            dimensions: dimensions.unwrap_or(left.len() / width.size_bytes()),
            value,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

pub fn convert(
    width: ElementWidth,
    dimensions: usize,
    text: &str,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let bytes = convert_text_to_bytes(text, Some(dimensions), width)?;

    match output {
        Some(path) => {
            std::fs::write(path, &bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} {} bytes to {}",
                "Wrote".green(),
                bytes.len(),
                path.display()
            );
        }
        None => println!("{}", to_hex(&bytes)),
    }
    Ok(())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}
