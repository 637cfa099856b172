// Copyright 2025 the Scenemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Command-line front end: size report for a scene file or for scene text
//! piped in by a host.

use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::Rect;
use scenemap::{Pipeline, SceneProvider, SceneSource, Snapshot, ViewConfig};
use scenemap_parse::ParseOptions;
use scenemap_responder::events::RecordingHost;
use scenemap_treemap::LayoutConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "scenemap", version)]
#[command(about = "Show which nodes take up the space in a Maya ASCII scene")]
struct Cli {
    /// Scene file; reads the host's exported scene from stdin when omitted.
    path: Option<PathBuf>,

    /// View width.
    #[arg(long, default_value_t = 600.0)]
    width: f64,

    /// View height.
    #[arg(long, default_value_t = 1000.0)]
    height: f64,

    /// Lay out only the largest N nodes; 0 lays out all.
    #[arg(long, default_value_t = 100)]
    max_count: usize,

    /// Smallest tile, as a fraction of the largest.
    #[arg(long, default_value_t = 0.01, value_parser = parse_share)]
    min_share: f64,

    /// Stop at the first connectAttr/select statement.
    #[arg(long)]
    stop_at_connections: bool,

    /// Click the tile at X,Y and print what the host would receive.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    hit: Option<(f64, f64)>,

    /// Rows of the node listing.
    #[arg(long, default_value_t = 20)]
    top: usize,

    /// Log pipeline progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn view_config(&self) -> ViewConfig {
        ViewConfig {
            layout: LayoutConfig {
                max_items: (self.max_count > 0).then_some(self.max_count),
                min_share: self.min_share,
            },
            parse: ParseOptions {
                stop_at_connections: self.stop_at_connections,
            },
            bounds: Rect::new(0.0, 0.0, self.width, self.height),
        }
    }
}

fn parse_share(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&v) {
        Ok(v)
    } else {
        Err(format!("{v} is not between 0 and 1"))
    }
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok((x, y))
}

/// Scene text exported by a host and piped to stdin.
struct StdinScene;

impl SceneProvider for StdinScene {
    fn saved_scene(&self) -> Option<PathBuf> {
        None
    }

    fn export_scene(&self) -> Result<Vec<u8>, String> {
        let mut buf = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .map_err(|e| format!("reading stdin: {e}"))?;
        Ok(buf)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = cli.view_config();
    let source = match &cli.path {
        Some(path) => SceneSource::path(path),
        None => SceneSource::Host(std::sync::Arc::new(StdinScene)),
    };
    let what = cli
        .path
        .as_ref()
        .map_or_else(|| "stdin".to_owned(), |p| p.display().to_string());

    let mut pipeline = Pipeline::new(config);
    let snapshot = pipeline
        .open(source, config.bounds)
        .wait()
        .with_context(|| format!("failed to load scene from {what}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report(&mut out, &snapshot, cli.top)?;
    if let Some((x, y)) = cli.hit {
        click(&mut out, &snapshot, x, y)?;
    }
    Ok(())
}

fn report(out: &mut impl Write, snapshot: &Snapshot, top: usize) -> io::Result<()> {
    let scene = snapshot.scene();
    writeln!(out, "{}", scene.title())?;
    writeln!(out, "{}", scene.summary())?;
    if snapshot.is_empty() {
        writeln!(out, "\nNo nodes found.")?;
        return Ok(());
    }

    writeln!(out, "\nBy type:")?;
    for t in snapshot.model().type_totals() {
        writeln!(
            out,
            "  {:<24} {:>12} bytes {:>6.2}%  ({} nodes)",
            t.node_type, t.byte_size, t.percent, t.count
        )?;
    }

    writeln!(out, "\nLargest nodes:")?;
    let index = snapshot.index();
    for e in snapshot.model().entries().iter().take(top) {
        let Some(record) = scene.record(e.node) else {
            continue;
        };
        let tile = index
            .metadata_for(e.node)
            .map(|info| {
                let r = info.rect;
                format!(
                    "{} [{:.0},{:.0} {:.0}x{:.0}]",
                    info.color,
                    r.x0,
                    r.y0,
                    r.width(),
                    r.height()
                )
            })
            .unwrap_or_else(|| "(not laid out)".to_owned());
        writeln!(
            out,
            "  {:<32} {:<16} {:>10} {:>6.2}%  {}",
            record.display_name(),
            record.node_type,
            record.byte_size,
            e.percent,
            tile
        )?;
    }
    Ok(())
}

fn click(out: &mut impl Write, snapshot: &Snapshot, x: f64, y: f64) -> io::Result<()> {
    let index = snapshot.index();
    let mut host = RecordingHost::default();
    writeln!(out, "\nClick at {x},{y}:")?;
    let Some(node) = index.click_at(x, y, &mut host) else {
        writeln!(out, "  no tile")?;
        return Ok(());
    };
    if let Some(info) = index.metadata_for(node) {
        for line in info.tooltip().lines() {
            writeln!(out, "  {line}")?;
        }
    }
    for command in &host.commands {
        writeln!(out, "  -> {command:?}")?;
    }
    Ok(())
}
