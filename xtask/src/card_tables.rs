use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use ::card::{CardAssembly, CardTables, DaiLink, LinkKind};
use platform::PlatformDescriptor;

pub fn run(descriptor: Option<&Path>, verbose: bool) -> Result<()> {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .with_target(false)
            .init();
    }

    let descriptor = match descriptor {
        Some(path) => load_descriptor(path)?,
        None => PlatformDescriptor::default(),
    };

    let tables = CardAssembly::new(descriptor)
        .assemble()
        .map_err(|e| anyhow::anyhow!("card assembly failed: {e}"))?;

    print_tables(&tables);
    Ok(())
}

fn load_descriptor(path: &Path) -> Result<PlatformDescriptor> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid descriptor in {}", path.display()))
}

fn print_tables(tables: &CardTables) {
    println!();
    println!(
        "{} {}",
        "🔊".cyan(),
        format!("Card: {}", tables.name).cyan().bold()
    );
    if let Some(driver) = tables.driver_name {
        println!("   driver   {driver}");
    }
    println!(
        "   topology {} ({}, {})",
        tables.topology.back_end_link_name(),
        tables.topology.cpu_dai_name(),
        tables.topology.sample_format().name()
    );
    println!();

    println!("{}", "  Widgets".bold());
    for w in tables.graph.widgets() {
        println!("    {:<16} {}", w.name, w.kind.as_str().dimmed());
    }
    println!();

    println!("{}", "  Routes (sink ← source)".bold());
    for r in tables.graph.routes() {
        println!("    {:<16} ← {}", r.sink, r.source);
    }
    println!();

    println!("{}", "  Controls".bold());
    for s in tables.controls.iter() {
        let state = if s.enabled { "on".green() } else { "off".red() };
        println!("    {:<16} Switch  {state}", s.pin);
    }
    println!();

    println!("{}", "  DAI links".bold());
    for link in &tables.links {
        print_link(link);
    }
    println!();
}

fn print_link(link: &DaiLink) {
    let kind = match link.kind {
        LinkKind::FrontEnd => "FE",
        LinkKind::BackEnd => "BE",
        LinkKind::CodecToCodec => "C2C",
    };
    println!("    {:<4}{}", kind.cyan(), link.name.bold());
    println!(
        "        cpu {}  codec {}:{}",
        link.cpu_dai,
        link.codec.as_str(),
        link.codec_dai.as_str()
    );
    if let Some(platform) = &link.platform {
        println!("        platform {}", platform.as_str());
    }

    let mut flags = Vec::new();
    if link.playback {
        flags.push("playback");
    }
    if link.capture {
        flags.push("capture");
    }
    if link.dynamic {
        flags.push("dynamic");
    }
    if link.nonatomic {
        flags.push("nonatomic");
    }
    if link.no_pcm {
        flags.push("no_pcm");
    }
    if link.ignore_suspend {
        flags.push("ignore_suspend");
    }
    if link.ignore_pmdown_time {
        flags.push("ignore_pmdown_time");
    }
    println!("        {}", flags.join(" ").dimmed());

    if let Some(fmt) = link.dai_format {
        println!("        format 0x{:04x}", fmt.bits());
    }
    if let Some(p) = link.c2c_params {
        println!(
            "        params {} {} Hz {} ch",
            p.format.name(),
            p.rate,
            p.channels
        );
    }
}
