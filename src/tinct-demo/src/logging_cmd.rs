//! Logs through a registry of loggers built from configuration.

use crate::cli::Settings;
use anyhow::{Context, Result};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tinct::logging::{LoggerRegistry, LoggingConfig, MemoryTarget, Severity};

pub fn run(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let mut config = match &settings.config {
        Some(path) => LoggingConfig::load(path)
            .with_context(|| format!("failed to load logging config {}", path.display()))?,
        None => LoggingConfig::default(),
    }
    .apply_env();
    if !settings.color_mode.is_enabled() {
        config.colors = Some(false);
    }
    run_with(&config, out)
}

pub fn run_with(config: &LoggingConfig, out: &mut dyn Write) -> Result<()> {
    let mut registry = LoggerRegistry::new();
    let capture = MemoryTarget::new();
    let observed = Arc::new(AtomicUsize::new(0));

    {
        let demo = registry.register(
            config
                .build_logger("demo", "Demo")?
                .with_target(capture.clone()),
        )?;
        let counter = Arc::clone(&observed);
        demo.on_log(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        for severity in Severity::ALL {
            demo.log(severity, format_args!("a {} message", severity.name().to_lowercase()));
        }

        let net = demo.sub_logger("net", "Network")?;
        net.info("connected to localhost:8080");
        net.set_level(Severity::Error);
        net.warning("retrying request");
        net.error("request failed after 3 attempts");
    }

    // Sub-loggers resolve through the registry by their dotted ID.
    if let Some(net) = registry.get_mut("demo.net") {
        net.set_level(Severity::Trace);
        net.trace("closing socket");
    }

    writeln!(out)?;
    writeln!(out, "loggers: {}", descendant_summary(&registry))?;
    writeln!(
        out,
        "observed {} messages, {} passed the level",
        observed.load(Ordering::Relaxed),
        capture.len()
    )?;
    for record in capture.records() {
        writeln!(
            out,
            "  {:<8} {:<14} {}",
            record.severity.name(),
            record.logger_name(),
            record.message
        )?;
    }

    registry.close_all()?;
    Ok(())
}

fn descendant_summary(registry: &LoggerRegistry) -> String {
    registry
        .iter()
        .flat_map(|logger| {
            std::iter::once(logger.id().to_string()).chain(logger.descendant_ids())
        })
        .collect::<Vec<_>>()
        .join(", ")
}
