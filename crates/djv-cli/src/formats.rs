//! # Formats Subcommand
//!
//! Lists every name in the format registry with its kind, default bounds,
//! and checker.

use anyhow::Result;
use clap::Args;

use djv_core::ValidatorConfig;
use djv_schema::{DefaultBounds, Format, LengthLimit, MAX_SAFE_INTEGER};

/// Arguments for the formats subcommand.
#[derive(Args, Debug)]
pub struct FormatsArgs {
    /// Resolve configured string limits against this maximum.
    #[arg(long)]
    pub max_string_len: Option<usize>,
}

/// Execute the formats subcommand.
pub fn run_formats(args: &FormatsArgs) -> Result<u8> {
    let mut config = ValidatorConfig::default();
    if let Some(max) = args.max_string_len {
        config = config.with_max_string_len(max);
    }

    println!("{:<18} {:<7} {:<36} {:<18} OVERRIDE", "NAME", "KIND", "BOUNDS", "CHECK");
    for format in Format::ALL {
        println!("{}", format_row(format, &config));
    }
    println!();
    println!("Total: {} formats", Format::ALL.len());
    Ok(0)
}

/// One table row for `format`.
pub fn format_row(format: Format, config: &ValidatorConfig) -> String {
    let d = format.descriptor();
    let checker = d.checker.map_or("-", |c| c.name());
    let overridable = if d.overridable { "yes" } else { "no" };
    format!(
        "{:<18} {:<7} {:<36} {:<18} {overridable}",
        format.name(),
        d.kind.as_str(),
        bounds(d.bounds, config),
        checker
    )
}

fn bounds(bounds: DefaultBounds, config: &ValidatorConfig) -> String {
    match bounds {
        DefaultBounds::None => "-".to_string(),
        DefaultBounds::Int { min, max } => format!("{min} .. {max}"),
        DefaultBounds::Float { .. } => "any finite".to_string(),
        DefaultBounds::Length { min, max } => {
            let max = match max {
                LengthLimit::Unbounded => format!("{MAX_SAFE_INTEGER}"),
                limit => limit.resolve(config).to_string(),
            };
            format!("len {min} .. {max}")
        }
    }
}
