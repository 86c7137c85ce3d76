//
//  wpcom-kit
//  cli/scan.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jetpack Scan commands.

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Args, Subcommand};
use console::style;

use crate::api::scan::{JetpackScan, JetpackScanThreat, ThreatContextLine, ThreatStatus};
use crate::config::Config;
use crate::output::{format_bool, format_status, print_field, print_header, TableOutput, TableRow};
use crate::util::{format_duration, format_relative_time, format_time, truncate};

use super::{authenticated_client, GlobalOptions};

/// Review Jetpack Scan results.
#[derive(Args, Debug)]
pub struct ScanCommand {
    #[command(subcommand)]
    pub command: ScanSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ScanSubcommand {
    /// Show scanner state and the latest run
    Status,

    /// List threats, or show one in detail
    Threats(ThreatsArgs),

    /// Ignore a threat so it no longer counts as active
    Ignore(IgnoreArgs),
}

#[derive(Args, Debug)]
pub struct ThreatsArgs {
    /// Include fixed and ignored threats
    #[arg(long, short = 'a')]
    pub all: bool,

    /// Show a single threat with its source context
    #[arg(long)]
    pub id: Option<u64>,
}

#[derive(Args, Debug)]
pub struct IgnoreArgs {
    /// Threat ID
    pub threat_id: u64,
}

impl TableOutput for JetpackScan {
    fn print_table(&self, color: bool) {
        print_header("Jetpack Scan");
        print_field("State", &format_status(self.state.as_str(), color), color);
        if let Some(reason) = &self.reason {
            print_field("Reason", reason, color);
        }
        if let Some(current) = &self.current {
            if let Some(progress) = current.progress {
                print_field("Progress", &format!("{}%", progress), color);
            }
        }
        if let Some(run) = &self.most_recent {
            if let Some(timestamp) = run.timestamp {
                print_field(
                    "Last scan",
                    &format_relative_time(timestamp, Utc::now()),
                    color,
                );
            }
            if let Some(duration) = run.duration {
                print_field("Duration", &format_duration(duration), color);
            }
            if run.error {
                print_field("Error", &format_bool(true, color), color);
            }
        }
        let active = self.active_threats().count();
        print_field("Active threats", &active.to_string(), color);
    }
}

fn threat_status(threat: &JetpackScanThreat) -> &'static str {
    threat.status.map(ThreatStatus::as_str).unwrap_or("-")
}

impl TableRow for JetpackScanThreat {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "STATUS", "KIND", "SIGNATURE", "LOCATION", "DETECTED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        let location = self
            .extension
            .as_ref()
            .map(|e| format!("{} {}", e.name, e.version))
            .or_else(|| self.file_name.clone())
            .unwrap_or_else(|| "-".to_string());

        vec![
            self.id.to_string(),
            format_status(threat_status(self), color),
            self.kind().as_str().to_string(),
            self.signature.clone(),
            truncate(&location, 48),
            format_time(self.first_detected),
        ]
    }
}

impl TableOutput for JetpackScanThreat {
    fn print_table(&self, color: bool) {
        print_header(&format!("Threat {}: {}", self.id, self.signature));
        println!("{}", self.description);
        println!();
        print_field("Status", &format_status(threat_status(self), color), color);
        print_field("Kind", self.kind().as_str(), color);
        print_field("Detected", &format_time(self.first_detected), color);
        if let Some(fixed_on) = self.fixed_on {
            print_field("Fixed", &format_time(fixed_on), color);
        }
        if let Some(file) = &self.file_name {
            print_field("File", file, color);
        }
        if let Some(extension) = &self.extension {
            print_field(
                "Extension",
                &format!("{} ({}) {}", extension.name, extension.slug, extension.version),
                color,
            );
        }
        print_field("Fixable", &format_bool(self.is_fixable(), color), color);

        if let Some(context) = &self.context {
            println!();
            for line in &context.lines {
                println!("{:>6} | {}", line.line_number, highlight(line, color));
            }
        }
        if let Some(diff) = &self.diff {
            println!();
            println!("{}", diff);
        }
    }
}

/// Renders a context line with its highlighted ranges in red.
fn highlight(line: &ThreatContextLine, color: bool) -> String {
    if !color || line.highlights.is_empty() {
        return line.contents.clone();
    }

    let mut out = String::new();
    let mut cursor = 0;
    for range in &line.highlights {
        let (Some(before), Some(marked)) = (
            line.contents.get(cursor..range.start),
            line.contents.get(range.clone()),
        ) else {
            continue;
        };
        out.push_str(before);
        out.push_str(&style(marked).red().bold().to_string());
        cursor = range.end;
    }
    out.push_str(line.contents.get(cursor..).unwrap_or_default());
    out
}

impl ScanCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ScanSubcommand::Status => self.status(global).await,
            ScanSubcommand::Threats(args) => self.threats(args, global).await,
            ScanSubcommand::Ignore(args) => self.ignore(args, global).await,
        }
    }

    async fn status(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let scan = client.scan(site_id).await?;
        global.writer().write(&scan)
    }

    async fn threats(&self, args: &ThreatsArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let scan = client.scan(site_id).await?;
        let writer = global.writer();

        if let Some(id) = args.id {
            let threat = scan
                .threats
                .iter()
                .flatten()
                .find(|threat| threat.id == id)
                .ok_or_else(|| anyhow!("Threat {} not found on site {}", id, site_id))?;
            return writer.write(threat);
        }

        let threats: Vec<JetpackScanThreat> = if args.all {
            scan.threats.clone().unwrap_or_default()
        } else {
            scan.active_threats().cloned().collect()
        };

        if threats.is_empty() && !writer.is_json() {
            writer.write_info("No threats found.");
            return Ok(());
        }
        writer.write_list(&threats)?;
        writer.write_info(&format!("\nShowing {} threat(s)", threats.len()));
        Ok(())
    }

    async fn ignore(&self, args: &IgnoreArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        client.ignore_threat(site_id, args.threat_id).await?;
        global
            .writer()
            .write_success(&format!("Ignored threat {}", args.threat_id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(highlights: Vec<std::ops::Range<usize>>) -> ThreatContextLine {
        ThreatContextLine {
            line_number: 4,
            contents: "VIRUS_SIG here".to_string(),
            highlights,
        }
    }

    #[test]
    fn test_highlight_without_color_is_plain() {
        assert_eq!(highlight(&line(vec![0..9]), false), "VIRUS_SIG here");
    }

    #[test]
    fn test_highlight_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(highlight(&line(vec![0..9]), true), "VIRUS_SIG here");
    }

    #[test]
    fn test_highlight_skips_out_of_bounds_ranges() {
        console::set_colors_enabled(false);
        assert_eq!(highlight(&line(vec![10..99]), true), "VIRUS_SIG here");
    }
}
