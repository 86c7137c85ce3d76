//
//  wpcom-kit
//  cli/backup.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Backup download commands.
//!
//! A download is prepared from a rewind point, polled with `status` until
//! its URL appears, and dismissed once it is no longer needed.

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand, ValueEnum};
use console::style;

use crate::api::backup::{JetpackBackup, JetpackRestoreTypes};
use crate::config::Config;
use crate::output::{format_status, print_field, TableOutput, TableRow};
use crate::util::{format_relative_time, format_time};

use super::{authenticated_client, GlobalOptions};

/// Prepare and download Jetpack backups.
#[derive(Args, Debug)]
pub struct BackupCommand {
    #[command(subcommand)]
    pub command: BackupSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BackupSubcommand {
    /// Start preparing a downloadable backup
    Prepare(PrepareArgs),

    /// Show the status of one backup download
    Status(DownloadArgs),

    /// List backup downloads for the site
    #[command(visible_alias = "ls")]
    List,

    /// Dismiss a backup download
    Dismiss(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Rewind point to back up (defaults to the latest)
    #[arg(long, short = 'r')]
    pub rewind_id: Option<String>,

    /// Only include these parts of the site
    #[arg(long, value_delimiter = ',', value_enum)]
    pub only: Vec<RestorePart>,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Download ID returned by `backup prepare`
    pub download_id: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RestorePart {
    Themes,
    Plugins,
    Uploads,
    /// Database tables
    Sqls,
    /// Files in the WordPress root
    Roots,
    /// Other files under wp-content
    Contents,
}

/// Restore types with only `parts` enabled, or `None` for everything.
fn restore_types(parts: &[RestorePart]) -> Option<JetpackRestoreTypes> {
    if parts.is_empty() {
        return None;
    }
    Some(JetpackRestoreTypes {
        themes: parts.contains(&RestorePart::Themes),
        plugins: parts.contains(&RestorePart::Plugins),
        uploads: parts.contains(&RestorePart::Uploads),
        sqls: parts.contains(&RestorePart::Sqls),
        roots: parts.contains(&RestorePart::Roots),
        contents: parts.contains(&RestorePart::Contents),
    })
}

impl TableOutput for JetpackBackup {
    fn print_table(&self, color: bool) {
        let title = format!("Backup download {}", self.download_id);
        if color {
            println!("{}", style(title).bold());
        } else {
            println!("{}", title);
        }
        println!();
        print_field("Status", &format_status(self.status().as_str(), color), color);
        print_field("Rewind ID", &self.rewind_id, color);
        print_field("Backup point", &format_time(self.backup_point), color);
        print_field(
            "Started",
            &format_relative_time(self.started_at, Utc::now()),
            color,
        );
        if let Some(progress) = self.progress {
            print_field("Progress", &format!("{}%", progress), color);
        }
        if let Some(count) = self.download_count {
            print_field("Downloads", &count.to_string(), color);
        }
        if let Some(valid_until) = self.valid_until {
            print_field("Valid until", &format_time(valid_until), color);
        }
        if let Some(url) = &self.url {
            println!();
            println!("  URL: {}", url);
        }
    }
}

impl TableRow for JetpackBackup {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "STATUS", "PROGRESS", "BACKUP POINT", "REWIND ID"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.download_id.to_string(),
            format_status(self.status().as_str(), color),
            self.progress
                .map(|p| format!("{}%", p))
                .unwrap_or_else(|| "-".to_string()),
            format_time(self.backup_point),
            self.rewind_id.clone(),
        ]
    }
}

impl BackupCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            BackupSubcommand::Prepare(args) => self.prepare(args, global).await,
            BackupSubcommand::Status(args) => self.status(args, global).await,
            BackupSubcommand::List => self.list(global).await,
            BackupSubcommand::Dismiss(args) => self.dismiss(args, global).await,
        }
    }

    async fn prepare(&self, args: &PrepareArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let backup = client
            .prepare_backup(site_id, args.rewind_id.as_deref(), restore_types(&args.only))
            .await?;

        let writer = global.writer();
        writer.write(&backup)?;
        if !writer.is_json() {
            println!();
            println!(
                "Check progress with 'wpk backup status {}'",
                backup.download_id
            );
        }
        Ok(())
    }

    async fn status(&self, args: &DownloadArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let backup = client.backup_status(site_id, args.download_id).await?;
        global.writer().write(&backup)
    }

    async fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let backups = client.backup_statuses(site_id).await?;
        let writer = global.writer();

        if backups.is_empty() && !writer.is_json() {
            writer.write_info("No backup downloads found.");
            return Ok(());
        }
        writer.write_list(&backups)
    }

    async fn dismiss(&self, args: &DownloadArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        client.dismiss_backup(site_id, args.download_id).await?;
        global
            .writer()
            .write_success(&format!("Dismissed backup download {}", args.download_id));
        Ok(())
    }
}
