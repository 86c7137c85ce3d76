//
//  wpcom-kit
//  cli/editor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Editor settings commands.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use crate::api::editor::{EditorSettings, MobileEditor, WebEditor};
use crate::config::Config;
use crate::output::{print_field, print_header, TableOutput, TableRow};

use super::{authenticated_client, GlobalOptions};

/// Show or change the editor a site uses.
#[derive(Args, Debug)]
pub struct EditorCommand {
    #[command(subcommand)]
    pub command: EditorSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum EditorSubcommand {
    /// Show the editor settings for the site
    Get,

    /// Set the mobile editor for the site
    Set(SetArgs),

    /// Set the mobile editor for all of your sites
    #[command(name = "set-all")]
    SetAll(SetAllArgs),
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[arg(value_enum)]
    pub editor: EditorArg,
}

#[derive(Args, Debug)]
pub struct SetAllArgs {
    #[arg(value_enum)]
    pub editor: EditorArg,

    /// Leave sites that already have an editor unchanged
    #[arg(long)]
    pub only_if_empty: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EditorArg {
    /// The block editor
    Gutenberg,
    /// The native rich-text editor
    Aztec,
}

impl From<EditorArg> for MobileEditor {
    fn from(arg: EditorArg) -> Self {
        match arg {
            EditorArg::Gutenberg => MobileEditor::Gutenberg,
            EditorArg::Aztec => MobileEditor::Aztec,
        }
    }
}

fn web_editor_label(editor: WebEditor) -> &'static str {
    match editor {
        WebEditor::Classic => "classic",
        WebEditor::Gutenberg => "gutenberg",
    }
}

impl TableOutput for EditorSettings {
    fn print_table(&self, color: bool) {
        print_header("Editor settings");
        print_field("Mobile", self.mobile.as_str(), color);
        print_field("Web", web_editor_label(self.web), color);
    }
}

#[derive(Debug, Serialize)]
struct SiteEditor {
    site_id: u64,
    editor: MobileEditor,
}

impl TableRow for SiteEditor {
    fn headers() -> Vec<&'static str> {
        vec!["SITE", "MOBILE EDITOR"]
    }

    fn row(&self, _color: bool) -> Vec<String> {
        vec![self.site_id.to_string(), self.editor.as_str().to_string()]
    }
}

impl EditorCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            EditorSubcommand::Get => self.get(global).await,
            EditorSubcommand::Set(args) => self.set(args, global).await,
            EditorSubcommand::SetAll(args) => self.set_all(args, global).await,
        }
    }

    async fn get(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let settings = client.editor_settings(site_id).await?;
        global.writer().write(&settings)
    }

    async fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let site_id = global.site_id(&config)?;
        let client = authenticated_client(&config)?;

        let settings = client.set_mobile_editor(site_id, args.editor.into()).await?;
        global.writer().write(&settings)
    }

    async fn set_all(&self, args: &SetAllArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = authenticated_client(&config)?;

        let sites = client
            .set_mobile_editor_for_all_sites(args.editor.into(), args.only_if_empty)
            .await?;
        let rows: Vec<SiteEditor> = sites
            .into_iter()
            .map(|(site_id, editor)| SiteEditor { site_id, editor })
            .collect();

        let writer = global.writer();
        writer.write_list(&rows)?;
        writer.write_info(&format!("\nUpdated {} site(s)", rows.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_arg_maps_to_mobile_editor() {
        assert_eq!(MobileEditor::from(EditorArg::Gutenberg), MobileEditor::Gutenberg);
        assert_eq!(MobileEditor::from(EditorArg::Aztec), MobileEditor::Aztec);
    }

    #[test]
    fn test_site_editor_row() {
        let row = SiteEditor {
            site_id: 3,
            editor: MobileEditor::Gutenberg,
        };
        assert_eq!(row.row(false), vec!["3", "gutenberg"]);
    }
}
