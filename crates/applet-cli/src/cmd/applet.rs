use crate::output::{print_json, print_table};
use anyhow::Context;
use applet_core::catalog::{AppletRecord, Catalog};
use applet_server::routes::applets::applet_json;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum AppletSubcommand {
    /// List applets
    List {
        /// Only applets with this enabled state
        #[arg(long)]
        enabled: Option<bool>,
    },
    /// Show one applet with its services
    Show { id: u64 },
    /// Flip an applet's enabled flag and save the catalog
    Toggle { id: u64 },
}

pub fn run(root: &Path, subcmd: AppletSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        AppletSubcommand::List { enabled } => list(root, enabled, json),
        AppletSubcommand::Show { id } => show(root, id, json),
        AppletSubcommand::Toggle { id } => toggle(root, id, json),
    }
}

fn list(root: &Path, enabled: Option<bool>, json: bool) -> anyhow::Result<()> {
    let catalog = Catalog::load_or_seed(root).context("failed to load catalog")?;
    let applets = catalog.applets(enabled)?;
    if json {
        let list: Vec<_> = applets.iter().map(applet_json).collect();
        return print_json(&list);
    }
    if applets.is_empty() {
        println!("No applets.");
        return Ok(());
    }

    let rows = applets
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                if a.enabled { "on" } else { "off" }.to_string(),
                a.trigger_service.slug.clone(),
                a.action_service.slug.clone(),
                a.name.clone(),
            ]
        })
        .collect();
    print_table(&["ID", "STATE", "TRIGGER", "ACTION", "NAME"], rows);
    Ok(())
}

fn show(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let catalog = Catalog::load_or_seed(root).context("failed to load catalog")?;
    let applet = catalog.applet(id)?;
    if json {
        return print_json(&applet_json(&applet));
    }
    print_applet(&applet);
    Ok(())
}

fn toggle(root: &Path, id: u64, json: bool) -> anyhow::Result<()> {
    let mut catalog = Catalog::load_or_seed(root).context("failed to load catalog")?;
    let applet = catalog.toggle(id)?;
    catalog.save(root).context("failed to save catalog")?;

    if json {
        return print_json(&applet_json(&applet));
    }
    let state = if applet.enabled { "enabled" } else { "disabled" };
    println!("Applet {id} {state}: {}", applet.name);
    Ok(())
}

fn print_applet(applet: &AppletRecord) {
    println!("Applet:  {}", applet.name);
    println!("ID:      {}", applet.id);
    println!("Enabled: {}", applet.enabled);
    println!(
        "Trigger: {} ({})",
        applet.trigger_service.name, applet.trigger_service.slug
    );
    println!(
        "Action:  {} ({})",
        applet.action_service.name, applet.action_service.slug
    );
    if let Some(desc) = &applet.description {
        println!();
        println!("{desc}");
    }
}
