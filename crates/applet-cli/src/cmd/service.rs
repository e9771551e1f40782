use crate::output::{print_json, print_table};
use anyhow::Context;
use applet_core::catalog::Catalog;
use applet_server::routes::services::service_json;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ServiceSubcommand {
    /// List all services
    List,
    /// Show one service
    Show { id: u64 },
}

pub fn run(root: &Path, subcmd: ServiceSubcommand, json: bool) -> anyhow::Result<()> {
    let catalog = Catalog::load_or_seed(root).context("failed to load catalog")?;
    match subcmd {
        ServiceSubcommand::List => list(&catalog, json),
        ServiceSubcommand::Show { id } => show(&catalog, id, json),
    }
}

fn list(catalog: &Catalog, json: bool) -> anyhow::Result<()> {
    let services = catalog.services();
    if json {
        let list: Vec<_> = services.iter().map(service_json).collect();
        return print_json(&list);
    }
    if services.is_empty() {
        println!("No services.");
        return Ok(());
    }

    let rows = services
        .iter()
        .map(|s| {
            vec![
                s.id.to_string(),
                s.slug.clone(),
                s.name.clone(),
                s.brand_color.clone().unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(&["ID", "SLUG", "NAME", "COLOR"], rows);
    Ok(())
}

fn show(catalog: &Catalog, id: u64, json: bool) -> anyhow::Result<()> {
    let service = catalog.service(id)?;
    if json {
        return print_json(&service_json(service));
    }

    println!("Service: {} ({})", service.name, service.slug);
    println!("ID:      {}", service.id);
    if let Some(color) = &service.brand_color {
        println!("Color:   {color}");
    }
    if let Some(icon) = &service.icon_url {
        println!("Icon:    {icon}");
    }
    Ok(())
}
