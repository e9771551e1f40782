use crate::output::{print_json, print_table};
use anyhow::Context;
use applet_core::{
    activity::Activity,
    catalog::Catalog,
    config::Config,
    feed::{ActivityFeed, FeedFilter, PageRequest},
};
use clap::{Args, Subcommand};
use std::path::Path;

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Window start (RFC 3339 or YYYY-MM-DD; default: 30 days ago)
    #[arg(long)]
    since: Option<String>,
    /// Window end (default: now)
    #[arg(long)]
    before: Option<String>,
    /// success, failed or skipped; anything else is ignored
    #[arg(long)]
    status: Option<String>,
    /// Case-insensitive text to match
    #[arg(long)]
    search: Option<String>,
}

impl FilterArgs {
    fn into_filter(self) -> FeedFilter {
        FeedFilter {
            since: self.since.map(Into::into),
            before: self.before.map(Into::into),
            status: self.status,
            search: self.search,
        }
    }
}

#[derive(Subcommand)]
pub enum ActivitySubcommand {
    /// One page of an applet's activity feed, newest first
    List {
        applet_id: u64,
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
        /// Default: feed.default_per_page from config
        #[arg(long, allow_negative_numbers = true)]
        per_page: Option<i64>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Number of activities matching the filters
    Count {
        applet_id: u64,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Newest activities since a point in time
    Latest {
        applet_id: u64,
        #[arg(long)]
        since: String,
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
    },
}

pub fn run(root: &Path, subcmd: ActivitySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ActivitySubcommand::List {
            applet_id,
            page,
            per_page,
            filter,
        } => {
            let feed = open_feed(root, applet_id)?;
            let per_page = per_page.unwrap_or_else(|| feed.default_per_page());
            list(&feed, PageRequest::new(page, per_page), filter.into_filter(), json)
        }
        ActivitySubcommand::Count { applet_id, filter } => {
            let feed = open_feed(root, applet_id)?;
            let total = feed.count(&filter.into_filter());
            if json {
                print_json(&serde_json::json!({
                    "appletId": applet_id.to_string(),
                    "totalCount": total,
                }))
            } else {
                println!("{total}");
                Ok(())
            }
        }
        ActivitySubcommand::Latest {
            applet_id,
            since,
            limit,
        } => {
            let feed = open_feed(root, applet_id)?;
            let activities = feed.fetch_since(since, limit);
            if json {
                print_json(&serde_json::json!({ "activities": activities }))
            } else {
                print_activities(&activities);
                Ok(())
            }
        }
    }
}

fn open_feed(root: &Path, applet_id: u64) -> anyhow::Result<ActivityFeed> {
    let config = Config::load_or_default(root).context("failed to load config")?;
    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }
    let catalog = Catalog::load_or_seed(root).context("failed to load catalog")?;
    Ok(ActivityFeed::new(&catalog, applet_id)?.with_config(config.feed))
}

fn list(feed: &ActivityFeed, req: PageRequest, filter: FeedFilter, json: bool) -> anyhow::Result<()> {
    let page = feed.page(&req, &filter);
    if json {
        return print_json(&page);
    }

    let applet = feed.applet();
    println!(
        "{} ({} → {})",
        applet.name, applet.trigger_service.name, applet.action_service.name
    );
    println!();
    print_activities(&page.activities);
    println!();
    println!(
        "page {} of {} ({} activities, {} per page)",
        page.page, page.total_pages, page.total_count, page.per_page
    );
    Ok(())
}

fn print_activities(activities: &[Activity]) {
    if activities.is_empty() {
        println!("No activities.");
        return;
    }
    let rows = activities
        .iter()
        .map(|a| {
            vec![
                a.ran_at.format("%Y-%m-%d %H:%M").to_string(),
                a.status.to_string(),
                a.trigger_data.event.clone(),
                a.error_message
                    .clone()
                    .unwrap_or_else(|| a.action_data.result.clone()),
            ]
        })
        .collect();
    print_table(&["RAN AT", "STATUS", "EVENT", "RESULT"], rows);
}
