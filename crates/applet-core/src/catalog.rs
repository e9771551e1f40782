use crate::error::{FeedError, Result};
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// Service / Applet
// ---------------------------------------------------------------------------

/// An external platform an applet can trigger from or act on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub brand_color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored applet, referencing its services by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applet {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub trigger_service_id: u64,
    pub action_service_id: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_enabled() -> bool {
    true
}

/// An applet with its trigger and action services resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppletRecord {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub enabled: bool,
    pub trigger_service: Service,
    pub action_service: Service,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// AppletLookup
// ---------------------------------------------------------------------------

/// Resolves an applet id to its full identity.
pub trait AppletLookup {
    fn find_applet(&self, id: u64) -> Result<AppletRecord>;
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub applets: Vec<Applet>,
}

impl Catalog {
    /// The built-in services and applets used when no catalog file exists.
    pub fn seeded() -> Self {
        let now = seeded_at();
        let services: Vec<Service> = SEED_SERVICES
            .iter()
            .enumerate()
            .map(|(i, (name, slug, icon, color))| Service {
                id: i as u64 + 1,
                name: name.to_string(),
                slug: slug.to_string(),
                icon_url: Some(format!(
                    "https://assets.ifttt.com/images/channels/{icon}/icons/monochrome_regular.webp"
                )),
                brand_color: Some(color.to_string()),
                created_at: now,
                updated_at: now,
            })
            .collect();

        let service_id = |slug: &str| {
            services
                .iter()
                .find(|s| s.slug == slug)
                .map(|s| s.id)
                .unwrap_or_default()
        };

        let applets = SEED_APPLETS
            .iter()
            .enumerate()
            .map(|(i, (name, description, trigger, action))| Applet {
                id: i as u64 + 1,
                name: name.to_string(),
                description: Some(description.to_string()),
                enabled: true,
                trigger_service_id: service_id(*trigger),
                action_service_id: service_id(*action),
                created_at: now,
                updated_at: now,
            })
            .collect();

        Self { services, applets }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::catalog_path(root);
        if !path.exists() {
            return Err(FeedError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let catalog: Catalog = serde_yaml::from_str(&data)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the project catalog, falling back to the seeded one when absent.
    pub fn load_or_seed(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(FeedError::NotInitialized) => Ok(Self::seeded()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::catalog_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn validate(&self) -> Result<()> {
        let mut service_ids = HashSet::new();
        let mut slugs = HashSet::new();
        for s in &self.services {
            paths::validate_slug(&s.slug)?;
            if !service_ids.insert(s.id) {
                return Err(FeedError::InvalidCatalog(format!(
                    "duplicate service id {}",
                    s.id
                )));
            }
            if !slugs.insert(s.slug.as_str()) {
                return Err(FeedError::InvalidCatalog(format!(
                    "duplicate service slug '{}'",
                    s.slug
                )));
            }
        }

        let mut applet_ids = HashSet::new();
        for a in &self.applets {
            if !applet_ids.insert(a.id) {
                return Err(FeedError::InvalidCatalog(format!(
                    "duplicate applet id {}",
                    a.id
                )));
            }
            if a.name.trim().is_empty() {
                return Err(FeedError::InvalidCatalog(format!(
                    "applet {} has an empty name",
                    a.id
                )));
            }
            for sid in [a.trigger_service_id, a.action_service_id] {
                if !service_ids.contains(&sid) {
                    return Err(FeedError::InvalidCatalog(format!(
                        "applet {} references unknown service {}",
                        a.id, sid
                    )));
                }
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn service(&self, id: u64) -> Result<&Service> {
        self.services
            .iter()
            .find(|s| s.id == id)
            .ok_or(FeedError::ServiceNotFound(id))
    }

    /// Resolved applets, optionally restricted to the given enabled flag.
    pub fn applets(&self, enabled: Option<bool>) -> Result<Vec<AppletRecord>> {
        self.applets
            .iter()
            .filter(|a| enabled.is_none_or(|e| a.enabled == e))
            .map(|a| self.resolve(a))
            .collect()
    }

    pub fn applet(&self, id: u64) -> Result<AppletRecord> {
        let applet = self
            .applets
            .iter()
            .find(|a| a.id == id)
            .ok_or(FeedError::AppletNotFound(id))?;
        self.resolve(applet)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub fn set_enabled(&mut self, id: u64, enabled: bool) -> Result<AppletRecord> {
        let applet = self
            .applets
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(FeedError::AppletNotFound(id))?;
        applet.enabled = enabled;
        applet.updated_at = Utc::now();
        self.applet(id)
    }

    pub fn toggle(&mut self, id: u64) -> Result<AppletRecord> {
        let current = self.applet(id)?.enabled;
        self.set_enabled(id, !current)
    }

    fn resolve(&self, applet: &Applet) -> Result<AppletRecord> {
        Ok(AppletRecord {
            id: applet.id,
            name: applet.name.clone(),
            description: applet.description.clone(),
            enabled: applet.enabled,
            trigger_service: self.service(applet.trigger_service_id)?.clone(),
            action_service: self.service(applet.action_service_id)?.clone(),
            created_at: applet.created_at,
            updated_at: applet.updated_at,
        })
    }
}

impl AppletLookup for Catalog {
    fn find_applet(&self, id: u64) -> Result<AppletRecord> {
        self.applet(id)
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// Fixed creation time for seeded rows so an uninitialized project serves
/// identical catalog responses across requests.
fn seeded_at() -> DateTime<Utc> {
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

/// (name, slug, icon channel id, brand colour)
const SEED_SERVICES: &[(&str, &str, &str, &str)] = &[
    ("Instagram", "instagram", "28", "#E1306C"),
    ("Dropbox", "dropbox", "440404753", "#0061FF"),
    ("RSS Feed", "feed", "4", "#FF6600"),
    ("Gmail", "gmail", "33", "#EA4335"),
    ("WordPress", "wordpress", "30", "#21759B"),
    ("X (Twitter)", "twitter", "2", "#1DA1F2"),
    ("Spotify", "spotify", "51464135", "#1DB954"),
    ("Google Sheets", "google_sheets", "799977804", "#0F9D58"),
    ("iOS Photos", "ios_photos", "78", "#FF9500"),
    ("Google Drive", "google_drive", "142226432", "#4285F4"),
];

/// (name, description, trigger slug, action slug)
const SEED_APPLETS: &[(&str, &str, &str, &str)] = &[
    (
        "Save Instagram photos to Dropbox",
        "Automatically backup every new photo you post on Instagram to your Dropbox account. Never lose a memory again.",
        "instagram",
        "dropbox",
    ),
    (
        "Email me new RSS items",
        "Get an email notification whenever there's a new item in an RSS feed you follow. Stay on top of your favorite blogs and news sources.",
        "feed",
        "gmail",
    ),
    (
        "Tweet my new blog posts",
        "Automatically share your new WordPress blog posts to Twitter. Grow your audience without the manual work.",
        "wordpress",
        "twitter",
    ),
    (
        "Save Spotify tracks to a spreadsheet",
        "Keep a record of every song you save on Spotify in a Google Sheets spreadsheet. Perfect for music lovers who want to track their listening history.",
        "spotify",
        "google_sheets",
    ),
    (
        "Backup phone photos to Google Drive",
        "Automatically save every new photo from your iPhone to Google Drive. Your memories are safely stored in the cloud.",
        "ios_photos",
        "google_drive",
    ),
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
