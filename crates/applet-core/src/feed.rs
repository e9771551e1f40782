//! Deterministic mock activity feed.
//!
//! Activities are never stored. Every call re-derives the full window from a
//! PRNG seeded with the applet id, then filters and slices it. Because the
//! draw order per activity is fixed, the same applet queried with the same
//! `before` bound yields the same sequence on every call, which is what makes
//! recompute-then-slice pagination consistent.
//!
//! Draw order per activity:
//! 1. interval in minutes, `5..=360`
//! 2. status roll, `0..100`
//! 3. trigger event
//! 4. trigger details (service specific)
//! 5. action template, then one draw per `{{token}}` it contains
//! 6. error message, only when the status is `failed`

use crate::activity::{activity_id, ActionData, Activity, TriggerData};
use crate::catalog::{AppletLookup, AppletRecord};
use crate::config::FeedConfig;
use crate::error::Result;
use crate::phrases;
use crate::types::ActivityStatus;
use crate::window::{TimeInput, Window};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MIN_INTERVAL_MINUTES: i64 = 5;
const MAX_INTERVAL_MINUTES: i64 = 360;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Filters shared by `fetch` and `count`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedFilter {
    pub since: Option<TimeInput>,
    pub before: Option<TimeInput>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl FeedFilter {
    pub fn since(mut self, t: impl Into<TimeInput>) -> Self {
        self.since = Some(t.into());
        self
    }

    pub fn before(mut self, t: impl Into<TimeInput>) -> Self {
        self.before = Some(t.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// The status to filter on, if the supplied text names one.
    fn status_filter(&self) -> Option<ActivityStatus> {
        self.status.as_deref().and_then(ActivityStatus::parse_filter)
    }

    /// Lowercased search term, if non-blank.
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase)
    }
}

/// Raw, caller-supplied pagination. Any values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: i64, per_page: i64) -> Self {
        Self { page, per_page }
    }

    /// Clamp to `page >= 1` and `1 <= per_page <= max_per_page`.
    pub fn normalize(self, max_per_page: u32) -> (usize, usize) {
        let max = i64::from(max_per_page.max(1));
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, max);
        (page as usize, per_page as usize)
    }
}

/// One page of the feed plus the totals a paginated UI needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPage {
    pub activities: Vec<Activity>,
    pub total_count: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

// ---------------------------------------------------------------------------
// ActivityFeed
// ---------------------------------------------------------------------------

/// Activity generator bound to one applet.
#[derive(Debug, Clone)]
pub struct ActivityFeed {
    applet: AppletRecord,
    config: FeedConfig,
    now: Option<DateTime<Utc>>,
}

impl ActivityFeed {
    /// Resolve `applet_id` through `lookup`. Fails with `AppletNotFound`.
    pub fn new(lookup: &impl AppletLookup, applet_id: u64) -> Result<Self> {
        Ok(Self::from_record(lookup.find_applet(applet_id)?))
    }

    pub fn from_record(applet: AppletRecord) -> Self {
        Self {
            applet,
            config: FeedConfig::default(),
            now: None,
        }
    }

    pub fn with_config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Pin "now" for default window bounds instead of reading the clock.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn applet(&self) -> &AppletRecord {
        &self.applet
    }

    /// The filtered activities on the requested page, newest first.
    /// Pages past the end are empty.
    pub fn fetch(&self, req: &PageRequest, filter: &FeedFilter) -> Vec<Activity> {
        let (page, per_page) = req.normalize(self.config.max_per_page);
        let filtered = self.filtered(filter);
        let offset = (page - 1).saturating_mul(per_page);
        filtered.into_iter().skip(offset).take(per_page).collect()
    }

    /// Number of activities matching `filter`, consistent with `fetch`.
    pub fn count(&self, filter: &FeedFilter) -> usize {
        self.filtered(filter).len()
    }

    /// First page of up to `limit` activities since `since`; for polling.
    pub fn fetch_since(&self, since: impl Into<TimeInput>, limit: i64) -> Vec<Activity> {
        let filter = FeedFilter::default().since(since);
        self.fetch(&PageRequest::new(1, limit), &filter)
    }

    /// `fetch` and `count` in one pass over a single generated window.
    pub fn page(&self, req: &PageRequest, filter: &FeedFilter) -> ActivityPage {
        let (page, per_page) = req.normalize(self.config.max_per_page);
        let filtered = self.filtered(filter);
        let total_count = filtered.len();
        let offset = (page - 1).saturating_mul(per_page);
        let activities = filtered.into_iter().skip(offset).take(per_page).collect();
        ActivityPage {
            activities,
            total_count,
            page,
            per_page,
            total_pages: total_count.div_ceil(per_page),
        }
    }

    /// Page size used when a caller supplies none.
    pub fn default_per_page(&self) -> i64 {
        i64::from(self.config.default_per_page)
    }

    fn filtered(&self, filter: &FeedFilter) -> Vec<Activity> {
        let window = self.window(filter);
        let mut activities = self.generate(window);
        let generated = activities.len();

        if let Some(status) = filter.status_filter() {
            activities.retain(|a| a.status == status);
        }
        if let Some(term) = filter.search_term() {
            activities.retain(|a| a.matches_search(&term));
        }

        tracing::debug!(
            applet_id = self.applet.id,
            since = %window.since.to_rfc3339_opts(SecondsFormat::Secs, true),
            before = %window.before.to_rfc3339_opts(SecondsFormat::Secs, true),
            generated,
            matched = activities.len(),
            "activity feed generated"
        );
        activities
    }

    fn window(&self, filter: &FeedFilter) -> Window {
        let now = self.now.unwrap_or_else(Utc::now);
        Window::resolve(
            filter.since.as_ref(),
            filter.before.as_ref(),
            now,
            self.config.default_window_days,
        )
    }

    /// Walk backward from `window.before`, one activity per random interval,
    /// until the walk leaves the window or the cap is reached.
    pub fn generate(&self, window: Window) -> Vec<Activity> {
        let mut rng = StdRng::seed_from_u64(self.applet.id);
        let cap = self.config.max_activities;
        let mut activities = Vec::with_capacity(cap.min(256));
        let mut current = window.before;

        while current > window.since && activities.len() < cap {
            let interval = rng.gen_range(MIN_INTERVAL_MINUTES..=MAX_INTERVAL_MINUTES);
            current = match current.checked_sub_signed(Duration::minutes(interval)) {
                Some(t) if t >= window.since => t,
                _ => break,
            };
            activities.push(self.synthesize(current, &mut rng));
        }

        activities.sort_by(|a, b| b.ran_at.cmp(&a.ran_at));
        activities
    }

    fn synthesize(&self, ran_at: DateTime<Utc>, rng: &mut StdRng) -> Activity {
        let status = ActivityStatus::from_roll(rng.gen_range(0..100));
        let trigger_data = self.trigger_data(ran_at, rng);
        let action_data = self.action_data(status, rng);
        let error_message = (status == ActivityStatus::Failed)
            .then(|| pick(rng, phrases::ERROR_MESSAGES).to_string());

        Activity {
            id: activity_id(self.applet.id, ran_at),
            applet_id: self.applet.id,
            status,
            ran_at,
            trigger_data,
            action_data,
            error_message,
        }
    }

    fn trigger_data(&self, ran_at: DateTime<Utc>, rng: &mut StdRng) -> TriggerData {
        let service = &self.applet.trigger_service;
        let event = pick(rng, phrases::trigger_events(&service.slug));
        TriggerData {
            service: service.name.clone(),
            event: event.to_string(),
            details: trigger_details(&service.slug, ran_at, rng),
        }
    }

    fn action_data(&self, status: ActivityStatus, rng: &mut StdRng) -> ActionData {
        let service = &self.applet.action_service;
        let template = pick(rng, phrases::action_templates(&service.slug));
        let text = interpolate(template, rng);
        let result = if status == ActivityStatus::Skipped {
            phrases::SKIPPED_RESULT.to_string()
        } else {
            text
        };
        ActionData {
            service: service.name.clone(),
            result,
            completed: status == ActivityStatus::Success,
        }
    }
}

// ---------------------------------------------------------------------------
// Content generators
// ---------------------------------------------------------------------------

fn pick(rng: &mut StdRng, items: &'static [&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}

fn trigger_details(
    slug: &str,
    ran_at: DateTime<Utc>,
    rng: &mut StdRng,
) -> BTreeMap<String, String> {
    let pairs: Vec<(&str, String)> = match slug {
        "instagram" => {
            let photo_id = rng.gen_range(1_000_000..=9_999_999u32).to_string();
            vec![
                ("photo_id", photo_id),
                ("caption", pick(rng, phrases::CAPTIONS).to_string()),
            ]
        }
        "feed" => {
            let title = pick(rng, phrases::FEED_TITLES).to_string();
            let n = rng.gen_range(1..=1000u32);
            vec![
                ("title", title),
                ("url", format!("https://example.com/article-{n}")),
            ]
        }
        "gmail" => {
            let from = email(rng);
            vec![
                ("from", from),
                ("subject", pick(rng, phrases::EMAIL_SUBJECTS).to_string()),
            ]
        }
        "wordpress" => {
            let title = pick(rng, phrases::BLOG_TITLES).to_string();
            let n = rng.gen_range(1..=1000u32);
            vec![
                ("post_title", title),
                ("url", format!("https://blog.example.com/{n}")),
            ]
        }
        "twitter" => {
            let tweet = pick(rng, phrases::TWEETS).to_string();
            vec![("tweet_text", tweet), ("username", username(rng))]
        }
        "spotify" => {
            let track = pick(rng, phrases::TRACKS).to_string();
            vec![
                ("track", track),
                ("artist", pick(rng, phrases::ARTISTS).to_string()),
            ]
        }
        "ios_photos" => {
            let n = rng.gen_range(1000..=9999u32);
            vec![
                ("photo_id", format!("IMG_{n}.jpg")),
                (
                    "taken_at",
                    ran_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                ),
            ]
        }
        _ => vec![("data", phrases::FALLBACK_TRIGGER_DETAIL.to_string())],
    };
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Replace each `{{token}}` in `template`. Tokens are visited in a fixed
/// order and each present token costs exactly one draw.
fn interpolate(template: &str, rng: &mut StdRng) -> String {
    let mut text = template.to_string();
    let tokens: [(&str, fn(&mut StdRng) -> String); 6] = [
        ("{{filename}}", filename),
        ("{{email}}", email),
        ("{{title}}", blog_title),
        ("{{text}}", tweet_excerpt),
        ("{{track}}", track),
        ("{{sheet}}", sheet),
    ];
    for (token, generate) in tokens {
        if text.contains(token) {
            let value = generate(rng);
            text = text.replace(token, &value);
        }
    }
    text
}

fn email(rng: &mut StdRng) -> String {
    let name = pick(rng, phrases::EMAIL_NAMES);
    let n = rng.gen_range(100..=999u32);
    let domain = pick(rng, phrases::EMAIL_DOMAINS);
    format!("{name}.{n}@{domain}")
}

fn blog_title(rng: &mut StdRng) -> String {
    pick(rng, phrases::BLOG_TITLES).to_string()
}

fn tweet_excerpt(rng: &mut StdRng) -> String {
    pick(rng, phrases::TWEETS)
        .chars()
        .take(phrases::TWEET_EXCERPT_CHARS)
        .collect()
}

fn track(rng: &mut StdRng) -> String {
    pick(rng, phrases::TRACKS).to_string()
}

fn sheet(rng: &mut StdRng) -> String {
    format!("Sheet{}", rng.gen_range(1..=5u32))
}

fn username(rng: &mut StdRng) -> String {
    format!("@user{}", rng.gen_range(100..=999u32))
}

fn filename(rng: &mut StdRng) -> String {
    let n = rng.gen_range(1000..=9999u32);
    format!("file_{n}.{}", pick(rng, phrases::FILE_EXTENSIONS))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
