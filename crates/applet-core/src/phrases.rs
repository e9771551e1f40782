//! Phrase banks used to synthesize activity text.
//!
//! Trigger events and action templates are keyed by service slug. Unknown
//! slugs fall back to the generic entries.

pub const FALLBACK_TRIGGER_EVENTS: &[&str] = &["Trigger event occurred"];
pub const FALLBACK_ACTION_RESULTS: &[&str] = &["Action completed"];
pub const FALLBACK_TRIGGER_DETAIL: &str = "Trigger data";
pub const SKIPPED_RESULT: &str = "Skipped - conditions not met";

pub fn trigger_events(slug: &str) -> &'static [&'static str] {
    match slug {
        "instagram" => &[
            "New photo posted by you",
            "New photo with specific hashtag",
            "New video posted by you",
            "You're tagged in a photo",
        ],
        "dropbox" | "google_drive" => &["New file in folder", "File shared with you", "File updated"],
        "feed" => &["New feed item", "New feed item matches", "Feed updated"],
        "gmail" => &[
            "New email received",
            "New email from sender",
            "New email with label",
            "New email matching search",
        ],
        "wordpress" => &["New post published", "Post updated", "New comment received"],
        "twitter" => &[
            "New tweet by you",
            "New tweet from search",
            "New follower",
            "You're mentioned",
        ],
        "spotify" => &["New saved track", "New playlist created", "Track added to playlist"],
        "google_sheets" => &["New row added", "Row updated", "Cell updated"],
        "ios_photos" => &["New photo taken", "New screenshot", "New photo in album"],
        _ => FALLBACK_TRIGGER_EVENTS,
    }
}

pub fn action_templates(slug: &str) -> &'static [&'static str] {
    match slug {
        "instagram" => &["Posted photo", "Added photo to collection", "Liked photo"],
        "dropbox" => &[
            "Uploaded file: {{filename}}",
            "Created text file: {{filename}}",
            "Moved file to folder",
        ],
        "gmail" => &[
            "Sent email to {{email}}",
            "Created draft email",
            "Added label to email",
        ],
        "wordpress" => &["Created post: {{title}}", "Updated post", "Added tag to post"],
        "twitter" => &["Posted tweet: {{text}}", "Retweeted", "Liked tweet"],
        "spotify" => &["Saved track: {{track}}", "Added to playlist", "Created playlist"],
        "google_sheets" => &[
            "Added row to spreadsheet",
            "Updated cell in {{sheet}}",
            "Created new sheet",
        ],
        "ios_photos" => &["Saved photo to album", "Shared photo", "Deleted photo"],
        "google_drive" => &[
            "Uploaded file: {{filename}}",
            "Created folder",
            "Shared file with {{email}}",
        ],
        _ => FALLBACK_ACTION_RESULTS,
    }
}

pub const ERROR_MESSAGES: &[&str] = &[
    "Authentication failed - please reconnect your account",
    "Rate limit exceeded - waiting to retry",
    "Service temporarily unavailable",
    "Invalid credentials",
    "Network timeout",
    "File not found",
    "Permission denied",
    "Quota exceeded",
    "Invalid request format",
];

pub const CAPTIONS: &[&str] = &[
    "Beautiful sunset today! 🌅",
    "Amazing view from the top! 🏔️",
    "Loving this moment ❤️",
    "Good vibes only ✨",
    "Adventure awaits! 🌍",
];

pub const FEED_TITLES: &[&str] = &[
    "New Features in Ruby on Rails 8.0",
    "10 Tips for Better Code Reviews",
    "Understanding GraphQL Schema Design",
    "The Future of Web Development",
    "Building Scalable APIs with Ruby",
];

pub const EMAIL_NAMES: &[&str] = &["john", "sarah", "mike", "emma", "alex"];
pub const EMAIL_DOMAINS: &[&str] = &["gmail.com", "example.com", "company.com"];

pub const EMAIL_SUBJECTS: &[&str] = &[
    "Weekly Newsletter",
    "Important Update",
    "Meeting Reminder",
    "Your Order Has Shipped",
    "New Comment on Your Post",
];

pub const BLOG_TITLES: &[&str] = &[
    "Getting Started with React Hooks",
    "My Journey Learning Ruby",
    "10 Must-Have VS Code Extensions",
    "Building a REST API from Scratch",
    "Why I Switched to TypeScript",
];

pub const TWEETS: &[&str] = &[
    "Just deployed a new feature! 🚀 #webdev #coding",
    "Learning something new every day 💡",
    "Great article on software architecture",
    "Coffee + Code = Perfect morning ☕️",
    "Excited about this new project! 🎉",
];

pub const TRACKS: &[&str] = &[
    "Bohemian Rhapsody",
    "Imagine",
    "Stairway to Heaven",
    "Sweet Child O' Mine",
    "Billie Jean",
];

pub const ARTISTS: &[&str] = &[
    "Queen",
    "John Lennon",
    "Led Zeppelin",
    "Guns N' Roses",
    "Michael Jackson",
];

pub const FILE_EXTENSIONS: &[&str] = &["jpg", "png", "pdf", "docx", "txt"];

/// Tweets quoted inside an action result are cut to this many characters.
pub const TWEET_EXCERPT_CHARS: usize = 51;
