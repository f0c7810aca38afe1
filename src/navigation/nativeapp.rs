//! Companion native-app detection.
//!
//! Some hosts have a native app the embedder may offer instead of an
//! in-browser render. Detection is a pure substring check against a small
//! static table; the verdict is a hint for the view layer and never changes
//! a navigation decision.

/// Hosts with a known companion app, first substring match wins.
const KNOWN_APPS: &[(&str, &str)] = &[
    ("instagram.com", "Instagram"),
    ("youtube.com", "YouTube"),
    ("youtu.be", "YouTube"),
    ("twitter.com", "Twitter"),
    ("facebook.com", "Facebook"),
    ("reddit.com", "Reddit"),
    ("tiktok.com", "TikTok"),
    ("spotify.com", "Spotify"),
    ("twitch.tv", "Twitch"),
    ("linkedin.com", "LinkedIn"),
];

/// Matches hosts against the companion-app table. Pure; no state, no I/O.
#[derive(Debug, Clone)]
pub struct NativeAppClassifier {
    entries: &'static [(&'static str, &'static str)],
}

impl NativeAppClassifier {
    pub fn new() -> Self {
        Self {
            entries: KNOWN_APPS,
        }
    }

    /// Classifier over a caller-supplied table, for tests.
    pub fn with_entries(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// The app name for `host`, or `None` when no companion app is known.
    pub fn matching_app(&self, host: &str) -> Option<&'static str> {
        let host = host.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(fragment, _)| host.contains(fragment))
            .map(|(_, app)| *app)
    }
}

impl Default for NativeAppClassifier {
    fn default() -> Self {
        Self::new()
    }
}
