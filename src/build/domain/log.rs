//! Build output scanning.

use regex::Regex;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "the patterns are literals")]
static RUNNING_IN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---> Running in (?P<id>[a-f0-9]{12})$").expect("container pattern must compile")
});

#[expect(clippy::expect_used, reason = "the patterns are literals")]
static LAYER_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^---> (?P<id>[a-f0-9]{12})$").expect("layer pattern must compile")
});

#[expect(clippy::expect_used, reason = "the patterns are literals")]
static BUILT_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Successfully built (?P<id>[a-f0-9]{12})$").expect("image pattern must compile")
});

const SUCCESS_PREFIX: &str = "Successfully";

/// Accumulates build output and tracks transient identifiers.
///
/// Relies on the classic builder's text output; identifiers stop being
/// tracked if that format changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildLogScanner {
    lines: Vec<String>,
    container_id: Option<String>,
    image_id: Option<String>,
}

impl BuildLogScanner {
    /// Creates an empty scanner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one output frame.
    ///
    /// Frames may hold several lines. Each line is trimmed and blank lines
    /// are dropped.
    pub fn scan(&mut self, frame: &str) {
        for raw in frame.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(id) = capture_id(&RUNNING_IN, line) {
                self.container_id = Some(id);
            }
            if let Some(id) = capture_id(&LAYER_IMAGE, line) {
                self.image_id = Some(id);
            }
            if let Some(id) = capture_id(&BUILT_IMAGE, line) {
                self.container_id = None;
                self.image_id = Some(id);
            }
            self.lines.push(line.to_owned());
        }
    }

    /// Returns the retained lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the container still in progress, if any.
    #[must_use]
    pub fn container_id(&self) -> Option<&str> {
        self.container_id.as_deref()
    }

    /// Returns the most recent image id.
    #[must_use]
    pub fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref()
    }

    /// Returns `true` when the last line reports success.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.lines
            .last()
            .is_some_and(|line| line.starts_with(SUCCESS_PREFIX))
    }

    /// Returns the log text, one line per entry.
    #[must_use]
    pub fn log(&self) -> String {
        self.lines.join("\n")
    }
}

fn capture_id(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|captures| captures.name("id"))
        .map(|id| id.as_str().to_owned())
}
