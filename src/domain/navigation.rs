//! Navigation entries parsed from the shell's free-text spec.
//!
//! Lines look like `**Incidents** → core workflow`. Parsing is total: a line
//! without bold markers or an arrow still yields a usable entry.

use serde::{Deserialize, Serialize};

/// Label used when a line carries no usable text
pub const PLACEHOLDER_LABEL: &str = "Item";

const ARROW: char = '→';

/// Icon shown next to a navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconRef {
    Dashboard,
    Home,
    Alert,
    Inbox,
    Users,
    Chart,
    Settings,
    Calendar,
    Folder,
    Message,
    Billing,
}

/// Route keys with a known icon
const ICON_TABLE: &[(&str, IconRef)] = &[
    ("dashboard", IconRef::Dashboard),
    ("overview", IconRef::Dashboard),
    ("home", IconRef::Home),
    ("incidents", IconRef::Alert),
    ("alerts", IconRef::Alert),
    ("leads", IconRef::Inbox),
    ("inbox", IconRef::Inbox),
    ("lawyers", IconRef::Users),
    ("customers", IconRef::Users),
    ("team", IconRef::Users),
    ("users", IconRef::Users),
    ("reports", IconRef::Chart),
    ("analytics", IconRef::Chart),
    ("settings", IconRef::Settings),
    ("calendar", IconRef::Calendar),
    ("documents", IconRef::Folder),
    ("files", IconRef::Folder),
    ("messages", IconRef::Message),
    ("billing", IconRef::Billing),
];

impl IconRef {
    /// Look up the icon for a route key. Unknown keys have no icon.
    pub fn for_route_key(route_key: &str) -> Option<IconRef> {
        ICON_TABLE
            .iter()
            .find(|(key, _)| *key == route_key)
            .map(|(_, icon)| *icon)
    }

    /// Terminal glyph
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Dashboard => "▦",
            Self::Home => "⌂",
            Self::Alert => "⚠",
            Self::Inbox => "✉",
            Self::Users => "☺",
            Self::Chart => "▤",
            Self::Settings => "⚙",
            Self::Calendar => "▣",
            Self::Folder => "▭",
            Self::Message => "✎",
            Self::Billing => "$",
        }
    }
}

/// One entry of the shell navigation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEntry {
    pub label: String,
    pub route_key: String,
    pub icon: Option<IconRef>,
    pub is_active: bool,
}

impl NavigationEntry {
    /// Create an inactive entry without icon
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let route_key = route_key(&label);
        Self {
            label,
            route_key,
            icon: None,
            is_active: false,
        }
    }

    /// Attach the icon from the lookup table
    pub fn with_lookup_icon(mut self) -> Self {
        self.icon = IconRef::for_route_key(&self.route_key);
        self
    }

    /// Mark active when this entry routes to the given section
    pub fn with_active_section(mut self, section_id: &str) -> Self {
        self.is_active = self.route_key == section_id;
        self
    }
}

/// Lowercase the label and collapse whitespace runs into single hyphens
pub fn route_key(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Parse a single navigation line. Never fails.
pub fn parse_nav_line(line: &str) -> NavigationEntry {
    let label = bold_span(line)
        .or_else(|| pre_arrow_text(line))
        .unwrap_or(PLACEHOLDER_LABEL);
    NavigationEntry::new(label)
}

/// Text of the first `**...**` pair, if non-blank
fn bold_span(line: &str) -> Option<&str> {
    let start = line.find("**")? + 2;
    let len = line[start..].find("**")?;
    let label = line[start..start + len].trim();
    (!label.is_empty()).then_some(label)
}

/// Text before the first arrow, or the whole line when there is none
fn pre_arrow_text(line: &str) -> Option<&str> {
    let head = line.split(ARROW).next().unwrap_or_default().trim();
    (!head.is_empty()).then_some(head)
}

/// Extract navigation entries from a shell spec document.
///
/// Uses the bullets under the first heading mentioning "navigation". Without
/// such a heading, every top-level bullet containing a bold span is used.
pub fn parse_navigation(spec: &str) -> Vec<NavigationEntry> {
    let mut in_section = false;
    let mut section_level = 0;
    let mut found_heading = false;
    let mut entries = Vec::new();

    for line in spec.lines() {
        let trimmed = line.trim_start();
        if let Some(level) = heading_level(trimmed) {
            if in_section && level <= section_level {
                break;
            }
            if !found_heading && trimmed.to_lowercase().contains("navigation") {
                found_heading = true;
                in_section = true;
                section_level = level;
            }
            continue;
        }
        if in_section {
            if let Some(item) = bullet_text(trimmed) {
                entries.push(parse_nav_line(item));
            }
        }
    }

    if found_heading {
        return entries;
    }

    spec.lines()
        .filter(|line| !line.starts_with(char::is_whitespace))
        .filter_map(bullet_text)
        .filter(|item| item.contains("**"))
        .map(parse_nav_line)
        .collect()
}

fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '#').count();
    (level > 0 && line[level..].starts_with(' ')).then_some(level)
}

fn bullet_text(line: &str) -> Option<&str> {
    for marker in ["- ", "* ", "+ "] {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some(rest.trim());
        }
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        if let Some(rest) = line[digits..].strip_prefix(". ") {
            return Some(rest.trim());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_label() {
        let entry = parse_nav_line("**Incidents** → core workflow");
        assert_eq!(entry.label, "Incidents");
        assert_eq!(entry.route_key, "incidents");
        assert!(!entry.is_active);
    }

    #[test]
    fn test_plain_line_uses_whole_text() {
        let entry = parse_nav_line("Dashboard stuff");
        assert_eq!(entry.label, "Dashboard stuff");
        assert_eq!(entry.route_key, "dashboard-stuff");
    }

    #[test]
    fn test_pre_arrow_fallback() {
        let entry = parse_nav_line("  Team   Members → manage people");
        assert_eq!(entry.label, "Team   Members");
        assert_eq!(entry.route_key, "team-members");
    }

    #[test]
    fn test_placeholder_fallback() {
        assert_eq!(parse_nav_line("").label, PLACEHOLDER_LABEL);
        assert_eq!(parse_nav_line("   → only description").label, "Item");
        assert_eq!(parse_nav_line("→").route_key, "item");
    }

    #[test]
    fn test_malformed_bold_markers() {
        assert_eq!(parse_nav_line("**Unclosed → rest").label, "**Unclosed");
        assert_eq!(parse_nav_line("**** → x").label, "****");
        assert_eq!(parse_nav_line("**  ** Reports").label, "**  ** Reports");
        assert_eq!(parse_nav_line("a **B** **C**").label, "B");
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let inputs = [
            "", "*", "**", "***", "→→", "**→**", "🚀 **Ünïcode** → ✓", "\t\n", "** x",
        ];
        for input in inputs {
            let entry = parse_nav_line(input);
            assert!(!entry.label.is_empty());
        }
    }

    #[test]
    fn test_icon_lookup() {
        assert_eq!(IconRef::for_route_key("incidents"), Some(IconRef::Alert));
        assert_eq!(IconRef::for_route_key("settings"), Some(IconRef::Settings));
        assert_eq!(IconRef::for_route_key("dashboard-stuff"), None);

        let entry = parse_nav_line("**Lawyers** → roster").with_lookup_icon();
        assert_eq!(entry.icon, Some(IconRef::Users));
    }

    #[test]
    fn test_active_section() {
        let entry = parse_nav_line("**Incidents**").with_active_section("incidents");
        assert!(entry.is_active);
        let entry = parse_nav_line("**Leads**").with_active_section("incidents");
        assert!(!entry.is_active);
    }

    #[test]
    fn test_parse_navigation_section() {
        let spec = "# Application Shell\n\n\
            Sidebar layout.\n\n\
            ## Navigation Structure\n\n\
            - **Incidents** → core workflow\n\
            - **Lawyers** → roster\n\
            1. **Settings** → preferences\n\n\
            ## Layout\n\n\
            - **Sidebar** → left column\n";
        let entries = parse_navigation(spec);
        let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["Incidents", "Lawyers", "Settings"]);
    }

    #[test]
    fn test_parse_navigation_keeps_nested_headings() {
        let spec = "## Navigation\n### Primary\n- **Home**\n### Secondary\n- **Help**\n## Other\n- **Nope**\n";
        let labels: Vec<_> = parse_navigation(spec).into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["Home", "Help"]);
    }

    #[test]
    fn test_parse_navigation_without_heading() {
        let spec = "Intro text\n- **Incidents** → a\n- plain bullet\n  - **Nested** → b\n";
        let labels: Vec<_> = parse_navigation(spec).into_iter().map(|e| e.label).collect();
        assert_eq!(labels, ["Incidents"]);
    }
}
