//! Sections of the product and their artifact references.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::OnceLock;

/// A functional area of the product, as listed in the roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionInfo {
    /// Slug of the title (e.g. "incident-reports")
    pub id: String,
    pub title: String,
    pub description: String,
}

impl SectionInfo {
    /// Section known only from its directory name
    pub fn from_id(id: &str) -> Self {
        let title = id
            .split('-')
            .filter(|w| !w.is_empty())
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        Self {
            id: id.to_string(),
            title,
            description: String::new(),
        }
    }

    /// Route of the section detail page
    pub fn route(&self) -> String {
        section_route(&self.id)
    }
}

/// Identifies a dynamically loadable screen design
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenDesignRef {
    pub section_id: String,
    pub name: String,
}

impl ScreenDesignRef {
    pub fn new(section_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            name: name.into(),
        }
    }

    /// Route of the full-screen preview
    pub fn route(&self) -> String {
        format!("{}/screen-designs/{}", section_route(&self.section_id), self.name)
    }
}

impl std::fmt::Display for ScreenDesignRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.section_id, self.name)
    }
}

/// A screenshot image captured for a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotRef {
    pub section_id: String,
    pub name: String,
    pub path: PathBuf,
}

/// Route of a section detail page
pub fn section_route(section_id: &str) -> String {
    format!("/sections/{}", section_id)
}

/// Turn a title into a section id: lowercase, non-alphanumerics become hyphens
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

fn roadmap_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^###\s+(?:\d+[.)]\s*)?(.+?)\s*$").expect("roadmap heading pattern is valid")
    })
}

/// Parse sections from the product roadmap.
///
/// Each `### 1. Title` heading starts a section; the text up to the next
/// heading is its description. Headings that slug to nothing are skipped.
pub fn parse_roadmap(roadmap: &str) -> Vec<SectionInfo> {
    let mut sections: Vec<SectionInfo> = Vec::new();
    let mut description: Vec<&str> = Vec::new();
    // only text directly under an accepted section heading is collected
    let mut in_section = false;

    let flush = |sections: &mut Vec<SectionInfo>, description: &mut Vec<&str>| {
        if let Some(last) = sections.last_mut() {
            last.description = description.join(" ").trim().to_string();
        }
        description.clear();
    };

    for line in roadmap.lines() {
        let trimmed = line.trim();
        if let Some(caps) = roadmap_heading().captures(trimmed) {
            if in_section {
                flush(&mut sections, &mut description);
            }
            in_section = false;
            let title = caps[1].to_string();
            let id = slugify(&title);
            if id.is_empty() || sections.iter().any(|s| s.id == id) {
                continue;
            }
            sections.push(SectionInfo {
                id,
                title,
                description: String::new(),
            });
            in_section = true;
        } else if trimmed.starts_with('#') {
            if in_section {
                flush(&mut sections, &mut description);
            }
            in_section = false;
        } else if in_section && !trimmed.is_empty() {
            description.push(trimmed);
        }
    }
    if in_section {
        flush(&mut sections, &mut description);
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Incident Reports"), "incident-reports");
        assert_eq!(slugify("  Team & Roles!  "), "team-roles");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_parse_roadmap() {
        let roadmap = "# Product Roadmap\n\n## Sections\n\n\
            ### 1. Incidents\nTrack and triage incidents.\n\n\
            ### 2. Lawyer Roster\nManage lawyers\nand availability.\n\n\
            ## Notes\nNot a section.\n";
        let sections = parse_roadmap(roadmap);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, "incidents");
        assert_eq!(sections[0].description, "Track and triage incidents.");
        assert_eq!(sections[1].id, "lawyer-roster");
        assert_eq!(sections[1].title, "Lawyer Roster");
        assert_eq!(sections[1].description, "Manage lawyers and availability.");
    }

    #[test]
    fn test_parse_roadmap_skips_duplicates_and_blank_titles() {
        let roadmap = "### Customers\n### 2. Customers\n### 3. ---\n### Team\n";
        let ids: Vec<_> = parse_roadmap(roadmap).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["customers", "team"]);
    }

    #[test]
    fn test_text_under_skipped_heading_is_not_a_description() {
        let roadmap = "### 1. Customers
Accounts and contacts.

            ### 2. Customers
Duplicate entry.

            ### 3. Team
Who is on call.

            ### 4. ---
Stray text.
";
        let sections = parse_roadmap(roadmap);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].description, "Accounts and contacts.");
        assert_eq!(sections[1].id, "team");
        assert_eq!(sections[1].description, "Who is on call.");
    }

    #[test]
    fn test_section_from_id() {
        let section = SectionInfo::from_id("lawyer-roster");
        assert_eq!(section.title, "Lawyer Roster");
        assert_eq!(section.route(), "/sections/lawyer-roster");
    }

    #[test]
    fn test_screen_design_route() {
        let design = ScreenDesignRef::new("incidents", "IncidentList");
        assert_eq!(design.route(), "/sections/incidents/screen-designs/IncidentList");
        assert_eq!(design.to_string(), "incidents/IncidentList");
    }
}
