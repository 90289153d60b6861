//! Read-only presence queries against the product artifact store.
//!
//! Missing artifacts are the common case while a product is being designed,
//! so every query answers false, empty or `None` instead of failing.

use crate::domain::{parse_roadmap, ScreenDesignRef, ScreenshotRef, SectionInfo};
use std::fs;
use std::path::{Path, PathBuf};

const PRODUCT_OVERVIEW: &str = "product-overview.md";
const PRODUCT_ROADMAP: &str = "product-roadmap.md";
const DATA_MODEL: &str = "data-model/data-model.md";
const DESIGN_TOKENS: &[&str] = &["design-system/colors.json", "design-system/typography.json"];
const SHELL_SPEC: &str = "shell/spec.md";
const SHELL_LAYOUT: &str = "shell/layout.toml";
const SECTIONS_DIR: &str = "sections";
const SECTION_SPEC: &str = "spec.md";
const SECTION_DATA: &str = "data.json";
const SCREENS_DIR: &str = "screens";
const SCREEN_DESIGN_EXTENSION: &str = "md";
const SCREENSHOT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// Answers presence questions about phase and section artifacts
#[derive(Debug, Clone)]
pub struct ArtifactProbe {
    product_directory: PathBuf,
    export_directory: PathBuf,
}

impl ArtifactProbe {
    /// Create a probe over a product directory
    pub fn new(product_directory: PathBuf, export_directory: PathBuf) -> Self {
        Self {
            product_directory,
            export_directory,
        }
    }

    /// product-overview.md exists
    pub fn has_product_overview(&self) -> bool {
        self.product_directory.join(PRODUCT_OVERVIEW).is_file()
    }

    /// product-roadmap.md exists
    pub fn has_roadmap(&self) -> bool {
        self.product_directory.join(PRODUCT_ROADMAP).is_file()
    }

    /// data-model.md exists
    pub fn has_data_model(&self) -> bool {
        self.product_directory.join(DATA_MODEL).is_file()
    }

    /// Both color and typography tokens exist
    pub fn has_design_tokens(&self) -> bool {
        DESIGN_TOKENS
            .iter()
            .all(|token| self.product_directory.join(token).is_file())
    }

    /// The shell spec exists
    pub fn has_shell_spec(&self) -> bool {
        self.product_directory.join(SHELL_SPEC).is_file()
    }

    /// The shell component exists
    pub fn has_shell_components(&self) -> bool {
        self.shell_layout_path().is_file()
    }

    /// The export phase has produced its output
    pub fn has_export(&self) -> bool {
        self.export_directory.is_dir()
    }

    /// The section has a spec.md
    pub fn has_spec(&self, section_id: &str) -> bool {
        self.section_file(section_id, SECTION_SPEC)
            .is_some_and(|p| p.is_file())
    }

    /// The section has sample data
    pub fn has_sample_data(&self, section_id: &str) -> bool {
        self.section_file(section_id, SECTION_DATA)
            .is_some_and(|p| p.is_file())
    }

    /// Screen designs of a section, sorted by name
    pub fn list_screen_designs(&self, section_id: &str) -> Vec<ScreenDesignRef> {
        let Some(dir) = self.section_file(section_id, SCREENS_DIR) else {
            return Vec::new();
        };

        let mut designs: Vec<_> = files_with_extensions(&dir, &[SCREEN_DESIGN_EXTENSION])
            .into_iter()
            .filter_map(|path| file_stem(&path))
            .map(|name| ScreenDesignRef::new(section_id, name))
            .collect();
        designs.sort_by(|a, b| a.name.cmp(&b.name));
        designs
    }

    /// Screenshots of a section, sorted by name
    pub fn list_screenshots(&self, section_id: &str) -> Vec<ScreenshotRef> {
        let Some(dir) = self.section_directory(section_id) else {
            return Vec::new();
        };

        let mut shots: Vec<_> = files_with_extensions(&dir, SCREENSHOT_EXTENSIONS)
            .into_iter()
            .filter_map(|path| {
                let name = file_stem(&path)?;
                Some(ScreenshotRef {
                    section_id: section_id.to_string(),
                    name,
                    path,
                })
            })
            .collect();
        shots.sort_by(|a, b| a.name.cmp(&b.name));
        shots
    }

    /// Sections in roadmap order, followed by unlisted section directories
    pub fn list_sections(&self) -> Vec<SectionInfo> {
        let mut sections = self
            .read_product_file(PRODUCT_ROADMAP)
            .map(|roadmap| parse_roadmap(&roadmap))
            .unwrap_or_default();

        let mut extra: Vec<String> = fs::read_dir(self.product_directory.join(SECTIONS_DIR))
            .into_iter()
            .flatten()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|id| is_valid_id(id) && !sections.iter().any(|s| &s.id == id))
            .collect();
        extra.sort();

        sections.extend(extra.iter().map(|id| SectionInfo::from_id(id)));
        sections
    }

    /// Done flags for the five global phases, in pipeline order
    pub fn phase_done_flags(&self) -> [bool; 5] {
        let sections = self.list_sections();
        let sections_done = !sections.is_empty()
            && sections
                .iter()
                .all(|s| !self.list_screen_designs(&s.id).is_empty());

        [
            self.has_product_overview(),
            self.has_data_model(),
            self.has_design_tokens() && self.has_shell_spec(),
            sections_done,
            self.has_export(),
        ]
    }

    /// Done flags for the four steps of a section
    pub fn section_done_flags(&self, section_id: &str) -> [bool; 4] {
        [
            self.has_spec(section_id),
            self.has_sample_data(section_id),
            !self.list_screen_designs(section_id).is_empty(),
            !self.list_screenshots(section_id).is_empty(),
        ]
    }

    /// Text of product-overview.md
    pub fn read_product_overview(&self) -> Option<String> {
        self.read_product_file(PRODUCT_OVERVIEW)
    }

    /// Text of data-model.md
    pub fn read_data_model(&self) -> Option<String> {
        self.read_product_file(DATA_MODEL)
    }

    /// Text of the shell spec
    pub fn read_shell_spec(&self) -> Option<String> {
        self.read_product_file(SHELL_SPEC)
    }

    /// Text of the shell spec, read without blocking the runtime
    pub async fn load_shell_spec(&self) -> Option<String> {
        tokio::fs::read_to_string(self.product_directory.join(SHELL_SPEC))
            .await
            .ok()
    }

    /// Text of a section's spec.md
    pub fn read_section_spec(&self, section_id: &str) -> Option<String> {
        let path = self.section_file(section_id, SECTION_SPEC)?;
        fs::read_to_string(path).ok()
    }

    /// Where a screen design document lives
    pub fn screen_design_path(&self, design: &ScreenDesignRef) -> Option<PathBuf> {
        if !is_valid_id(&design.name) {
            return None;
        }
        let file = format!("{}.{}", design.name, SCREEN_DESIGN_EXTENSION);
        Some(
            self.section_file(&design.section_id, SCREENS_DIR)?
                .join(file),
        )
    }

    /// Where the shell component lives
    pub fn shell_layout_path(&self) -> PathBuf {
        self.product_directory.join(SHELL_LAYOUT)
    }

    fn read_product_file(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.product_directory.join(relative)).ok()
    }

    fn section_directory(&self, section_id: &str) -> Option<PathBuf> {
        if !is_valid_id(section_id) {
            return None;
        }
        Some(self.product_directory.join(SECTIONS_DIR).join(section_id))
    }

    fn section_file(&self, section_id: &str, relative: &str) -> Option<PathBuf> {
        self.section_directory(section_id)
            .map(|dir| dir.join(relative))
    }
}

/// Identifiers are single, non-empty path components
fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(&['/', '\\'][..])
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}

fn files_with_extensions(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Build a product tree with two sections; only "incidents" is fleshed out
    pub(crate) fn create_test_product() -> (TempDir, ArtifactProbe) {
        let temp = TempDir::new().unwrap();
        let product = temp.path().join("product");
        let incidents = product.join("sections").join("incidents");
        fs::create_dir_all(incidents.join("screens")).unwrap();
        fs::create_dir_all(product.join("sections").join("lawyers")).unwrap();

        fs::write(product.join(PRODUCT_OVERVIEW), "# Overview").unwrap();
        fs::write(
            product.join(PRODUCT_ROADMAP),
            "# Roadmap\n\n### 1. Incidents\nTriage.\n\n### 2. Lawyers\nRoster.\n",
        )
        .unwrap();
        fs::write(incidents.join(SECTION_SPEC), "# Incidents spec").unwrap();
        fs::write(incidents.join(SECTION_DATA), "{\"incidents\": []}").unwrap();
        fs::write(
            incidents.join("screens").join("IncidentList.md"),
            "# Incidents\n\n| Id | Title |\n|----|-------|\n| 1 | Outage |\n",
        )
        .unwrap();
        fs::write(incidents.join("screens").join("notes.txt"), "ignored").unwrap();

        let probe = ArtifactProbe::new(product, temp.path().join("product-plan"));
        (temp, probe)
    }

    #[test]
    fn test_phase_artifacts() {
        let (temp, probe) = create_test_product();
        assert!(probe.has_product_overview());
        assert!(probe.has_roadmap());
        assert!(!probe.has_data_model());
        assert!(!probe.has_design_tokens());
        assert!(!probe.has_shell_spec());
        assert!(!probe.has_shell_components());
        assert!(!probe.has_export());

        fs::create_dir_all(temp.path().join("product-plan")).unwrap();
        assert!(probe.has_export());
    }

    #[test]
    fn test_design_tokens_need_both_files() {
        let (temp, probe) = create_test_product();
        let tokens = temp.path().join("product").join("design-system");
        fs::create_dir_all(&tokens).unwrap();
        fs::write(tokens.join("colors.json"), "{}").unwrap();
        assert!(!probe.has_design_tokens());
        fs::write(tokens.join("typography.json"), "{}").unwrap();
        assert!(probe.has_design_tokens());
    }

    #[test]
    fn test_section_queries() {
        let (_temp, probe) = create_test_product();
        assert!(probe.has_spec("incidents"));
        assert!(probe.has_sample_data("incidents"));
        assert_eq!(
            probe.list_screen_designs("incidents"),
            vec![ScreenDesignRef::new("incidents", "IncidentList")]
        );
        assert!(probe.list_screenshots("incidents").is_empty());
        assert_eq!(probe.section_done_flags("incidents"), [true, true, true, false]);
        assert_eq!(probe.section_done_flags("lawyers"), [false; 4]);
    }

    #[test]
    fn test_unknown_and_invalid_ids_are_not_found() {
        let (_temp, probe) = create_test_product();
        for id in ["", "missing", "..", "../product", "a/b"] {
            assert!(!probe.has_spec(id));
            assert!(!probe.has_sample_data(id));
            assert!(probe.list_screen_designs(id).is_empty());
            assert!(probe.list_screenshots(id).is_empty());
            assert!(probe.read_section_spec(id).is_none());
        }
    }

    #[tokio::test]
    async fn test_load_shell_spec() {
        let (temp, probe) = create_test_product();
        assert_eq!(probe.load_shell_spec().await, None);

        let shell = temp.path().join("product").join("shell");
        fs::create_dir_all(&shell).unwrap();
        fs::write(shell.join("spec.md"), "## Navigation\n- **Incidents**\n").unwrap();
        assert_eq!(
            probe.load_shell_spec().await.as_deref(),
            Some("## Navigation\n- **Incidents**\n")
        );
        assert_eq!(probe.load_shell_spec().await, probe.read_shell_spec());
    }

    #[test]
    fn test_screenshots_sorted() {
        let (temp, probe) = create_test_product();
        let dir = temp.path().join("product/sections/incidents");
        fs::write(dir.join("b-detail.PNG"), [0u8]).unwrap();
        fs::write(dir.join("a-list.jpg"), [0u8]).unwrap();

        let names: Vec<_> = probe
            .list_screenshots("incidents")
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, ["a-list", "b-detail"]);
    }

    #[test]
    fn test_list_sections_appends_unlisted_directories() {
        let (temp, probe) = create_test_product();
        fs::create_dir_all(temp.path().join("product/sections/billing")).unwrap();

        let ids: Vec<_> = probe.list_sections().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, ["incidents", "lawyers", "billing"]);
    }

    #[test]
    fn test_phase_done_flags() {
        let (temp, probe) = create_test_product();
        assert_eq!(probe.phase_done_flags(), [true, false, false, false, false]);

        let lawyers = temp.path().join("product/sections/lawyers/screens");
        fs::create_dir_all(&lawyers).unwrap();
        fs::write(lawyers.join("LawyerList.md"), "# Lawyers").unwrap();
        assert!(probe.phase_done_flags()[3]);
    }
}
