use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u32,
    pub title: String,
    pub video_id: String,
    /// Display string such as "98:43".
    pub duration: String,
    #[serde(default)]
    pub note_link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub course_type: String,
}

impl MediaItem {
    /// Embed video ids are 11 characters of `[A-Za-z0-9_-]`.
    pub fn has_valid_video_id(&self) -> bool {
        self.video_id.len() == 11
            && self
                .video_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

/// Catalog JSON is either a flat list or a map of subject to items.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Flat(Vec<MediaItem>),
    BySubject(BTreeMap<String, Vec<MediaItem>>),
}

/// Empty fields mean "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub grades: Vec<String>,
    pub course: Option<String>,
    pub subjects: Vec<String>,
}

impl CatalogFilter {
    pub fn matches(&self, item: &MediaItem) -> bool {
        let grade_ok = self.grades.is_empty() || self.grades.iter().any(|g| g == &item.grade);
        let course_ok = self.course.as_ref().map_or(true, |c| c == &item.course_type);
        let subject_ok = self.subjects.is_empty() || self.subjects.iter().any(|s| s == &item.subject);
        grade_ok && course_ok && subject_ok
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty() && self.course.is_none() && self.subjects.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MediaItem>,
}

impl Catalog {
    pub fn new(items: Vec<MediaItem>) -> Self {
        Self { items }
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog: {}", e))?;

        let items = match file {
            CatalogFile::Flat(items) => items,
            CatalogFile::BySubject(groups) => groups
                .into_iter()
                .flat_map(|(subject, items)| {
                    items.into_iter().map(move |mut item| {
                        if item.subject.is_empty() {
                            item.subject = subject.clone();
                        }
                        item
                    })
                })
                .collect(),
        };

        Ok(Self::new(items))
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read catalog at {}: {}", path.display(), e))?;
        let catalog = Self::from_json(&content)?;
        log::info!("Loaded {} catalog items from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn builtin() -> anyhow::Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&MediaItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn position(&self, id: u32) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn next_after(&self, id: u32) -> Option<&MediaItem> {
        self.position(id).and_then(|i| self.items.get(i + 1))
    }

    pub fn previous_before(&self, id: u32) -> Option<&MediaItem> {
        self.position(id)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.items.get(i))
    }

    pub fn filtered(&self, filter: &CatalogFilter) -> Vec<&MediaItem> {
        self.items.iter().filter(|item| filter.matches(item)).collect()
    }

    /// Keeps items whose subject or course type names one of the segments.
    pub fn filter_by_access(&self, segments: &[String]) -> Catalog {
        let items = self
            .items
            .iter()
            .filter(|item| {
                segments.iter().any(|segment| {
                    segment.eq_ignore_ascii_case(&item.subject)
                        || (!item.course_type.is_empty() && segment.eq_ignore_ascii_case(&item.course_type))
                })
            })
            .cloned()
            .collect();
        Catalog { items }
    }

    pub fn grades(&self) -> Vec<String> {
        Self::distinct(self.items.iter().map(|item| &item.grade))
    }

    pub fn courses(&self) -> Vec<String> {
        Self::distinct(self.items.iter().map(|item| &item.course_type))
    }

    pub fn subjects(&self) -> Vec<String> {
        Self::distinct(self.items.iter().map(|item| &item.subject))
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for value in values {
            if !value.is_empty() && !out.contains(value) {
                out.push(value.clone());
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u32, subject: &str, grade: &str, course: &str) -> MediaItem {
        MediaItem {
            id,
            title: format!("Lecture {}", id),
            video_id: "dQw4w9WgXcQ".to_string(),
            duration: "45:20".to_string(),
            note_link: None,
            description: None,
            subject: subject.to_string(),
            grade: grade.to_string(),
            course_type: course.to_string(),
        }
    }

    #[test]
    fn test_flat_catalog() {
        let json = r#"[
            {"id": 1, "title": "Higher Math", "video_id": "z8xEcK-unFs", "duration": "98:43",
             "note_link": "https://example.com/notes/class1.pdf"},
            {"id": 2, "title": "Wave Motion", "video_id": "dQw4w9WgXcQ", "duration": "45:20"}
        ]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].note_link.as_deref(), Some("https://example.com/notes/class1.pdf"));
        assert!(catalog.items()[1].note_link.is_none());
    }

    #[test]
    fn test_catalog_keyed_by_subject() {
        let json = r#"{
            "Physics": [{"id": 1, "title": "Waves", "video_id": "dQw4w9WgXcQ", "duration": "45:20"}],
            "Chemistry": [{"id": 2, "title": "Organic", "video_id": "jNQXAC9IVRw", "duration": "52:10",
                           "subject": "Organic Chemistry"}]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().subject, "Physics");
        // Explicit subject wins over the key
        assert_eq!(catalog.get(2).unwrap().subject, "Organic Chemistry");
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(Catalog::from_json("{\"not\": \"a catalog\"}").is_err());
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.items().iter().all(|item| item.has_valid_video_id()));
    }

    #[test]
    fn test_video_id_validation() {
        let mut media = item(1, "Physics", "HSC 27", "ACS");
        assert!(media.has_valid_video_id());
        media.video_id = "short".to_string();
        assert!(!media.has_valid_video_id());
        media.video_id = "bad id with!".to_string();
        assert!(!media.has_valid_video_id());
    }

    #[test]
    fn test_neighbours() {
        let catalog = Catalog::new(vec![
            item(1, "Physics", "HSC 27", "ACS"),
            item(2, "Physics", "HSC 27", "ACS"),
            item(3, "Physics", "HSC 27", "ACS"),
        ]);
        assert_eq!(catalog.next_after(1).map(|i| i.id), Some(2));
        assert_eq!(catalog.next_after(3).map(|i| i.id), None);
        assert_eq!(catalog.previous_before(2).map(|i| i.id), Some(1));
        assert_eq!(catalog.previous_before(1).map(|i| i.id), None);
        assert!(catalog.next_after(99).is_none());
    }

    #[test]
    fn test_filtering() {
        let catalog = Catalog::new(vec![
            item(1, "Physics", "HSC 27", "ACS"),
            item(2, "Mathematics", "HSC 27", "ACS"),
            item(3, "Chemistry", "HSC 26", "Bondi"),
        ]);

        assert_eq!(catalog.filtered(&CatalogFilter::default()).len(), 3);

        let by_grade = CatalogFilter {
            grades: vec!["HSC 27".to_string()],
            ..Default::default()
        };
        assert_eq!(catalog.filtered(&by_grade).len(), 2);

        let by_course_and_subject = CatalogFilter {
            course: Some("ACS".to_string()),
            subjects: vec!["Mathematics".to_string(), "Chemistry".to_string()],
            ..Default::default()
        };
        let ids: Vec<u32> = catalog.filtered(&by_course_and_subject).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_filter_by_access() {
        let catalog = Catalog::new(vec![
            item(1, "Physics", "HSC 27", "ACS"),
            item(2, "Mathematics", "HSC 27", "ACS"),
            item(3, "Chemistry", "HSC 26", "Bondi"),
        ]);

        let physics = catalog.filter_by_access(&["physics".to_string()]);
        assert_eq!(physics.len(), 1);

        let acs = catalog.filter_by_access(&["ACS".to_string()]);
        assert_eq!(acs.len(), 2);

        assert!(catalog.filter_by_access(&[]).is_empty());
    }

    #[test]
    fn test_distinct_values() {
        let catalog = Catalog::new(vec![
            item(1, "Physics", "HSC 27", "ACS"),
            item(2, "Physics", "HSC 26", "ACS"),
        ]);
        assert_eq!(catalog.subjects(), vec!["Physics".to_string()]);
        assert_eq!(catalog.grades(), vec!["HSC 27".to_string(), "HSC 26".to_string()]);
    }
}
