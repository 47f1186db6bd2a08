//! Record and site configuration types

use serde::Deserialize;

/// Site-wide configuration loaded from site.yml
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub email: Option<String>,
    pub github_username: String,
    /// Repository hosting the site; defaults to <username>.github.io
    #[serde(default)]
    pub github_repository: Option<String>,
    /// Branch the raw PDF links point at
    #[serde(default)]
    pub github_branch: Option<String>,
    #[serde(default)]
    pub bio: Vec<String>,
    #[serde(default)]
    pub profile_photo: Option<String>,
    /// Path to the CV PDF within the repository (e.g. "papers/cv.pdf")
    #[serde(default)]
    pub cv_pdf: Option<String>,
    #[serde(default)]
    pub attic: Vec<AtticItem>,
}

impl SiteConfig {
    pub fn repository(&self) -> String {
        self.github_repository
            .clone()
            .unwrap_or_else(|| format!("{}.github.io", self.github_username))
    }

    pub fn branch(&self) -> &str {
        self.github_branch.as_deref().unwrap_or("main")
    }

    /// Raw URL for a file hosted in the site repository
    pub fn raw_url(&self, path: &str) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/{}/{}",
            self.github_username,
            self.repository(),
            self.branch(),
            path.trim_start_matches('/')
        )
    }
}

/// One image shown on the attic page
#[derive(Debug, Clone, Deserialize)]
pub struct AtticItem {
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// Research page section a publication belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    PeerReviewed,
    WorkingPapers,
    BookChapters,
    InProgress,
}

impl Category {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "peer-reviewed" => Some(Category::PeerReviewed),
            "working-papers" => Some(Category::WorkingPapers),
            "book-chapters" => Some(Category::BookChapters),
            "in-progress" => Some(Category::InProgress),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::PeerReviewed => "Peer-Reviewed Publications",
            Category::WorkingPapers => "Working Papers",
            Category::BookChapters => "Book Chapters",
            Category::InProgress => "Work in Progress",
        }
    }

    /// Fixed order of research page sections
    pub const SECTION_ORDER: [Category; 4] = [
        Category::PeerReviewed,
        Category::WorkingPapers,
        Category::BookChapters,
        Category::InProgress,
    ];
}

#[derive(Debug, Clone)]
pub struct Publication {
    pub title: String,
    pub authors: Option<String>,
    pub venue: Option<String>,
    pub status: Option<String>,
    pub category: Category,
    pub abstract_text: Option<String>,
    pub pdf_url: Option<String>,
    pub doi: Option<String>,
    /// Path to a PDF hosted in the site repository itself
    pub github_pdf: Option<String>,
    pub sort_order: Option<u32>,
}

/// Teaching page section a teaching entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeachingKind {
    Record,
    Proposal,
}

impl TeachingKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "record" => Some(TeachingKind::Record),
            "proposal" => Some(TeachingKind::Proposal),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TeachingKind::Record => "Teaching Experience",
            TeachingKind::Proposal => "Course Proposals",
        }
    }

    pub const SECTION_ORDER: [TeachingKind; 2] = [TeachingKind::Record, TeachingKind::Proposal];
}

#[derive(Debug, Clone)]
pub struct TeachingEntry {
    pub title: String,
    pub kind: TeachingKind,
    pub role: Option<String>,
    pub institution: Option<String>,
    pub term: Option<String>,
    pub level: Option<String>,
    pub description: Option<String>,
}

/// Data page section a dataset belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetSource {
    Github,
    External,
}

impl DatasetSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "github" => Some(DatasetSource::Github),
            "external" => Some(DatasetSource::External),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DatasetSource::Github => "GitHub Repositories",
            DatasetSource::External => "External Data Sources",
        }
    }

    pub const SECTION_ORDER: [DatasetSource; 2] = [DatasetSource::Github, DatasetSource::External];
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub url: Option<String>,
    pub description: Option<String>,
    pub source: DatasetSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("peer-reviewed"), Some(Category::PeerReviewed));
        assert_eq!(Category::parse("working-papers"), Some(Category::WorkingPapers));
        assert_eq!(Category::parse("book-chapters"), Some(Category::BookChapters));
        assert_eq!(Category::parse("in-progress"), Some(Category::InProgress));
        assert_eq!(Category::parse("conference"), None);
        assert_eq!(Category::parse(""), None);
        // Case sensitive; data files use the lowercase keys
        assert_eq!(Category::parse("Peer-Reviewed"), None);
    }

    #[test]
    fn test_discriminator_parse() {
        assert_eq!(TeachingKind::parse("record"), Some(TeachingKind::Record));
        assert_eq!(TeachingKind::parse("proposal"), Some(TeachingKind::Proposal));
        assert_eq!(TeachingKind::parse("seminar"), None);

        assert_eq!(DatasetSource::parse("github"), Some(DatasetSource::Github));
        assert_eq!(DatasetSource::parse("external"), Some(DatasetSource::External));
        assert_eq!(DatasetSource::parse("kaggle"), None);
    }

    #[test]
    fn test_raw_url() {
        let config = SiteConfig {
            title: "Site".to_string(),
            author: "Jane Doe".to_string(),
            email: None,
            github_username: "jdoe".to_string(),
            github_repository: None,
            github_branch: None,
            bio: vec![],
            profile_photo: None,
            cv_pdf: None,
            attic: vec![],
        };
        assert_eq!(
            config.raw_url("papers/cv.pdf"),
            "https://raw.githubusercontent.com/jdoe/jdoe.github.io/main/papers/cv.pdf"
        );
        assert_eq!(
            config.raw_url("/papers/cv.pdf"),
            "https://raw.githubusercontent.com/jdoe/jdoe.github.io/main/papers/cv.pdf"
        );
    }
}
