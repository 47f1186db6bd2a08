//! YAML data file loading and validation
//!
//! Collections deserialize into raw records first, then records are checked
//! against the closed set of discriminator values. Records with a value the
//! site does not recognize are dropped from every page and reported as a
//! load warning instead of failing the build.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::types::{Category, Dataset, DatasetSource, Publication, SiteConfig, TeachingEntry, TeachingKind};

/// Records that passed validation plus warnings for the ones that did not
pub struct LoadOutcome<T> {
    pub records: Vec<T>,
    pub warnings: Vec<String>,
}

/// Publication entry as written in data/publications.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPublication {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub category: String,
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_pdf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawTeachingEntry {
    title: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    institution: Option<String>,
    #[serde(default)]
    term: Option<String>,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDataset {
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    source: String,
}

pub fn load_config(path: &Path) -> Result<SiteConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml_ng::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Read a collection file, treating a missing file as an empty collection.
/// A file that exists but does not parse aborts the build.
fn read_collection<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml_ng::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn convert_publications(raws: Vec<RawPublication>, source_name: &str) -> LoadOutcome<Publication> {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for raw in raws {
        match Category::parse(&raw.category) {
            Some(category) => records.push(Publication {
                title: raw.title,
                authors: raw.authors,
                venue: raw.venue,
                status: raw.status,
                category,
                abstract_text: raw.abstract_text,
                pdf_url: raw.pdf_url,
                doi: raw.doi,
                github_pdf: raw.github_pdf,
                sort_order: raw.sort_order,
            }),
            None => warnings.push(format!(
                "{}: skipping \"{}\": unrecognized category \"{}\"",
                source_name, raw.title, raw.category
            )),
        }
    }
    LoadOutcome { records, warnings }
}

fn convert_teaching(raws: Vec<RawTeachingEntry>, source_name: &str) -> LoadOutcome<TeachingEntry> {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for raw in raws {
        match TeachingKind::parse(&raw.kind) {
            Some(kind) => records.push(TeachingEntry {
                title: raw.title,
                kind,
                role: raw.role,
                institution: raw.institution,
                term: raw.term,
                level: raw.level,
                description: raw.description,
            }),
            None => warnings.push(format!(
                "{}: skipping \"{}\": unrecognized type \"{}\"",
                source_name, raw.title, raw.kind
            )),
        }
    }
    LoadOutcome { records, warnings }
}

fn convert_datasets(raws: Vec<RawDataset>, source_name: &str) -> LoadOutcome<Dataset> {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    for raw in raws {
        match DatasetSource::parse(&raw.source) {
            Some(source) => records.push(Dataset {
                name: raw.name,
                url: raw.url,
                description: raw.description,
                source,
            }),
            None => warnings.push(format!(
                "{}: skipping \"{}\": unrecognized source \"{}\"",
                source_name, raw.name, raw.source
            )),
        }
    }
    LoadOutcome { records, warnings }
}

pub fn load_publications(path: &Path) -> Result<LoadOutcome<Publication>> {
    let raws = read_collection(path)?;
    Ok(convert_publications(raws, &path.display().to_string()))
}

pub fn load_teaching(path: &Path) -> Result<LoadOutcome<TeachingEntry>> {
    let raws = read_collection(path)?;
    Ok(convert_teaching(raws, &path.display().to_string()))
}

pub fn load_datasets(path: &Path) -> Result<LoadOutcome<Dataset>> {
    let raws = read_collection(path)?;
    Ok(convert_datasets(raws, &path.display().to_string()))
}
