//! Scan papers/ for PDFs and merge new entries into data/publications.yml
//!
//! Filename convention: [order]__[name]__[status].pdf
//!
//!   01__my-paper__UR.pdf       -> order 1, "Under review"
//!   02__my-paper__RR-APSR.pdf  -> order 2, "Revise & Resubmit, American Political Science Review"
//!   03__my-paper.pdf           -> order 3, "Working paper"
//!   my-paper.pdf               -> order 999 (no number sorts last), "Working paper"
//!
//! Existing entries are never overwritten, so hand-edited titles and
//! abstracts in publications.yml survive a rescan.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::data::RawPublication;

const PAPERS_DIR: &str = "papers";
const PUBLICATIONS_FILE: &str = "data/publications.yml";

/// Order assigned when the filename has no numeric prefix
const UNORDERED: u32 = 999;

// Subdirectories of papers/ and the category they map to
const CATEGORY_DIRS: &[&str] = &[
    "peer-reviewed",
    "working-papers",
    "book-chapters",
    "in-progress",
];

const JOURNAL_ABBREVS: &[(&str, &str)] = &[
    ("APSR", "American Political Science Review"),
    ("AJPS", "American Journal of Political Science"),
    ("JOP", "Journal of Politics"),
    ("IO", "International Organization"),
    ("ISQ", "International Studies Quarterly"),
    ("CPS", "Comparative Political Studies"),
    ("WP", "World Politics"),
    ("BJPS", "British Journal of Political Science"),
    ("PA", "Political Analysis"),
    ("PSRM", "Political Science Research and Methods"),
    ("EJPR", "European Journal of Political Research"),
    ("POQ", "Public Opinion Quarterly"),
    ("RIO", "Review of International Organizations"),
    ("RIPE", "Review of International Political Economy"),
];

#[derive(Debug, PartialEq)]
struct ParsedFilename {
    name: String,
    status: String,
    sort_order: u32,
}

/// Parse order, name, and status out of a PDF filename stem
fn parse_filename(stem: &str) -> ParsedFilename {
    let mut parts: Vec<&str> = stem.split("__").collect();
    let mut sort_order = UNORDERED;

    if parts.len() >= 2 && parts[0].chars().all(|c| c.is_ascii_digit()) && !parts[0].is_empty() {
        sort_order = parts[0].parse().unwrap_or(UNORDERED);
        parts.remove(0);
    }

    if parts.len() == 1 {
        return ParsedFilename {
            name: parts[0].to_string(),
            status: "Working paper".to_string(),
            sort_order,
        };
    }

    // Last part is the status code, everything before it is the name
    let status_code = parts[parts.len() - 1].trim();
    let name = parts[..parts.len() - 1].join("__");
    ParsedFilename {
        name,
        status: parse_status_code(status_code),
        sort_order,
    }
}

/// Expand a status code into its display string
fn parse_status_code(status_code: &str) -> String {
    let code = status_code.to_uppercase();

    if code == "UR" {
        return "Under review".to_string();
    }
    if code == "WP" {
        return "Working paper".to_string();
    }
    if code.starts_with("RR") {
        if let Some((_, abbrev)) = status_code.split_once('-') {
            let abbrev = abbrev.to_uppercase();
            let journal = JOURNAL_ABBREVS
                .iter()
                .find(|(a, _)| *a == abbrev)
                .map(|(_, full)| full.to_string())
                .unwrap_or(abbrev);
            return format!("Revise & Resubmit, {}", journal);
        }
        return "Revise & Resubmit".to_string();
    }

    // Unknown code, keep as-is
    status_code.to_string()
}

/// Turn a slugged name into a display title ("my-great-paper" -> "My Great Paper")
fn title_from_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn load_existing(path: &Path) -> Result<Vec<RawPublication>> {
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

/// Scan papers/<category>/ directories and append entries for PDFs not yet
/// listed in publications.yml
pub fn run_scan(quiet: bool) -> Result<()> {
    let publications_path = Path::new(PUBLICATIONS_FILE);
    let mut publications = load_existing(publications_path)?;
    let mut added = 0usize;

    for category in CATEGORY_DIRS {
        let dir = Path::new(PAPERS_DIR).join(category);
        if !dir.exists() {
            continue;
        }

        let mut pdfs: Vec<_> = fs::read_dir(&dir)
            .with_context(|| format!("Failed to read {}", dir.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false)
            })
            .collect();
        pdfs.sort();

        for pdf in pdfs {
            let Some(stem) = pdf.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(file_name) = pdf.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let rel_path = format!("{}/{}/{}", PAPERS_DIR, category, file_name);

            if publications
                .iter()
                .any(|p| p.github_pdf.as_deref() == Some(rel_path.as_str()))
            {
                continue;
            }

            let parsed = parse_filename(stem);
            if !quiet {
                println!("  Adding {} ({})", rel_path, parsed.status);
            }
            publications.push(RawPublication {
                title: title_from_name(&parsed.name),
                authors: None,
                venue: None,
                status: Some(parsed.status),
                category: category.to_string(),
                abstract_text: None,
                pdf_url: None,
                doi: None,
                github_pdf: Some(rel_path),
                sort_order: Some(parsed.sort_order),
            });
            added += 1;
        }
    }

    if added == 0 {
        println!("No new papers found.");
        return Ok(());
    }

    if let Some(parent) = publications_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml_ng::to_string(&publications)?;
    fs::write(publications_path, yaml)
        .with_context(|| format!("Failed to write {}", publications_path.display()))?;
    println!("Added {} entries to {}", added, PUBLICATIONS_FILE);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filename_with_order_and_status() {
        assert_eq!(
            parse_filename("01__my-paper__UR"),
            ParsedFilename {
                name: "my-paper".to_string(),
                status: "Under review".to_string(),
                sort_order: 1,
            }
        );
        assert_eq!(
            parse_filename("02__my-paper__RR-APSR"),
            ParsedFilename {
                name: "my-paper".to_string(),
                status: "Revise & Resubmit, American Political Science Review".to_string(),
                sort_order: 2,
            }
        );
    }

    #[test]
    fn test_parse_filename_defaults() {
        assert_eq!(
            parse_filename("03__my-paper"),
            ParsedFilename {
                name: "my-paper".to_string(),
                status: "Working paper".to_string(),
                sort_order: 3,
            }
        );
        assert_eq!(
            parse_filename("my-paper__UR"),
            ParsedFilename {
                name: "my-paper".to_string(),
                status: "Under review".to_string(),
                sort_order: UNORDERED,
            }
        );
        assert_eq!(
            parse_filename("my-paper"),
            ParsedFilename {
                name: "my-paper".to_string(),
                status: "Working paper".to_string(),
                sort_order: UNORDERED,
            }
        );
    }

    #[test]
    fn test_parse_status_code() {
        assert_eq!(parse_status_code("UR"), "Under review");
        assert_eq!(parse_status_code("WP"), "Working paper");
        assert_eq!(parse_status_code("RR"), "Revise & Resubmit");
        assert_eq!(parse_status_code("RR-JOP"), "Revise & Resubmit, Journal of Politics");
        // Unknown journal abbreviation is shown as-is, uppercased
        assert_eq!(parse_status_code("RR-XYZ"), "Revise & Resubmit, XYZ");
        // Unknown codes pass through untouched
        assert_eq!(parse_status_code("Forthcoming"), "Forthcoming");
    }

    #[test]
    fn test_title_from_name() {
        assert_eq!(title_from_name("my-great-paper"), "My Great Paper");
        assert_eq!(title_from_name("under_scores_too"), "Under Scores Too");
        assert_eq!(title_from_name("single"), "Single");
    }
}
