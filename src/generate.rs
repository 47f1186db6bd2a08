use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use crate::data::{self, LoadOutcome};
use crate::render::{bucket, html_escape, markdown_to_html, opt_block, section, sort_by_order, EMPTY_SECTION_TEXT};
use crate::types::{Category, Dataset, DatasetSource, Publication, SiteConfig, TeachingEntry, TeachingKind};

const OUTPUT_DIR: &str = "output";
const DATA_DIR: &str = "data";
const CONFIG_FILE: &str = "site.yml";

// Static asset directories linked into the output tree
const ASSET_DIRS: &[&str] = &["images", "papers"];

/// CSS styles for the site
fn css_styles() -> &'static str {
    r#"
:root {
    --primary: #2c3e50;
    --accent: #8b2332;
    --bg: #fdfdfc;
    --text: #1a202c;
    --text-muted: #6b7280;
    --border: #e5e1d8;
    --radius: 6px;
}

* {
    box-sizing: border-box;
    margin: 0;
    padding: 0;
}

body {
    font-family: Georgia, 'Times New Roman', serif;
    background: var(--bg);
    color: var(--text);
    line-height: 1.7;
}

.container {
    max-width: 840px;
    margin: 0 auto;
    padding: 0 24px;
}

header {
    border-bottom: 3px solid var(--primary);
    padding: 24px 0 16px;
}

header h1 {
    font-size: 1.6rem;
    font-weight: 700;
}

header h1 a {
    color: var(--primary);
    text-decoration: none;
}

.nav-toggle {
    display: none;
    background: none;
    border: 1px solid var(--border);
    border-radius: var(--radius);
    padding: 6px 12px;
    font-size: 1rem;
    cursor: pointer;
    color: var(--primary);
}

nav#site-nav {
    margin-top: 12px;
    display: flex;
    gap: 20px;
    flex-wrap: wrap;
}

nav#site-nav a {
    color: var(--text-muted);
    text-decoration: none;
    font-size: 0.95rem;
}

nav#site-nav a:hover,
nav#site-nav a.active {
    color: var(--accent);
}

@media (max-width: 640px) {
    .nav-toggle {
        display: inline-block;
        margin-top: 8px;
    }
    nav#site-nav {
        display: none;
        flex-direction: column;
        gap: 8px;
    }
    nav#site-nav.open {
        display: flex;
    }
}

main {
    padding: 36px 0;
}

section {
    margin-bottom: 40px;
}

h2 {
    font-size: 1.3rem;
    color: var(--primary);
    border-bottom: 1px solid var(--border);
    padding-bottom: 6px;
    margin-bottom: 18px;
}

h3 {
    font-size: 1.05rem;
    margin-bottom: 4px;
}

.empty-note {
    color: var(--text-muted);
    font-style: italic;
}

.profile {
    display: flex;
    gap: 28px;
    align-items: flex-start;
    margin-bottom: 36px;
}

.profile img {
    width: 180px;
    border-radius: var(--radius);
}

.pub, .course, .dataset {
    margin-bottom: 24px;
}

.pub-authors, .course-meta, .dataset-desc {
    color: var(--text-muted);
    font-size: 0.95rem;
}

.pub-venue em {
    color: var(--text);
}

.pub-status {
    display: inline-block;
    background: #f3efe7;
    border-radius: 4px;
    padding: 1px 8px;
    font-size: 0.85rem;
    color: var(--accent);
}

.pub-abstract {
    margin-top: 6px;
    font-size: 0.95rem;
}

.pub-abstract summary {
    cursor: pointer;
    color: var(--primary);
}

.pub-links a {
    margin-right: 12px;
    color: var(--accent);
    font-size: 0.9rem;
}

.cv-frame {
    width: 100%;
    height: 900px;
    border: 1px solid var(--border);
    border-radius: var(--radius);
}

.gallery {
    display: grid;
    grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
    gap: 20px;
}

.gallery figure img {
    width: 100%;
    border-radius: var(--radius);
}

.gallery figcaption {
    font-size: 0.85rem;
    color: var(--text-muted);
    margin-top: 4px;
}

footer {
    border-top: 1px solid var(--border);
    padding: 20px 0;
    color: var(--text-muted);
    font-size: 0.85rem;
}
"#
}

/// Generate page header HTML, highlighting the active nav link
fn page_header(config: &SiteConfig, title: &str, current_path: &str) -> String {
    let nav_items = [
        ("/", "Home"),
        ("/research/", "Research"),
        ("/cv/", "CV"),
        ("/teaching/", "Teaching"),
        ("/data/", "Data"),
        ("/attic/", "Attic"),
    ];

    let nav_html: String = nav_items
        .iter()
        .map(|(path, label)| {
            let active = if *path == current_path {
                " class=\"active\""
            } else {
                ""
            };
            format!("<a href=\"{}\"{}>{}</a>", path, active, label)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <style>{}</style>
</head>
<body>
    <header>
        <div class="container">
            <h1><a href="/">{}</a></h1>
            <button class="nav-toggle" aria-expanded="false" aria-controls="site-nav" aria-label="Toggle navigation">Menu</button>
            <nav id="site-nav">{}</nav>
        </div>
    </header>
    <main>
        <div class="container">
"#,
        html_escape(title),
        html_escape(&config.title),
        css_styles(),
        html_escape(&config.title),
        nav_html
    )
}

/// Generate page footer HTML, including the nav toggle script
fn page_footer(config: &SiteConfig) -> String {
    let updated = chrono::Local::now().format("%B %Y");
    format!(
        r#"
        </div>
    </main>
    <footer>
        <div class="container">
            <p>&copy; {} &middot; Last updated {}</p>
        </div>
    </footer>
    <script>
    document.addEventListener('DOMContentLoaded', function() {{
        const toggle = document.querySelector('.nav-toggle');
        const nav = document.getElementById('site-nav');

        if (toggle && nav) {{
            toggle.addEventListener('click', function() {{
                const open = nav.classList.toggle('open');
                toggle.setAttribute('aria-expanded', open ? 'true' : 'false');
            }});

            // Any nav link click closes the menu again
            nav.querySelectorAll('a').forEach(function(link) {{
                link.addEventListener('click', function() {{
                    nav.classList.remove('open');
                    toggle.setAttribute('aria-expanded', 'false');
                }});
            }});
        }}
    }});
    </script>
</body>
</html>
"#,
        html_escape(&config.author),
        updated
    )
}

/// Resolve the browsable PDF link for a publication, preferring an explicit
/// URL over a repository-hosted file
fn pdf_link(publication: &Publication, config: &SiteConfig) -> Option<String> {
    if let Some(url) = &publication.pdf_url {
        if !url.trim().is_empty() {
            return Some(url.clone());
        }
    }
    publication
        .github_pdf
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| config.raw_url(p))
}

/// Generate one publication entry
fn publication_html(publication: &Publication, config: &SiteConfig) -> String {
    let authors = opt_block(publication.authors.as_deref(), |a| {
        format!("<p class=\"pub-authors\">{}</p>\n", html_escape(a))
    });
    let venue = opt_block(publication.venue.as_deref(), |v| {
        format!("<p class=\"pub-venue\"><em>{}</em></p>\n", html_escape(v))
    });
    let status = opt_block(publication.status.as_deref(), |s| {
        format!("<span class=\"pub-status\">{}</span>\n", html_escape(s))
    });
    let abstract_html = opt_block(publication.abstract_text.as_deref(), |a| {
        format!(
            "<details class=\"pub-abstract\"><summary>Abstract</summary>{}</details>\n",
            markdown_to_html(a)
        )
    });

    let mut links = String::new();
    if let Some(url) = pdf_link(publication, config) {
        links.push_str(&format!("<a href=\"{}\">PDF</a>", url));
    }
    if let Some(doi) = &publication.doi {
        if !doi.trim().is_empty() {
            links.push_str(&format!("<a href=\"https://doi.org/{}\">DOI</a>", doi));
        }
    }
    let links_html = if links.is_empty() {
        String::new()
    } else {
        format!("<p class=\"pub-links\">{}</p>\n", links)
    };

    format!(
        "<article class=\"pub\">\n<h3>{}</h3>\n{}{}{}{}{}</article>\n",
        html_escape(&publication.title),
        authors,
        venue,
        status,
        abstract_html,
        links_html
    )
}

/// Generate one teaching entry
fn teaching_html(entry: &TeachingEntry) -> String {
    // role, institution, term, level collapse into one meta line
    let meta: Vec<String> = [
        entry.role.as_deref(),
        entry.institution.as_deref(),
        entry.term.as_deref(),
        entry.level.as_deref(),
    ]
    .iter()
    .flatten()
    .filter(|v| !v.trim().is_empty())
    .map(|v| html_escape(v))
    .collect();
    let meta_html = if meta.is_empty() {
        String::new()
    } else {
        format!("<p class=\"course-meta\">{}</p>\n", meta.join(" &middot; "))
    };

    let description = opt_block(entry.description.as_deref(), markdown_to_html);

    format!(
        "<article class=\"course\">\n<h3>{}</h3>\n{}{}</article>\n",
        html_escape(&entry.title),
        meta_html,
        description
    )
}

/// Generate one dataset entry
fn dataset_html(dataset: &Dataset) -> String {
    let name_html = match dataset.url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => format!("<a href=\"{}\">{}</a>", url, html_escape(&dataset.name)),
        None => html_escape(&dataset.name),
    };
    let description = opt_block(dataset.description.as_deref(), |d| {
        format!("<p class=\"dataset-desc\">{}</p>\n", html_escape(d))
    });

    format!(
        "<article class=\"dataset\">\n<h3>{}</h3>\n{}</article>\n",
        name_html, description
    )
}

fn write_page(output_dir: &Path, page_path: &str, html: String) -> Result<()> {
    let page_dir = output_dir.join(page_path);
    fs::create_dir_all(&page_dir)?;
    let file = page_dir.join("index.html");
    fs::write(&file, html).with_context(|| format!("Failed to write {}", file.display()))?;
    Ok(())
}

/// Generate homepage: profile plus a short list of recent work
fn generate_homepage(
    config: &SiteConfig,
    publications: &[Publication],
    output_dir: &Path,
) -> Result<()> {
    let mut html = page_header(config, "Home", "/");

    html.push_str("<section class=\"profile\">\n");
    if let Some(photo) = &config.profile_photo {
        html.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\">\n",
            photo,
            html_escape(&config.author)
        ));
    }
    html.push_str("<div>\n");
    html.push_str(&format!("<h2>{}</h2>\n", html_escape(&config.author)));
    for paragraph in &config.bio {
        html.push_str(&markdown_to_html(paragraph));
    }
    if let Some(email) = &config.email {
        html.push_str(&format!(
            "<p><a href=\"mailto:{}\">{}</a></p>\n",
            email,
            html_escape(email)
        ));
    }
    html.push_str("</div>\n</section>\n");

    // Peer-reviewed and working papers only, in research page order
    let recent: Vec<&Publication> = Category::SECTION_ORDER
        .iter()
        .filter(|c| matches!(c, Category::PeerReviewed | Category::WorkingPapers))
        .flat_map(|c| {
            sort_by_order(bucket(publications, |p| p.category == *c), |p| p.sort_order)
        })
        .take(5)
        .collect();
    let items: Vec<String> = recent
        .iter()
        .map(|p| publication_html(p, config))
        .collect();
    html.push_str(&section("Recent Research", &items, EMPTY_SECTION_TEXT));
    if !items.is_empty() {
        html.push_str("<p><a href=\"/research/\">Full list of publications &rarr;</a></p>\n");
    }

    html.push_str(&page_footer(config));
    write_page(output_dir, "", html)
}

/// Generate research page: publications bucketed by category, each section
/// sorted by sort_order
fn generate_research(
    config: &SiteConfig,
    publications: &[Publication],
    output_dir: &Path,
) -> Result<()> {
    let mut html = page_header(config, "Research", "/research/");

    for category in Category::SECTION_ORDER {
        let entries = sort_by_order(
            bucket(publications, |p| p.category == category),
            |p| p.sort_order,
        );
        let items: Vec<String> = entries
            .iter()
            .map(|p| publication_html(p, config))
            .collect();
        html.push_str(&section(category.display_name(), &items, EMPTY_SECTION_TEXT));
    }

    html.push_str(&page_footer(config));
    write_page(output_dir, "research", html)
}

/// Minimal percent-encoding for a URL carried as a query parameter
fn encode_query_value(s: &str) -> String {
    let mut out = String::new();
    for c in s.chars() {
        match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => out.push(c),
            _ => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).as_bytes() {
                    out.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    out
}

/// Generate CV page: hosted PDF embedded through an external viewer
fn generate_cv(config: &SiteConfig, output_dir: &Path) -> Result<()> {
    let mut html = page_header(config, "CV", "/cv/");

    html.push_str("<section>\n<h2>Curriculum Vitae</h2>\n");
    match &config.cv_pdf {
        Some(path) => {
            let raw = config.raw_url(path);
            let viewer = format!(
                "https://docs.google.com/viewer?url={}&embedded=true",
                encode_query_value(&raw)
            );
            html.push_str(&format!(
                "<p><a href=\"{}\">Download PDF</a></p>\n",
                raw
            ));
            html.push_str(&format!(
                "<iframe class=\"cv-frame\" src=\"{}\" title=\"CV\"></iframe>\n",
                viewer
            ));
        }
        None => {
            html.push_str(&format!(
                "<p class=\"empty-note\">{}</p>\n",
                html_escape(EMPTY_SECTION_TEXT)
            ));
        }
    }
    html.push_str("</section>\n");

    html.push_str(&page_footer(config));
    write_page(output_dir, "cv", html)
}

/// Generate attic page: image gallery from the configured item list
fn generate_attic(config: &SiteConfig, output_dir: &Path) -> Result<()> {
    let mut html = page_header(config, "Attic", "/attic/");

    let items: Vec<String> = config
        .attic
        .iter()
        .map(|item| {
            let caption = opt_block(item.caption.as_deref(), |c| {
                format!("<figcaption>{}</figcaption>", html_escape(c))
            });
            format!(
                "<figure><img src=\"{}\" alt=\"{}\">{}</figure>\n",
                item.image,
                html_escape(item.caption.as_deref().unwrap_or("")),
                caption
            )
        })
        .collect();

    if items.is_empty() {
        html.push_str(&section("Attic", &items, EMPTY_SECTION_TEXT));
    } else {
        html.push_str("<section>\n<h2>Attic</h2>\n<div class=\"gallery\">\n");
        for item in &items {
            html.push_str(item);
        }
        html.push_str("</div>\n</section>\n");
    }

    html.push_str(&page_footer(config));
    write_page(output_dir, "attic", html)
}

/// Generate teaching page: entries bucketed by kind
fn generate_teaching(
    config: &SiteConfig,
    entries: &[TeachingEntry],
    output_dir: &Path,
) -> Result<()> {
    let mut html = page_header(config, "Teaching", "/teaching/");

    for kind in TeachingKind::SECTION_ORDER {
        let in_section = bucket(entries, |e| e.kind == kind);
        let items: Vec<String> = in_section.iter().map(|e| teaching_html(e)).collect();
        html.push_str(&section(kind.display_name(), &items, EMPTY_SECTION_TEXT));
    }

    html.push_str(&page_footer(config));
    write_page(output_dir, "teaching", html)
}

/// Generate data page: datasets bucketed by source
fn generate_data(config: &SiteConfig, datasets: &[Dataset], output_dir: &Path) -> Result<()> {
    let mut html = page_header(config, "Data", "/data/");

    for source in DatasetSource::SECTION_ORDER {
        let in_section = bucket(datasets, |d| d.source == source);
        let items: Vec<String> = in_section.iter().map(|d| dataset_html(d)).collect();
        html.push_str(&section(source.display_name(), &items, EMPTY_SECTION_TEXT));
    }

    html.push_str(&page_footer(config));
    write_page(output_dir, "data", html)
}

/// Link static asset directories into the output tree
fn symlink_assets(output_dir: &Path) -> Result<()> {
    for dir in ASSET_DIRS {
        let source = Path::new(dir);
        if !source.exists() {
            continue;
        }
        let link_path = output_dir.join(dir);
        if link_path.exists() || link_path.is_symlink() {
            fs::remove_file(&link_path).ok();
        }
        let abs_source = fs::canonicalize(source)?;
        symlink(&abs_source, &link_path)?;
    }
    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
}

/// Main generation function
pub fn run_generate() -> Result<()> {
    let config = data::load_config(Path::new(CONFIG_FILE))?;

    println!("Loading data files...");
    let data_dir = Path::new(DATA_DIR);
    let LoadOutcome {
        records: publications,
        warnings: pub_warnings,
    } = data::load_publications(&data_dir.join("publications.yml"))?;
    let LoadOutcome {
        records: teaching,
        warnings: teaching_warnings,
    } = data::load_teaching(&data_dir.join("teaching.yml"))?;
    let LoadOutcome {
        records: datasets,
        warnings: dataset_warnings,
    } = data::load_datasets(&data_dir.join("datasets.yml"))?;

    print_warnings(&pub_warnings);
    print_warnings(&teaching_warnings);
    print_warnings(&dataset_warnings);

    println!(
        "Loaded {} publications, {} teaching entries, {} datasets",
        publications.len(),
        teaching.len(),
        datasets.len()
    );

    let output_dir = PathBuf::from(OUTPUT_DIR);

    // Clean and create output directory
    if output_dir.exists() {
        fs::remove_dir_all(&output_dir)?;
    }
    fs::create_dir_all(&output_dir)?;

    println!("Generating homepage...");
    generate_homepage(&config, &publications, &output_dir)?;

    println!("Generating research page...");
    generate_research(&config, &publications, &output_dir)?;

    println!("Generating CV page...");
    generate_cv(&config, &output_dir)?;

    println!("Generating attic page...");
    generate_attic(&config, &output_dir)?;

    println!("Generating teaching page...");
    generate_teaching(&config, &teaching, &output_dir)?;

    println!("Generating data page...");
    generate_data(&config, &datasets, &output_dir)?;

    println!("Linking static assets...");
    symlink_assets(&output_dir)?;

    println!("Done! Generated site in {}/", OUTPUT_DIR);

    Ok(())
}
