//! Batch runs over page sets on disk.

use std::fs;

use shiori::Rules;
use shiori::batch::{self, Manifest, PageJob, PageOutcome};
use shiori::render::NOT_FOUND_PLACEHOLDER;

const PAGE: &str = r#"<html><body>
<font size="4">Volume 2: Johrei</font><br>
<a href="201.html">・Johrei e Saúde</a><br>
<a href="202.html">・A Luz Divina</a><br><br>
</body></html>"#;

#[test]
fn test_missing_page_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let first = dir.path().join("index2.html");
    let third = dir.path().join("index3.html");
    fs::write(&first, PAGE).unwrap();
    fs::write(&third, PAGE).unwrap();

    let jobs = vec![
        PageJob::new(&first, "shumeic2", "../"),
        PageJob::new(dir.path().join("gone.html"), "shumeic2", "../"),
        PageJob::new(&third, "shumeic3", "../../"),
    ];
    let reports = batch::run(&jobs, &Rules::default());

    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].job, jobs[0]);
    assert!(reports[1].is_missing());
    assert_eq!(reports[1].render("Temas").body, NOT_FOUND_PLACEHOLDER);
    assert!(reports[1].render("Temas").jump_nav.is_empty());

    match &reports[2].outcome {
        PageOutcome::Normalized(page) => {
            assert_eq!(page.topic_count(), 2);
            assert_eq!(page.headers[0].dropdown_title, "Johrei");
            // Counters start over for every page.
            let rendered = reports[2].render("Temas");
            assert!(rendered.body.contains("topic-card__icon\">1<"));
            assert!(rendered.body.contains("../../reader.html?vol=shumeic3&amp;file=201.html"));
        }
        PageOutcome::Missing { reason } => panic!("page should normalize: {reason}"),
    }
}

#[test]
fn test_deeply_nested_page_does_not_take_down_the_batch() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let ok = dir.path().join("ok.html");
    let deep = dir.path().join("deep.html");
    fs::write(&ok, PAGE).unwrap();
    // Legacy pages leave <font> open; each one nests a level deeper.
    let mut html = String::from("<html><body>");
    html.push_str(&"<font color=red>".repeat(5_000));
    html.push_str("<a href=\"1.html\">・Tema</a>");
    fs::write(&deep, html).unwrap();

    let jobs = vec![
        PageJob::new(&ok, "shumeic2", "../"),
        PageJob::new(&deep, "shumeic2", "../"),
    ];
    let reports = batch::run(&jobs, &Rules::default());

    let topics: Vec<_> = reports
        .iter()
        .map(|report| match &report.outcome {
            PageOutcome::Normalized(page) => page.topic_count(),
            PageOutcome::Missing { reason } => panic!("page should normalize: {reason}"),
        })
        .collect();
    assert_eq!(topics, vec![2, 1]);
}

#[test]
fn test_manifest_sources_resolve_against_manifest_dir() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    fs::create_dir(dir.path().join("shumeic2")).unwrap();
    fs::write(dir.path().join("shumeic2/index.html"), PAGE).unwrap();

    let manifest_path = dir.path().join("pages.toml");
    fs::write(
        &manifest_path,
        r#"
[[page]]
source = "shumeic2/index.html"
volume = "shumeic2"
level_up = "../"
"#,
    )
    .unwrap();

    let manifest = Manifest::load(&manifest_path).expect("manifest should load");
    assert_eq!(manifest.pages[0].source, dir.path().join("shumeic2/index.html"));

    let reports = batch::run(&manifest.pages, &Rules::default());
    assert!(!reports[0].is_missing());
}

#[test]
fn test_bad_rules_file_is_an_error() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("rules.toml");
    fs::write(&path, "heading_max_chars = \"fifty\"\n").unwrap();

    assert!(matches!(Rules::load(&path), Err(shiori::Error::Toml(_))));
    assert!(matches!(
        Rules::load(dir.path().join("absent.toml")),
        Err(shiori::Error::Io(_))
    ));
}
