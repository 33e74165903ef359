mod common;

use report::{load_reports, DashboardRenderer, JsonDatabase, ReportError, ResultsDatabase};
use tempfile::TempDir;

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let outdir = dir.join("base").join("mesh");
    std::fs::create_dir_all(&outdir).unwrap();
    std::fs::write(outdir.join("log.txt"), "Warn: deprecated\nError: shader failed\n").unwrap();

    let reports = format!(
        r#"{{
            "mesh": {{
                "module": "base",
                "date": "2023-01-20T17:30:00+00:00",
                "elapsed_time": 4.5,
                "image_tests": [{{"image": "mesh.png", "difference": 0.5}}],
                "failures": ["images", "log"],
                "successes": ["returncode"],
                "outputdir": "{}",
                "log": "log.txt",
                "screenshot": "screenshot.png",
                "command": ["inviwo", "-w", "mesh.inv"],
                "returncode": 0,
                "missing_imgs": [],
                "missing_refs": ["mesh2.png"],
                "output": "",
                "errors": null
            }}
        }}"#,
        outdir.display().to_string().replace('\\', "\\\\")
    );
    let reports_path = dir.join("reports.json");
    std::fs::write(&reports_path, reports).unwrap();

    let database = r#"{
        "tests": [{
            "module": "base",
            "name": "mesh",
            "runs": [
                {
                    "created": "2023-01-19T17:00:00+00:00",
                    "commit": {
                        "hash": "1111111",
                        "author": "Jane Doe",
                        "message": "Refactor mesh renderer",
                        "date": "2023-01-19T16:00:00+00:00",
                        "server": "https://github.com/inviwo/inviwo"
                    },
                    "failures": 0
                },
                {
                    "created": "2023-01-20T17:00:00+00:00",
                    "commit": {
                        "hash": "2222222",
                        "author": "John Roe",
                        "message": "Update shading",
                        "date": "2023-01-20T16:00:00+00:00",
                        "server": "https://github.com/inviwo/inviwo"
                    },
                    "failures": 2
                }
            ],
            "series": {
                "elapsed_time": {
                    "name": "elapsed_time",
                    "created": "2023-01-01T00:00:00+00:00",
                    "measurements": [
                        {"created": "2023-01-19T17:00:00+00:00", "value": 4.0},
                        {"created": "2023-01-20T17:00:00+00:00", "value": 5.0}
                    ]
                }
            }
        }]
    }"#;
    let database_path = dir.join("database.json");
    std::fs::write(&database_path, database).unwrap();

    (reports_path, database_path)
}

#[test]
fn test_render_from_files() {
    let dir = TempDir::new().unwrap();
    let (reports_path, database_path) = write_inputs(dir.path());

    let reports = load_reports(&reports_path).unwrap();
    let db = JsonDatabase::load_from_file(&database_path).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].name, "mesh");

    let (success, failure) = db.last_success_first_failure("base", "mesh").unwrap();
    assert_eq!(success.unwrap().commit.hash, "1111111");
    assert_eq!(failure.unwrap().commit.hash, "2222222");

    let html = DashboardRenderer::new(dir.path(), &reports, &db)
        .with_created(common::created())
        .render()
        .unwrap();

    assert!(html.contains("0 ok images, 1 failed image tests"));
    assert!(html.contains("Error: 1, Warnings: 1, Information: 0"));
    assert!(html.contains(r#"<div class="cell">(inviwo, -w, mesh.inv)</div>"#));
    assert!(html.contains(
        r#"<div class="cell key">Missing refs</div><div class="cell">(mesh2.png)</div>"#
    ));
    assert!(html.contains(r#"<div class="cell key">Output</div><div class="cell">None</div>"#));
    assert!(html.contains("compare/1111111...2222222"));
    assert!(html.contains("sparkNormalRangeMin=\"4\""));
    assert!(html.contains("sparkNormalRangeMax=\"5\""));
}

#[test]
fn test_missing_reports_file() {
    let err = load_reports("/nonexistent/reports.json").unwrap_err();
    assert!(matches!(err, ReportError::Io(_)));
}

#[test]
fn test_malformed_database() {
    let err = JsonDatabase::from_json("{ \"tests\": 5 }").unwrap_err();
    assert!(matches!(err, ReportError::Json(_)));
}
