use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn notesite(site: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notesite").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("-C")
        .arg(site);
    cmd
}

fn sample_site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(
        root,
        "docs/notes/guides/_category_.json",
        r#"{ "label": "Guides", "position": 1 }"#,
    );
    write(
        root,
        "docs/notes/guides/setup.md",
        "---\ntitle: Setup\ndate: 2024-01-01\ntags: [rust]\n---\n# Install\n\n:::tip\nUse cargo.\n:::\n",
    );
    write(
        root,
        "docs/notes/guides/advanced/tuning.md",
        "---\ntitle: Tuning\n---\n## Profiles\n",
    );
    write(
        root,
        "docs/notes/journal/day-one.md",
        "---\ntitle: Day One\n---\nHello.\n",
    );
    dir
}

#[test]
fn test_nav_orders_categories() {
    let site = sample_site();
    let out = notesite(site.path()).arg("nav").assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();

    let guides = stdout.find("Guides").unwrap();
    let journal = stdout.find("journal").unwrap();
    assert!(guides < journal, "{}", stdout);
    assert!(stdout.contains("2024-01-01"));
}

#[test]
fn test_nav_json() {
    let site = sample_site();
    notesite(site.path())
        .args(["nav", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""label": "Guides""#))
        .stdout(predicate::str::contains(r#""url": "/notes/guides/setup""#));
}

#[test]
fn test_list_shows_ids_and_urls() {
    let site = sample_site();
    notesite(site.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("guides/advanced/tuning"))
        .stdout(predicate::str::contains("/notes/journal/day-one"));
}

#[test]
fn test_show_note() {
    let site = sample_site();
    notesite(site.path())
        .args(["show", "guides", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Setup"))
        .stdout(predicate::str::contains("/notes/guides/setup"))
        .stdout(predicate::str::contains("rust"))
        .stdout(predicate::str::contains("#install"));
}

#[test]
fn test_render_note() {
    let site = sample_site();
    notesite(site.path())
        .args(["render", "guides", "setup"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<h1 id="install">Install</h1>"#))
        .stdout(predicate::str::contains("admonition admonition-tip"))
        .stdout(predicate::str::contains("bi-lightbulb"));
}

#[test]
fn test_missing_note_fails() {
    let site = sample_site();
    notesite(site.path())
        .args(["render", "guides", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Note not found: guides/nope"));
}

#[test]
fn test_render_file_strips_frontmatter() {
    let site = sample_site();
    let file = site.path().join("loose.md");
    fs::write(&file, "---\ntitle: Loose\n---\n:::warning[Careful]\nHot.\n:::\n").unwrap();

    notesite(site.path())
        .arg("render-file")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("admonition-warning"))
        .stdout(predicate::str::contains("title: Loose").not());
}

#[test]
fn test_tree_prints_rewritten_directives() {
    let site = sample_site();
    let file = site.path().join("tree.md");
    fs::write(&file, ":::danger\nStop.\n:::\n").unwrap();

    notesite(site.path())
        .arg("tree")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "containerDirective""#))
        .stdout(predicate::str::contains("admonition admonition-danger"));
}

#[test]
fn test_config_set_and_get() {
    let site = sample_site();
    notesite(site.path())
        .args(["config", "url-prefix", "kb"])
        .assert()
        .success()
        .stdout(predicate::str::contains("url-prefix set to /kb/"));

    assert!(site.path().join("notesite.json").exists());

    notesite(site.path())
        .args(["config", "url-prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/kb/"));

    notesite(site.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("/kb/guides/setup"));
}

#[test]
fn test_unknown_config_key_fails() {
    let site = sample_site();
    notesite(site.path())
        .args(["config", "colour", "blue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key: colour"));
}

#[test]
fn test_bad_frontmatter_names_file() {
    let site = sample_site();
    write(site.path(), "docs/notes/guides/broken.md", "no frontmatter here\n");

    notesite(site.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.md"));
}

#[test]
fn test_empty_site() {
    let dir = TempDir::new().unwrap();
    notesite(dir.path())
        .arg("nav")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes found."));
}
