//! End-to-end sessions against an in-process registry stub

mod common;

use common::{RegistryStub, TestProject, manifest};
use predicates::prelude::*;

const CARD_BUNDLE: &str = r#"{
  "name": "card",
  "type": "registry:ui",
  "files": [
    {
      "path": "registry/ui/card.tsx",
      "content": "export function Card() {}\nexport function CardTitle() {}\n",
      "type": "registry:ui"
    },
    {
      "path": "registry/lib/utils.ts",
      "content": "export const cn = () => ''\n",
      "type": "registry:lib"
    },
    {
      "path": "registry/hooks/use-card.ts",
      "content": "export function useCard() {}\n",
      "type": "registry:hook"
    }
  ]
}"#;

fn standard_registry() -> RegistryStub {
    let body = manifest(&[
        "button",
        "card",
        "use-mobile",
        "icon-github",
        "index",
        "button-demo",
        "theme-dark",
    ]);
    RegistryStub::serve(&[("/r/registry.json", &body), ("/r/card.json", CARD_BUNDLE)])
}

#[test]
fn test_summary_without_subprocess() {
    let registry = standard_registry();
    let project = TestProject::new();
    project.write_file("components/ui/button.tsx", "export {}\n");
    project.write_file("hooks/use-mobile.ts", "export {}\n");

    // The configured installer does not exist, so any spawn would surface as a failure
    project
        .cmd(&registry.url)
        .assert()
        .success()
        .stdout(predicate::str::contains("Components"))
        .stdout(predicate::str::contains("Hooks"))
        .stdout(predicate::str::contains("Icons"))
        .stdout(predicate::str::contains("card, icon-github"))
        .stdout(predicate::str::is_match(r"Total\S*\s+4\s+2\s+2").unwrap())
        .stderr(predicate::str::contains("Failed to install").not())
        .stderr(predicate::str::contains("Could not verify").not());
}

#[test]
fn test_add_all_dry_run_lists_registry() {
    let registry = standard_registry();
    let project = TestProject::new();
    project.write_file("components/ui/card.tsx", "export {}\n");

    project
        .cmd(&registry.url)
        .arg("--add-all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would install (4)"))
        .stdout(predicate::str::is_match(r"card\s+\S*overwrite").unwrap())
        .stdout(predicate::str::is_match(r"button\s+\S*add").unwrap())
        .stdout(predicate::str::contains("button-demo").not())
        .stdout(predicate::str::contains("Nothing was changed"));
}

#[test]
fn test_add_all_force_reports_every_failure() {
    let registry = standard_registry();
    let project = TestProject::new();

    project
        .cmd(&registry.url)
        .args(["--add-all", "--force"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("0 updated, 0 skipped, 4 failed"));
}

#[test]
fn test_add_missing_treats_unverifiable_as_missing() {
    let registry = standard_registry();
    let project = TestProject::new();
    project.write_file("components/ui/button.tsx", "export {}\n");
    project.write_file("components/ui/card.tsx", "export {}\n");
    project.write_file("hooks/use-mobile.ts", "export {}\n");

    project
        .cmd(&registry.url)
        .arg("--add-missing")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("icon-github"))
        .stdout(predicate::str::contains("0 updated, 0 skipped, 1 failed"))
        .stderr(predicate::str::contains("Could not verify 'icon-github'"));
}

#[test]
fn test_single_unknown_component() {
    let registry = standard_registry();
    let project = TestProject::new();

    project
        .cmd(&registry.url)
        .args(["carousel", "--force"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Component 'carousel' not found"));
}

#[test]
fn test_diff_shows_changes_and_new_files() {
    let registry = standard_registry();
    let project = TestProject::new();
    project.write_file(
        "components/ui/card.tsx",
        "export function Card() {}\nexport function CardHeader() {}\n",
    );
    project.write_file("lib/utils.ts", "export const cn = () => ''\n");

    project
        .cmd(&registry.url)
        .args(["card", "--diff"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Diff for"))
        .stdout(predicate::str::contains("@@ -2,1 +2,1 @@"))
        .stdout(predicate::str::contains("-export function CardHeader() {}"))
        .stdout(predicate::str::contains("+export function CardTitle() {}"))
        .stdout(predicate::str::contains("No differences"))
        .stdout(predicate::str::contains("use-card.ts (new file)"))
        .stdout(predicate::str::contains("1 changed, 1 identical, 1 new"));

    assert_eq!(
        project.read_file("components/ui/card.tsx"),
        "export function Card() {}\nexport function CardHeader() {}\n"
    );
}

#[test]
fn test_diff_unknown_component() {
    let registry = standard_registry();
    let project = TestProject::new();

    project
        .cmd(&registry.url)
        .args(["carousel", "--diff"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HTTP 404"));
}

#[test]
fn test_verbose_logs_session_progress() {
    let registry = standard_registry();
    let project = TestProject::new();

    project
        .cmd(&registry.url)
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("names reconciled"));
}

#[test]
fn test_quiet_by_default() {
    let registry = standard_registry();
    let project = TestProject::new();

    project
        .cmd(&registry.url)
        .assert()
        .success()
        .stderr(predicate::str::contains("names reconciled").not());
}
