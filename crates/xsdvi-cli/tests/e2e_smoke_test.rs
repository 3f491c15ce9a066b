use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::tempdir;

use xsdvi::schema::ComponentKind;
use xsdvi_cli::{Args, run};

fn schemas_dir() -> PathBuf {
    // Schemas are at workspace root, relative to workspace not the crate
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("schemas")
}

/// Collects all .xsd files from a directory
fn collect_xsd_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("xsd")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: &Path, output_path: &Path) -> Args {
    Args {
        inputs: vec![input.to_string_lossy().to_string()],
        root_node_name: None,
        one_node_only: false,
        output_path: output_path.to_string_lossy().to_string(),
        root_types: vec![ComponentKind::ElementDeclaration],
        embody_style: false,
        generate_style: None,
        use_style: None,
        config: None,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_valid_schemas() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_schemas = collect_xsd_files(schemas_dir());

    assert!(
        !valid_schemas.is_empty(),
        "No valid schemas found in schemas/"
    );

    let mut failed_schemas = Vec::new();

    for schema_path in &valid_schemas {
        match run(&args(schema_path, temp_dir.path())) {
            Ok(summary) if summary.is_success() && summary.written.len() == 1 => {
                let svg = fs::read_to_string(&summary.written[0]).unwrap();
                assert!(svg.contains("<svg"), "{} is not SVG", schema_path.display());
            }
            Ok(summary) => {
                let reasons: Vec<_> = summary.failures.iter().map(ToString::to_string).collect();
                failed_schemas.push((schema_path.clone(), reasons.join("; ")));
            }
            Err(e) => failed_schemas.push((schema_path.clone(), e.to_string())),
        }
    }

    if !failed_schemas.is_empty() {
        eprintln!("\nValid schemas that failed:");
        for (path, err) in &failed_schemas {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid schema(s) failed unexpectedly",
            failed_schemas.len()
        );
    }

    println!("✅ All {} valid schemas passed", valid_schemas.len());
}

#[test]
fn e2e_smoke_test_error_schemas() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_schemas = collect_xsd_files(schemas_dir().join("errors"));

    assert!(
        !error_schemas.is_empty(),
        "No error schemas found in schemas/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for schema_path in &error_schemas {
        if let Ok(summary) = run(&args(schema_path, temp_dir.path())) {
            if summary.is_success() {
                unexpectedly_succeeded.push(schema_path.clone());
            }
        }
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError schemas that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error schema(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error schemas failed as expected",
        error_schemas.len()
    );
}

#[test]
fn e2e_all_roots_with_generated_style() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output = temp_dir.path().join("out");

    let mut args = args(&schemas_dir().join("wildcards.xsd"), &output);
    args.root_node_name = Some("all".to_string());
    args.generate_style = Some("xsdvi.css".to_string());

    let summary = run(&args).expect("Run failed");
    assert!(summary.is_success());

    let mut names: Vec<_> = summary
        .written
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, ["Envelope.svg", "Price.svg", "Status.svg"]);

    let css = fs::read_to_string(output.join("xsdvi.css")).unwrap();
    assert!(css.contains("boxelement"));

    let svg = fs::read_to_string(output.join("Envelope.svg")).unwrap();
    assert!(svg.contains(r#"<?xml-stylesheet href="xsdvi.css" type="text/css"?>"#));
    assert!(!svg.contains("onclick"));
}

#[test]
fn e2e_missing_root_writes_nothing() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut args = args(&schemas_dir().join("order.xsd"), temp_dir.path());
    args.root_node_name = Some("Invoice".to_string());

    let summary = run(&args).expect("Run failed");
    assert!(summary.is_success());
    assert!(summary.written.is_empty());
}

#[test]
fn e2e_missing_input_is_checked_up_front() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let mut args = args(&schemas_dir().join("order.xsd"), temp_dir.path());
    args.inputs
        .push(temp_dir.path().join("absent.xsd").to_string_lossy().to_string());

    assert!(run(&args).is_err());
    assert!(!temp_dir.path().join("order.svg").exists());
}
