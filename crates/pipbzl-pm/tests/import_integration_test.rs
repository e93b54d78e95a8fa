/// Integration tests for the wheel import pipeline
///
/// These tests build real wheel archives on disk and run discovery,
/// resolution and rendering over them.

use pipbzl_pm::{
    load_records, resolve, ExtrasResolver, ImportError, PackageUniverse, RenderConfig,
    RequirementsRenderer, Unsatisfiable, Wheel,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Write a wheel whose dist-info holds the given METADATA content
fn write_wheel(dir: &Path, distribution: &str, version: &str, metadata: &str) -> PathBuf {
    let path = dir.join(format!("{}-{}-py3-none-any.whl", distribution, version));
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file(format!("{}/__init__.py", distribution.to_lowercase()), options).unwrap();
    zip.write_all(b"").unwrap();
    zip.start_file(format!("{}-{}.dist-info/METADATA", distribution, version), options).unwrap();
    zip.write_all(metadata.as_bytes()).unwrap();
    zip.finish().unwrap();

    path
}

/// Write a wheel carrying a legacy metadata.json
fn write_json_wheel(dir: &Path, distribution: &str, version: &str, json: &str) -> PathBuf {
    let path = dir.join(format!("{}-{}-py2.py3-none-any.whl", distribution, version));
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();

    zip.start_file(format!("{}-{}.dist-info/metadata.json", distribution, version), options).unwrap();
    zip.write_all(json.as_bytes()).unwrap();
    zip.start_file(format!("{}-{}.dist-info/METADATA", distribution, version), options).unwrap();
    zip.write_all(format!("Name: ignored\nVersion: {}\n", version).as_bytes()).unwrap();
    zip.finish().unwrap();

    path
}

fn simple_metadata(name: &str, version: &str) -> String {
    format!("Metadata-Version: 2.1\nName: {}\nVersion: {}\n", name, version)
}

#[test]
fn test_record_from_metadata_wheel() {
    let temp_dir = TempDir::new().unwrap();
    let metadata = "Metadata-Version: 2.1
Name: requests
Version: 2.22.0
Requires-Dist: idna (<2.9,>=2.5)
Provides-Extra: security
Requires-Dist: pyOpenSSL (>=0.14) ; extra == 'security'
Requires-Dist: cryptography (>=1.3.4) ; extra == 'security'
Provides-Extra: socks
Requires-Dist: PySocks (!=1.5.7,>=1.5.6) ; extra == 'socks'
";
    let path = write_wheel(temp_dir.path(), "requests", "2.22.0", metadata);

    let record = Wheel::new(path).unwrap().to_record().unwrap();

    assert_eq!(record.name, "requests");
    assert_eq!(record.version, "2.22.0");
    assert_eq!(record.basename, "requests-2.22.0-py3-none-any.whl");
    assert_eq!(record.base_dependencies.len(), 1);
    assert_eq!(record.base_dependencies[0].name, "idna");
    assert_eq!(record.declared_extras().collect::<Vec<_>>(), vec!["security", "socks"]);
    assert_eq!(record.dependencies_for("security").len(), 2);
    assert_eq!(record.dependencies_for("socks")[0].name, "PySocks");
}

#[test]
fn test_metadata_json_preferred() {
    let temp_dir = TempDir::new().unwrap();
    let json = r#"{
        "name": "Flask",
        "version": "0.12.2",
        "extras": ["dotenv"],
        "run_requires": [
            {"requires": ["Jinja2 (>=2.4)", "click (>=2.0)"]},
            {"extra": "dotenv", "requires": ["python-dotenv"]}
        ]
    }"#;
    let path = write_json_wheel(temp_dir.path(), "Flask", "0.12.2", json);

    let record = Wheel::new(path).unwrap().to_record().unwrap();

    assert_eq!(record.name, "Flask");
    assert_eq!(record.identity(), "flask");
    assert_eq!(record.base_dependencies.len(), 2);
    assert_eq!(record.dependencies_for("dotenv")[0].name, "python-dotenv");
}

#[test]
fn test_extra_only_named_in_marker_is_declared() {
    let temp_dir = TempDir::new().unwrap();
    let metadata = "Name: a\nVersion: 1.0\nRequires-Dist: b ; extra == \"hidden\"\n";
    let path = write_wheel(temp_dir.path(), "a", "1.0", metadata);

    let record = Wheel::new(path).unwrap().to_record().unwrap();

    assert_eq!(record.declared_extras().collect::<Vec<_>>(), vec!["hidden"]);
}

#[test]
fn test_wheel_without_metadata() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty-1.0-py3-none-any.whl");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    zip.start_file("empty/__init__.py", SimpleFileOptions::default()).unwrap();
    zip.finish().unwrap();

    let result = Wheel::new(path).unwrap().to_record();

    assert!(matches!(result, Err(ImportError::MissingMetadata { .. })));
}

#[test]
fn test_invalid_requirement_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let metadata = "Name: a\nVersion: 1.0\nRequires-Dist: [broken\n";
    let path = write_wheel(temp_dir.path(), "a", "1.0", metadata);

    let result = Wheel::new(path).unwrap().to_record();

    assert!(matches!(result, Err(ImportError::InvalidRequirement { .. })));
}

#[test]
fn test_end_to_end_import() {
    let temp_dir = TempDir::new().unwrap();
    let wheels = temp_dir.path().join("wheels");
    std::fs::create_dir_all(wheels.join("sub")).unwrap();

    write_wheel(
        &wheels,
        "requests",
        "2.22.0",
        "Name: requests\nVersion: 2.22.0\nRequires-Dist: idna\nProvides-Extra: security\n\
         Requires-Dist: pyOpenSSL ; extra == 'security'\nProvides-Extra: socks\n\
         Requires-Dist: PySocks ; extra == 'socks'\n",
    );
    write_wheel(&wheels, "idna", "2.8", &simple_metadata("idna", "2.8"));
    write_wheel(
        &wheels.join("sub"),
        "pyOpenSSL",
        "19.0.0",
        "Name: pyOpenSSL\nVersion: 19.0.0\nProvides-Extra: test\nRequires-Dist: pytest[cov] ; extra == 'test'\n",
    );

    let records = load_records(&wheels).unwrap();
    assert_eq!(records.len(), 3);

    let universe = PackageUniverse::build(records);
    let extras = resolve(&universe);

    assert_eq!(extras.extras_for("requests"), ["security"]);
    assert!(extras.extras_for("pyopenssl").is_empty());
    assert_eq!(
        ExtrasResolver::new(&universe).explain("requests", Some("socks")),
        Err(Unsatisfiable::MissingPackage { name: "pysocks".to_string() })
    );

    let output = temp_dir.path().join("requirements.bzl");
    let config = RenderConfig::new("pip_deps", "//:requirements.txt");
    RequirementsRenderer::new(&config).write(&output, &universe, &extras).unwrap();

    let content = std::fs::read_to_string(&output).unwrap();
    assert!(content.contains("\"requests[security]\": \"@pypi__requests_2_22_0//:security\""));
    assert!(!content.contains("requests[socks]"));
    assert!(content.contains("whl = \"@pip_deps//:pyOpenSSL-19.0.0-py3-none-any.whl\""));
    assert!(content.contains("\"pyopenssl\": \"@pypi__pyopenssl_19_0_0//:pkg\""));
}

#[test]
fn test_end_to_end_output_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    write_wheel(temp_dir.path(), "b", "1.0", "Name: b\nVersion: 1.0\nProvides-Extra: y\nRequires-Dist: a[x] ; extra == 'y'\n");
    write_wheel(temp_dir.path(), "a", "1.0", "Name: a\nVersion: 1.0\nProvides-Extra: x\nRequires-Dist: b[y] ; extra == 'x'\n");

    let config = RenderConfig::new("deps", "requirements.txt");
    let render = || {
        let universe = PackageUniverse::build(load_records(temp_dir.path()).unwrap());
        let extras = resolve(&universe);
        assert!(extras.iter().all(|(_, e)| e.is_empty()));
        RequirementsRenderer::new(&config).render(&universe, &extras)
    };

    assert_eq!(render(), render());
}
