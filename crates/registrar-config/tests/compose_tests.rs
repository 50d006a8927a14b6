//! Integration tests: descriptor JSON in, merged configuration file out.

use pretty_assertions::assert_eq;
use registrar_config::io::{read_text, write_text};
use registrar_config::render::GENERATED_HEADER;
use registrar_config::{Composer, Error, MergedSection, PackageDescriptor, RegistrarConfig};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;

const DESCRIPTOR: &str = r#"{
  "packages": [
    {
      "name": "acme/core",
      "version": "1.4.0",
      "dependency": "^1.4",
      "config": {
        "parameters": { "data": { "debug": false, "paths": ["src"] } },
        "extensions": { "data": { "migrations": { "value": "Acme\\Migrations", "attributes": ["%appDir%/migrations"] } } },
        "services": { "data": "- Acme\\Kernel\n", "rewrite": false }
      },
      "extension_types": {
        "Acme\\Migrations": { "after": ["Acme\\Orm"] }
      }
    },
    {
      "name": "acme/orm",
      "config": {
        "extensions": { "data": { "orm": "Acme\\Orm" } },
        "parameters": { "data": { "debug": true, "paths": ["vendor/acme/orm"], "orm": { "proxies": "%tempDir%/proxies" } } },
        "services": { "data": "entityManager: Acme\\EntityManager\n", "rewrite": false }
      },
      "extension_types": { "Acme\\Orm": {} }
    }
  ]
}"#;

fn compose(descriptor: &str, config: &RegistrarConfig) -> registrar_config::Result<String> {
    let descriptor = PackageDescriptor::from_json(descriptor)?;
    let composed = Composer::new(&config.types).compose(&descriptor)?;
    composed.render()
}

#[test]
fn test_compose_full_document() {
    let rendered = compose(DESCRIPTOR, &RegistrarConfig::default()).unwrap();

    let expected = format!(
        "{GENERATED_HEADER}\n\n\
         parameters:\n\
         \tdebug: true\n\
         \tpaths:\n\
         \t\t- src\n\
         \t\t- vendor/acme/orm\n\
         \torm:\n\
         \t\tproxies: %tempDir%/proxies\n\
         \n\
         extensions:\n\
         \torm: Acme\\Orm\n\
         \tmigrations: Acme\\Migrations(%appDir%/migrations)\n\
         \n\
         services:\n\
         \t- Acme\\Kernel\n\
         \tentityManager: Acme\\EntityManager\n"
    );
    assert_eq!(rendered, expected);
}

#[test]
fn test_project_types_layer_over_package_declarations() {
    // The project forces migrations before the ORM, contradicting the package.
    let config = RegistrarConfig::parse(
        r#"
[types."Acme\\Migrations"]
before = ["Acme\\Orm"]
"#,
        Path::new("registrar.toml"),
    )
    .unwrap();

    let err = compose(DESCRIPTOR, &config).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Extensions(registrar_extensions::Error::OrderingConflict { .. })
        ),
        "unexpected error {err:?}"
    );
}

#[test]
fn test_project_types_make_undeclared_types_known() {
    let descriptor = json!({
        "packages": [{
            "name": "acme/cache",
            "config": { "extensions": { "data": { "cache": "Acme\\Cache" } } }
        }]
    })
    .to_string();

    assert!(matches!(
        compose(&descriptor, &RegistrarConfig::default()),
        Err(Error::Extensions(
            registrar_extensions::Error::UnresolvableType { .. }
        ))
    ));

    let config =
        RegistrarConfig::parse("[types.\"Acme\\\\Cache\"]\n", Path::new("registrar.toml"))
            .unwrap();
    let rendered = compose(&descriptor, &config).unwrap();
    assert!(rendered.ends_with("extensions:\n\tcache: Acme\\Cache\n"));
}

#[test]
fn test_sections_keep_first_seen_order() {
    let descriptor = PackageDescriptor::from_json(DESCRIPTOR).unwrap();
    let config = RegistrarConfig::default();
    let composed = Composer::new(&config.types).compose(&descriptor).unwrap();

    let names: Vec<_> = composed.sections.keys().cloned().collect();
    assert_eq!(names, vec!["parameters", "extensions", "services"]);
    assert_eq!(composed.section("extensions"), Some(&MergedSection::Extensions));
}

#[test]
fn test_failed_compose_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("app/config/package.neon");
    let broken = r#"{"packages": [{"name": "a/a", "config": {"extensions": {"data": {"x": 5}}}}]}"#;

    let result = compose(broken, &RegistrarConfig::default()).and_then(|text| {
        write_text(&output, &text)?;
        Ok(text)
    });

    assert!(matches!(
        result,
        Err(Error::Extensions(
            registrar_extensions::Error::MalformedPayload { .. }
        ))
    ));
    assert!(!output.exists());
}

#[test]
fn test_write_and_read_back() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("app/config/package.neon");
    let rendered = compose(DESCRIPTOR, &RegistrarConfig::default()).unwrap();

    write_text(&output, &rendered).unwrap();

    assert_eq!(read_text(&output).unwrap(), rendered);
}
