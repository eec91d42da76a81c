use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::CliTest;

const OUTPUT: &str = "scripts/taginfo-openstreetmap-carto.json";

const SEARCH_URL: &str =
    "https://github.com/gravitystorm/openstreetmap-carto/search?utf8=%E2%9C%93&q=";

fn read_catalog(test: &CliTest) -> Result<Value> {
    let content = test.read_file(OUTPUT)?;
    serde_json::from_str(&content).context("Output should be valid JSON")
}

#[test]
fn test_style_and_layer_entries_are_not_merged() -> Result<()> {
    let test = CliTest::with_inputs(
        "node,way  amenity  text  polygon,linear\n",
        r#"
Layer:
  - id: amenity-points
    geometry: point
    Datasource:
      type: postgis
      table: "tags->'amenity'"
"#,
    )?;

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(test.command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 2 tags (1 from style, 1 from 1 layers) to [ROOT]/scripts/taginfo-openstreetmap-carto.json

    ----- stderr -----
    ");

    let catalog = read_catalog(&test)?;
    assert_eq!(
        catalog["tags"],
        json!([
            {
                "key": "amenity",
                "object_types": ["node", "way", "area", "relation"],
                "description": "Used in the osm2pgsql database backend, see more in the github repo",
                "doc_url": format!("{SEARCH_URL}amenity")
            },
            {
                "key": "amenity",
                "object_types": ["node"],
                "description": "Used as a hstore tags-> in the database backend, see more in the github repo",
                "doc_url": format!("{SEARCH_URL}amenity")
            }
        ])
    );

    Ok(())
}

#[test]
fn test_project_block_and_format() -> Result<()> {
    let test = CliTest::with_inputs("", "Layer: []\n")?;

    let output = test.command().output()?;
    assert!(output.status.success());

    let content = test.read_file(OUTPUT)?;
    assert!(content.starts_with("{\n    \"data_format\": 1,"));

    let catalog: Value = serde_json::from_str(&content)?;
    assert_eq!(
        catalog["project"],
        json!({
            "name": "OpenStreetMap Carto keys",
            "description": "Default OpenStreetMap.org style using CartoCSS",
            "project_url": "https://github.com/gravitystorm/openstreetmap-carto",
            "contact_name": "openstreetmap-carto maintainers",
            "contact_email": "openstreetmap-carto (at) gravitystorm (dot) co (dot) uk"
        })
    );
    assert_eq!(catalog["tags"], json!([]));

    Ok(())
}

#[test]
fn test_realistic_project() -> Result<()> {
    let style = "\
# OsmType  Tag          DataType     Flags
node,way   access       text         linear
node,way   note         text         delete
node,way   name         text         linear,nocolumn
way        highway      text         linear
node,way   z_order      int4         linear
way        way_area     real         linear
";
    let project = r#"
_parts:
  osm2pgsql: &osm2pgsql
    type: "postgis"
    dbname: "gis"
Layer:
  - id: landcover
    geometry: polygon
    Datasource:
      <<: *osm2pgsql
      table: |-
        (SELECT way, tags->'wetland' AS wetland, tags->'leaf_type' AS leaf_type
          FROM planet_osm_polygon
        ) AS landcover
  - id: wetland-symbols
    Datasource:
      <<: *osm2pgsql
      table: |-
        (SELECT way FROM planet_osm_point WHERE tags ? 'wetland') AS wetland
  - id: entrances
    Datasource:
      <<: *osm2pgsql
      table: |-
        (SELECT way FROM planet_osm_point
          WHERE tags ?& ARRAY['wheelchair','ramp:wheelchair']) AS entrances
  - id: ocean
    Datasource:
      type: shape
      file: data/simplified-water-polygons-split-3857/simplified_water_polygons.shp
"#;
    let test = CliTest::with_inputs(style, project)?;

    let output = test.command().output()?;
    assert!(output.status.success());

    let catalog = read_catalog(&test)?;
    let summary: Vec<(String, Value)> = catalog["tags"]
        .as_array()
        .context("tags should be an array")?
        .iter()
        .map(|t| (t["key"].as_str().unwrap().to_string(), t["object_types"].clone()))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("access".to_string(), json!(["node", "way", "relation"])),
            ("highway".to_string(), json!(["way", "relation"])),
            ("wetland".to_string(), json!(["area", "node", "relation"])),
            ("leaf_type".to_string(), json!(["area", "relation"])),
            ("wheelchair".to_string(), json!(["node"])),
            ("ramp:wheelchair".to_string(), json!(["node"])),
        ]
    );

    Ok(())
}

#[test]
fn test_overwrites_previous_output() -> Result<()> {
    let test = CliTest::with_inputs("node  shop  text  linear\n", "Layer: []\n")?;
    test.write_file(OUTPUT, "{\"stale\": true}")?;

    let output = test.command().output()?;
    assert!(output.status.success());

    let catalog = read_catalog(&test)?;
    assert!(catalog.get("stale").is_none());
    assert_eq!(catalog["tags"][0]["key"], json!("shop"));

    Ok(())
}

#[test]
fn test_missing_style_file_fails() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("project.mml", "Layer: []\n")?;

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(test.command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to read style file: [ROOT]/scripts/../openstreetmap-carto.style: No such file or directory (os error 2)
    ");

    assert!(!test.scripts_dir().join("taginfo-openstreetmap-carto.json").exists());

    Ok(())
}

#[test]
fn test_malformed_project_fails() -> Result<()> {
    let test = CliTest::with_inputs("", "Layer:\n  - geometry: point\n")?;

    let mut settings = test.snapshot_settings();
    // serde's wording of the shape error is not ours to pin down
    settings.add_filter(r"(Unexpected project layout): .*", "$1: [DETAIL]");
    let _guard = settings.bind_to_scope();
    assert_cmd_snapshot!(test.command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to parse project file: [ROOT]/scripts/../project.mml: Unexpected project layout: [DETAIL]
    ");

    Ok(())
}

#[test]
fn test_unwritable_output_fails_and_keeps_target() -> Result<()> {
    let test = CliTest::with_inputs("node  shop  text  linear\n", "Layer: []\n")?;
    // A directory where the catalog should go cannot be replaced by a file.
    test.write_file(&format!("{OUTPUT}/keep.txt"), "previous")?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Failed to write file:"));
    assert_eq!(test.read_file(&format!("{OUTPUT}/keep.txt"))?, "previous");

    Ok(())
}

#[test]
fn test_quiet_output() -> Result<()> {
    let test = CliTest::with_inputs("node  note  text  delete\n", VERBOSE_PROJECT)?;

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(test.command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Wrote 1 tags (0 from style, 1 from 1 layers) to [ROOT]/scripts/taginfo-openstreetmap-carto.json

    ----- stderr -----
    ");

    Ok(())
}

const VERBOSE_PROJECT: &str = r#"
Layer:
  - id: custom
    Datasource: { type: postgis, table: "SELECT tags->'tourism' FROM my_table" }
"#;

#[test]
fn test_verbose_output() -> Result<()> {
    let test = CliTest::with_inputs("node  note  text  delete\n", VERBOSE_PROJECT)?;

    let mut cmd = test.command();
    cmd.arg("--verbose");

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    skip note (line 1: deleted on import)
    layer custom
      warning: no known table in query of layer 'custom'
        select tags->'tourism' from my_table
      --> tourism unknown
    ✓ Wrote 1 tags (0 from style, 1 from 1 layers) to [ROOT]/scripts/taginfo-openstreetmap-carto.json

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_config_file_overrides_paths() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("styles/carto.style", "way  waterway  text  linear\n")?;
    test.write_file("styles/project.yaml", "Layer: []\n")?;
    test.write_file(
        "scripts/.taginforc.json",
        r#"{
  "styleFile": "../styles/carto.style",
  "projectFile": "../styles/project.yaml",
  "outputFile": "out/taginfo.json",
  "searchUrl": "https://example.org/search?q="
}"#,
    )?;

    let output = test.command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = test.read_file("scripts/out/taginfo.json")?;
    let catalog: Value = serde_json::from_str(&content)?;
    assert_eq!(catalog["tags"][0]["key"], json!("waterway"));
    assert_eq!(
        catalog["tags"][0]["doc_url"],
        json!("https://example.org/search?q=waterway")
    );
    assert!(test.root().join("styles").exists());

    Ok(())
}
