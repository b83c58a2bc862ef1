use gf_materials::{DuplicatePolicy, MaterialRow, MaterialStore};
use gf_project::schema::*;
use gf_project::{
    CsvMaterialStore, LATEST_VERSION, MaterialTable, load_json, load_params_txt, load_yaml,
    render_params_txt, save_json, save_yaml, validate_project,
};

fn sample_project() -> Project {
    Project {
        version: LATEST_VERSION,
        name: "waterSim".to_string(),
        params: SimulationParams {
            pmt: true,
            particle: ParticleDef {
                name: "proton".to_string(),
                property: ParticleProperty::Energy,
                value: "100*MeV".to_string(),
            },
            world: WorldDef {
                dimensions: ["1.*m".into(), "1.*m".into(), "1.*m".into()],
                material: "G4_AIR".to_string(),
            },
            detector: DetectorDef {
                dimensions: ["0.5*m".into(), "0.5*m".into(), "0.1*m".into()],
                placement_z: "0.25*m".to_string(),
            },
        },
        materials: MaterialSettings {
            table: "mat.csv".into(),
            duplicate_policy: DuplicatePolicy::Warn,
        },
    }
}

fn temp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("gf_project_tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn roundtrip_yaml() {
    let project = sample_project();
    validate_project(&project).unwrap();

    let path = temp_dir("yaml").join("g4forge.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();

    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = sample_project();
    let path = temp_dir("json").join("g4forge.json");
    save_json(&path, &project).unwrap();
    assert_eq!(load_json(&path).unwrap(), project);
}

#[test]
fn yaml_defaults_material_settings() {
    let yaml = r#"
version: 1
name: minimal
params:
  particle: { name: e-, property: Momentum, value: "1*GeV" }
  world: { dimensions: ["1*m", "1*m", "1*m"], material: G4_Galactic }
  detector: { dimensions: ["1*cm", "1*cm", "1*cm"], placement_z: "0." }
"#;
    let path = temp_dir("defaults").join("g4forge.yaml");
    std::fs::write(&path, yaml).unwrap();

    let project = load_yaml(&path).unwrap();
    assert!(!project.params.pmt);
    assert_eq!(project.materials, MaterialSettings::default());
    assert_eq!(project.materials.duplicate_policy, DuplicatePolicy::Overwrite);
}

#[test]
fn invalid_project_not_saved() {
    let mut project = sample_project();
    project.params.particle.name.clear();
    let path = temp_dir("invalid").join("g4forge.yaml");
    assert!(save_yaml(&path, &project).is_err());
    assert!(!path.exists());
}

#[test]
fn legacy_params_file_roundtrip() {
    let project = sample_project();
    let path = temp_dir("legacy").join("waterSim.txt");
    std::fs::write(&path, render_params_txt(&project)).unwrap();

    let loaded = load_params_txt(&path).unwrap();
    assert_eq!(loaded.params, project.params);
    assert_eq!(loaded.name, "waterSim");
}

#[test]
fn table_edits_persist_to_csv() {
    let path = temp_dir("table").join("mat.csv");
    let mut store = CsvMaterialStore::new(&path);

    let mut table = MaterialTable::load(&store).unwrap();
    table.add_row(MaterialRow::new("H", "", "2", "H2O")).unwrap();
    table.add_row(MaterialRow::new("H2O", "1.0", "1", "")).unwrap();
    table.add_row(MaterialRow::new("O", "", "1", "H2O")).unwrap();
    table.save(&mut store).unwrap();

    let reloaded = store.read_all().unwrap();
    let names: Vec<&str> = reloaded.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["H2O", "H", "O"]);
}
