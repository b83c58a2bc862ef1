use clap::{Parser, Subcommand};
use gf_app::{AppResult, generate_service, project_service};
use gf_materials::MaterialRow;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "g4forge")]
#[command(about = "g4forge - Geant4 simulation project generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the project file and its material table
    Validate {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Show a summary of the project
    Show {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Edit or list the material table
    #[command(subcommand)]
    Materials(MaterialsCommands),
    /// Print the material construction order
    Order {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Generate the C++ sources and parameter file
    Generate {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Print the sources instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Convert an old nine-line parameter file into a project file
    ImportLegacy {
        /// Path to the parameter text file
        txt_path: PathBuf,
        /// Where to write the project YAML file
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum MaterialsCommands {
    /// List table rows
    List {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
    /// Add a row
    Add {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// Material or element name
        name: String,
        /// Ratio within the parent
        ratio: String,
        /// Density in g/cm3; omit for an element
        #[arg(long)]
        density: Option<String>,
        /// Parent material; omit for the root
        #[arg(long)]
        parent: Option<String>,
    },
    /// Remove a row by its index in `materials list`
    Remove {
        /// Path to the project YAML file
        project_path: PathBuf,
        /// 0-based row index
        index: usize,
    },
    /// List names usable as a parent
    Parents {
        /// Path to the project YAML file
        project_path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Show { project_path } => cmd_show(&project_path),
        Commands::Materials(materials_cmd) => match materials_cmd {
            MaterialsCommands::List { project_path } => cmd_materials_list(&project_path),
            MaterialsCommands::Add {
                project_path,
                name,
                ratio,
                density,
                parent,
            } => cmd_materials_add(
                &project_path,
                MaterialRow::new(
                    name,
                    density.unwrap_or_default(),
                    ratio,
                    parent.unwrap_or_default(),
                ),
            ),
            MaterialsCommands::Remove {
                project_path,
                index,
            } => cmd_materials_remove(&project_path, index),
            MaterialsCommands::Parents { project_path } => cmd_materials_parents(&project_path),
        },
        Commands::Order { project_path } => cmd_order(&project_path),
        Commands::Generate {
            project_path,
            dry_run,
        } => cmd_generate(&project_path, dry_run),
        Commands::ImportLegacy { txt_path, output } => cmd_import_legacy(&txt_path, &output),
    }
}

fn cmd_validate(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    project_service::validate_project(&project)?;
    let count = gf_app::validate_materials(project_path, &project)?;

    println!("✓ Project '{}' is valid", project.name);
    println!("  Materials and elements: {}", count);
    Ok(())
}

fn cmd_show(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let summary = project_service::summarize(project_path, &project);

    println!("Project: {}", summary.name);
    println!("  Particle: {}", summary.particle);
    println!("  PMT: {}", if summary.pmt { "yes" } else { "no" });
    println!("  Material table: {}", summary.material_table.display());
    Ok(())
}

fn cmd_materials_list(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let rows = gf_app::list_materials(project_path, &project)?;

    if rows.is_empty() {
        println!("Material table is empty.");
        return Ok(());
    }

    println!(
        "{:>4}  {:<16} {:<10} {:<8} {}",
        "#", "Name", "Density", "Ratio", "Parent"
    );
    for (i, row) in rows.iter().enumerate() {
        println!(
            "{:>4}  {:<16} {:<10} {:<8} {}",
            i, row.name, row.density, row.ratio, row.parent
        );
    }
    Ok(())
}

fn cmd_materials_add(project_path: &Path, row: MaterialRow) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let name = row.name.clone();
    gf_app::add_material(project_path, &project, row)?;

    println!("✓ Added '{}'", name);
    Ok(())
}

fn cmd_materials_remove(project_path: &Path, index: usize) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let removed = gf_app::remove_material(project_path, &project, index)?;

    println!("✓ Removed '{}'", removed.name);
    Ok(())
}

fn cmd_materials_parents(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    for name in gf_app::parent_candidates(project_path, &project)? {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_order(project_path: &Path) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;
    let order = gf_app::build_order(project_path, &project)?;

    println!("Construction order ({} entries):", order.len());
    for (i, entry) in order.iter().enumerate() {
        let parent = entry.parent.as_deref().unwrap_or("-");
        println!(
            "  {:>3}. {:<16} {:<8} ratio={:<8} parent={} children={}",
            i + 1,
            entry.name,
            entry.kind.label(),
            entry.ratio,
            parent,
            entry.child_count
        );
    }
    Ok(())
}

fn cmd_generate(project_path: &Path, dry_run: bool) -> AppResult<()> {
    let project = project_service::load_project(project_path)?;

    if dry_run {
        let sources = generate_service::preview(project_path, &project)?;
        for (name, contents) in sources.files() {
            println!("// ===== {} =====", name);
            println!("{}", contents);
        }
        return Ok(());
    }

    let report = generate_service::generate(project_path, &project)?;
    println!("✓ Generated '{}'", project.name);
    println!("  Output: {}", report.output_dir.display());
    if !report.copied.is_empty() {
        println!("  Copied {} project files", report.copied.len());
    }
    for file in &report.files {
        println!("  Wrote {}", file.display());
    }
    println!("  Build order: {}", report.build_order.join(" -> "));
    Ok(())
}

fn cmd_import_legacy(txt_path: &Path, output: &Path) -> AppResult<()> {
    let project = project_service::import_legacy(txt_path)?;
    project_service::save_project(output, &project)?;

    println!("✓ Imported '{}' into {}", project.name, output.display());
    Ok(())
}
