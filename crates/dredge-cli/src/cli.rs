use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// DredgeMap - Dredging field data and geofenced selection
#[derive(Parser, Debug)]
#[command(name = "dredge")]
#[command(about = "Dredging field data, project boundaries and geofenced statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Show planned actions without executing them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Workspace directory (defaults to the nearest parent holding .dredge)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new DredgeMap workspace
    Init(InitArgs),

    /// Manage projects and the active project
    Project(ProjectArgs),

    /// Record, edit and list dredge measurements
    Record(RecordArgs),

    /// Edit the official boundary of the active project
    Boundary(BoundaryArgs),

    /// Statistics for records inside the active polygons
    Stats(SelectionArgs),

    /// Export the current selection as GeoJSON
    Export(ExportArgs),

    /// Project totals and monthly production trends
    Summary,

    /// Show workspace status and configuration
    Status(StatusArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Workspace directory path (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Rewrite config.toml if the workspace already exists. Data files are kept.
    #[arg(long)]
    pub force: bool,

    /// Operator name written to the audit trail
    #[arg(long)]
    pub operator: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// Create a project and make it active
    Create(CreateProjectArgs),

    /// List all projects
    List,

    /// Show a project (defaults to the active one)
    Show {
        /// Project ID
        id: Option<String>,
    },

    /// Delete a project with all of its records and audit entries
    Delete {
        /// Project ID
        id: String,
    },

    /// Switch the active project
    Use {
        /// Project ID
        id: String,
    },
}

#[derive(Parser, Debug)]
pub struct CreateProjectArgs {
    /// Project name
    pub name: String,

    #[arg(long, default_value = "")]
    pub client: String,

    #[arg(long, default_value = "")]
    pub location: String,

    #[arg(long)]
    pub description: Option<String>,
}

#[derive(Parser, Debug)]
pub struct RecordArgs {
    #[command(subcommand)]
    pub command: RecordCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// Add a measurement to the active project
    Add(AddRecordArgs),

    /// Replace fields of an existing measurement
    Update(UpdateRecordArgs),

    /// Delete a measurement
    Delete {
        /// Record ID
        id: String,
    },

    /// List measurements of the active project, newest first
    List(ListRecordsArgs),

    /// Show the audit trail of the active project
    Audit,
}

#[derive(Parser, Debug)]
pub struct AddRecordArgs {
    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Depth in meters
    #[arg(long)]
    pub depth: f64,

    /// Volume in cubic meters
    #[arg(long)]
    pub volume: f64,

    /// Material: sand, clay, silt, rock or other
    #[arg(long)]
    pub material: String,

    /// Vessel name
    #[arg(long)]
    pub vessel: String,

    /// Measurement time (RFC 3339, defaults to now)
    #[arg(long)]
    pub timestamp: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Photo URL or base64 payload
    #[arg(long)]
    pub photo: Option<String>,
}

#[derive(Parser, Debug)]
pub struct UpdateRecordArgs {
    /// Record ID
    pub id: String,

    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    #[arg(long)]
    pub depth: Option<f64>,

    #[arg(long)]
    pub volume: Option<f64>,

    #[arg(long)]
    pub material: Option<String>,

    #[arg(long)]
    pub vessel: Option<String>,

    #[arg(long)]
    pub timestamp: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub photo: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListRecordsArgs {
    /// Filter by vessel, material or notes (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Only records shallower than the shallow threshold
    #[arg(long)]
    pub shallow: bool,

    /// Override the shallow threshold in meters
    #[arg(long)]
    pub shallow_threshold: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct BoundaryArgs {
    #[command(subcommand)]
    pub command: BoundaryCommand,
}

#[derive(Subcommand, Debug)]
pub enum BoundaryCommand {
    /// Append a vertex
    Add {
        #[arg(allow_hyphen_values = true)]
        lat: f64,
        #[arg(allow_hyphen_values = true)]
        lng: f64,
    },

    /// Remove the last vertex
    Undo,

    /// Remove the vertex at a position (P1 is position 1)
    Remove {
        position: usize,
    },

    /// Remove every vertex
    Clear,

    /// List vertices with area and validation warnings
    List,
}

/// Options shared by commands that compute a selection
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Minimum depth in meters (inclusive)
    #[arg(long)]
    pub min: Option<f64>,

    /// Maximum depth in meters (inclusive)
    #[arg(long)]
    pub max: Option<f64>,

    /// GeoJSON file holding a drawn selection polygon
    #[arg(long, value_name = "FILE")]
    pub adhoc: Option<PathBuf>,

    /// Leave the official boundary out of the selection
    #[arg(long)]
    pub hide_boundary: bool,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output directory (defaults to export_dir from the configuration)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the document instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Also show every configuration value with its source
    #[arg(long)]
    pub verbose: bool,
}
