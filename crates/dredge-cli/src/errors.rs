use console::style;
use dredge_core::DredgeError;
use std::fmt;

/// Error with context and suggestions for the terminal
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), context: None, suggestions: Vec::new(), help_command: None }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn workspace_not_found() -> CliError {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    CliError::new("Not in a DredgeMap workspace")
        .with_context(format!(
            "You're not in a DredgeMap workspace directory.\n\nCurrent directory: {}\nLooking for: .dredge directory",
            current_dir
        ))
        .with_suggestion("Initialize a workspace: dredge init")
        .with_suggestion("Or pass --workspace <DIR>")
        .with_help("Run: dredge init --help")
}

pub fn no_active_project() -> CliError {
    CliError::new("No active project")
        .with_context("Records, boundaries and statistics belong to a project.")
        .with_suggestion("Create one: dredge project create \"Canal Norte\"")
        .with_suggestion("Or select an existing one: dredge project use <ID>")
        .with_help("Run: dredge project list")
}

pub fn invalid_config(key: &str, reason: &str) -> CliError {
    CliError::new(format!("Invalid configuration: {}", key))
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check .dredge/config.toml")
        .with_suggestion("Check DREDGE_* environment variables")
        .with_help("Run: dredge status --verbose")
}

fn from_domain(error: &DredgeError) -> Option<CliError> {
    let cli_error = match error {
        DredgeError::NoSelection => CliError::new(error.to_string())
            .with_suggestion("Add boundary vertices: dredge boundary add <LAT> <LNG>")
            .with_suggestion("Or pass a drawn polygon: --adhoc selection.geojson")
            .with_suggestion("Check that the boundary is not hidden (show_official_boundary)"),
        DredgeError::ProjectNotFound { .. } => CliError::new(error.to_string())
            .with_suggestion("List projects: dredge project list")
            .with_help("Run: dredge project --help"),
        DredgeError::RecordNotFound { .. } => CliError::new(error.to_string())
            .with_suggestion("List records: dredge record list")
            .with_help("Run: dredge record --help"),
        DredgeError::IndexOutOfRange { len, .. } => CliError::new(error.to_string())
            .with_context(format!("Valid positions are P1 to P{}", len))
            .with_suggestion("List vertices: dredge boundary list"),
        DredgeError::EmptyBoundary => CliError::new(error.to_string())
            .with_suggestion("Add a vertex: dredge boundary add <LAT> <LNG>"),
        DredgeError::ConfigInvalid { key, reason } => invalid_config(key, reason),
        _ => return None,
    };
    Some(cli_error)
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return CliError {
            message: cli_error.message.clone(),
            context: cli_error.context.clone(),
            suggestions: cli_error.suggestions.clone(),
            help_command: cli_error.help_command.clone(),
        };
    }

    if let Some(cli_error) = error.downcast_ref::<DredgeError>().and_then(from_domain) {
        return cli_error;
    }

    let message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(|cause| cause.to_string()).collect();

    let cli_error = if message.contains("No such file or directory") {
        CliError::new("File not found").with_suggestion("Check the file path and try again")
    } else if message.contains("permission denied") {
        CliError::new("Permission denied").with_suggestion("Check file permissions")
    } else {
        CliError::new(message)
    };

    if chain.is_empty() {
        cli_error
    } else {
        cli_error.with_context(format!("Caused by: {}", chain.join(": ")))
    }
}
