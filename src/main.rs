use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use clusterform::config;
use clusterform::models::{CreationType, ExtraVars, FormState};
use clusterform::services::request_service::parse_secrets;
use clusterform::services::{
    local_machine_envs, map_form_values_to_request_fields, map_form_values_to_yaml_editor,
    parse_yaml_editor_values, render_yaml,
};
use clusterform::utils::value_to_short_string;
use clusterform::{MapperError, Result};

#[derive(Parser)]
#[command(
    name = "clusterform",
    author,
    version,
    about = "Cluster creation request mapper",
    long_about = r#"clusterform turns the values of the PostgreSQL cluster creation form into the request sent to the console API.

The form is read from a JSON document using the form's camelCase field names. Use `--env-file` or environment variables (CLUSTERFORM_EXPERT_MODE, CLUSTERFORM_PROJECT_ID, CLUSTERFORM_SECRET_ID) to set defaults.

Examples:
  1) Build the request body of a form:
      clusterform request --form cluster.json --project-id 3
  2) Submit a YAML editor document instead of form fields:
      clusterform request --form cluster.json --yaml editor.yml
  3) Preview the YAML editor content:
      clusterform preview --form cluster.json
"#,
    after_help = "Use `clusterform <subcommand> --help` to get subcommand specific options and usage examples."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the cluster creation request
    #[command(about = "Build the cluster creation request", long_about = "Map the form into the cluster creation request body and print it as JSON. Cloud providers read credentials from `--secrets`; local machine clusters get their inventory encoded in `envs`.")]
    Request {
        /// Form values (JSON)
        #[arg(long)]
        form: PathBuf,
        /// Project the cluster belongs to
        #[arg(long)]
        project_id: Option<i64>,
        /// Saved secret used instead of inline credentials
        #[arg(long)]
        secret_id: Option<i64>,
        /// Cloud credentials (JSON object)
        #[arg(long)]
        secrets: Option<PathBuf>,
        /// YAML editor document replacing the generated extra vars
        #[arg(long)]
        yaml: Option<PathBuf>,
    },
    /// Print the YAML editor preview of the form
    #[command(about = "Preview the form as YAML", long_about = "Render the extra vars the YAML editor is pre-filled with for this form.")]
    Preview {
        #[arg(long)]
        form: PathBuf,
    },
    /// Print the decoded Ansible inventory of a local machine cluster
    #[command(about = "Show the Ansible inventory", long_about = "Print the inventory JSON that is base64-encoded into the request `envs` of a local machine cluster.")]
    Inventory {
        #[arg(long)]
        form: PathBuf,
        #[arg(long)]
        secret_id: Option<i64>,
    },
    /// Print the extra vars of the form as a table
    #[command(about = "Summarize extra vars", long_about = "Show the extra vars of the form as a key/value table.")]
    Summary {
        #[arg(long)]
        form: PathBuf,
    },
}

fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| MapperError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn print_table(vars: &ExtraVars) {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }

    if vars.is_empty() {
        println!("(no extra vars)");
        return;
    }
    table.set_header(vec!["Extra var", "Value"]);
    for (key, value) in vars.iter() {
        table.add_row(vec![key.clone(), value_to_short_string(value)]);
    }
    println!("\n{table}\n");
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Request {
            form,
            project_id,
            secret_id,
            secrets,
            yaml,
        } => {
            let mut state = FormState::from_path(&form)?;
            let secrets_info = match secrets {
                Some(path) => Some(parse_secrets(&read_document(&path)?)?),
                None => None,
            };
            let mut custom = match yaml {
                Some(path) => parse_yaml_editor_values(&read_document(&path)?),
                None => None,
            };
            if custom.is_some() {
                state.creation_type = CreationType::Yaml;
            }
            let request = map_form_values_to_request_fields(
                &state,
                secret_id.or_else(config::get_default_secret_id),
                project_id.unwrap_or_else(config::get_default_project_id),
                secrets_info.as_ref(),
                custom.as_mut(),
            )?;
            print_json(&request)
        }
        Commands::Preview { form } => {
            let state = FormState::from_path(&form)?;
            let vars = map_form_values_to_yaml_editor(&state)?;
            print!("{}", render_yaml(&vars)?);
            Ok(())
        }
        Commands::Inventory { form, secret_id } => {
            let state = FormState::from_path(&form)?;
            let envs = local_machine_envs(&state, secret_id.or_else(config::get_default_secret_id))?;
            print_json(&envs.ansible_inventory_json)
        }
        Commands::Summary { form } => {
            let state = FormState::from_path(&form)?;
            let vars = map_form_values_to_yaml_editor(&state)?;
            print_table(&vars);
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if !cli.silent {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();
    }

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    config::load_env_file(cli.env_file.as_deref());

    if let Err(e) = run(cli.command) {
        tracing::error!(%e, "command failed");
        eprintln!("{}: {}", yansi::Paint::new("Error").red(), e);
        process::exit(1);
    }
}
