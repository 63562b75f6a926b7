use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::constants::DEFAULT_CONTRACT_MONTHS;
use crate::models::{PropertyKind, Role};

#[derive(Parser, Debug)]
#[command(name = "domu")]
#[command(version)]
#[command(about = "Client for the DOMU property-rental service", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL (overrides configuration)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (overrides configuration)
    #[arg(long, value_enum, global = true)]
    pub output_format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize configuration
    Init,
    /// Check configuration, session and backend reachability
    Status,
    /// Create an account
    Register(RegisterArgs),
    /// Log in and keep the session
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long, env = "DOMU_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show the logged-in account
    Whoami,
    /// Properties
    #[command(subcommand)]
    Property(PropertyCommand),
    /// Contracts
    #[command(subcommand)]
    Contract(ContractCommand),
    /// Other accounts and your profile
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub email: String,
    #[arg(short, long, env = "DOMU_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
    /// propietario or inquilino
    #[arg(short, long, default_value = "propietario")]
    pub role: Role,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// List every property
    List,
    /// Show one property
    Get { id: String },
    /// Publish a property
    Create(CreatePropertyArgs),
    /// Edit a property; unspecified fields keep their current value
    Update(UpdatePropertyArgs),
    /// Delete a property
    Delete { id: String },
    /// Properties you own
    Mine,
    /// Search available properties
    Search { query: String },
}

#[derive(Args, Debug)]
pub struct CreatePropertyArgs {
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub address: String,
    /// Monthly base price; non-numeric characters are ignored
    #[arg(short, long)]
    pub price: String,
    /// casa, departamento or otro
    #[arg(short, long, default_value = "departamento")]
    pub kind: PropertyKind,
    #[arg(short, long)]
    pub features: Option<String>,
    /// Photo URL; repeat for several
    #[arg(long = "photo")]
    pub photos: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdatePropertyArgs {
    pub id: String,
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(short, long)]
    pub address: Option<String>,
    #[arg(short, long)]
    pub price: Option<String>,
    #[arg(short, long)]
    pub kind: Option<PropertyKind>,
    #[arg(short, long)]
    pub features: Option<String>,
    /// Replace the photo list; repeat for several
    #[arg(long = "photo")]
    pub photos: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum ContractCommand {
    /// Lease a property to a tenant, starting today
    Create {
        /// Tenant user id
        #[arg(short, long)]
        tenant: String,
        /// Property id
        #[arg(short, long)]
        property: String,
        /// Duration in months
        #[arg(short, long, default_value_t = DEFAULT_CONTRACT_MONTHS)]
        duration: u32,
        #[arg(long)]
        conditions: Option<String>,
    },
    /// Your contracts
    List,
    /// Show one contract
    Get { id: String },
    /// Cancel a contract
    Cancel { id: String },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Find accounts by name or email
    Search { query: String },
    /// Show one account
    Get { id: String },
    /// Change your name and/or email
    UpdateProfile {
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// The normalized API response as JSON
    Json,
}

impl OutputFormat {
    /// Parse the `output.format` configuration value
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_property_update() {
        let cli = Cli::try_parse_from([
            "domu", "property", "update", "p1", "--price", "$500000", "--kind", "casa",
            "--output-format", "json",
        ])
        .unwrap();

        assert_eq!(cli.output_format, Some(OutputFormat::Json));
        match cli.command {
            Commands::Property(PropertyCommand::Update(args)) => {
                assert_eq!(args.id, "p1");
                assert_eq!(args.price.as_deref(), Some("$500000"));
                assert_eq!(args.kind, Some(PropertyKind::House));
                assert!(args.photos.is_empty());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_register_role() {
        let cli = Cli::try_parse_from([
            "domu", "register", "--name", "Ana", "--email", "ana@domu.cl", "--password",
            "secreto", "--confirm-password", "secreto", "--role", "inquilino",
        ])
        .unwrap();

        match cli.command {
            Commands::Register(args) => assert_eq!(args.role, Role::Tenant),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_contract_duration_defaults_to_a_year() {
        let cli =
            Cli::try_parse_from(["domu", "contract", "create", "-t", "u1", "-p", "p1"]).unwrap();

        match cli.command {
            Commands::Contract(ContractCommand::Create { duration, .. }) => {
                assert_eq!(duration, 12)
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_config("anything"), OutputFormat::Text);
    }
}
