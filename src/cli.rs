use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Manage the content of your portfolio site", version)]
#[command(after_help = "EXAMPLES:
    folio login                        Sign in to the backend
    folio projects                     List projects
    folio project view 12              Show one project
    folio project create -t \"Title\" ...  Create a project
    folio testimonial delete 4         Delete a testimonial")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages and refreshed tables
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(
        alias = "p",
        after_help = "EXAMPLES:
    folio project list
    folio project view 12
    folio project create -t \"Folio\" -d \"Portfolio site\" --location Lagos \\
        --type \"Web App\" --year 2024 --link https://example.com \\
        --tool Rust --tool Svelte --logo ./logo.png
    folio project update 12 --year 2025
    folio project delete 12
    folio project stats"
    )]
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// List projects (alias for 'project list')
    Projects,
    /// Manage services
    #[command(
        alias = "s",
        after_help = "EXAMPLES:
    folio service create -t \"Web development\" -d \"Sites and apps\" --role Frontend
    folio service update 3 --role Frontend --role Backend"
    )]
    Service {
        #[command(subcommand)]
        action: ServiceCommands,
    },
    /// List services (alias for 'service list')
    Services,
    /// Manage work experience
    #[command(
        alias = "e",
        after_help = "EXAMPLES:
    folio experience create -t Engineer --company Acme --location Remote \\
        --start 2021-03-01 --end Present --type Full-time \\
        --responsibility \"Built the API\"
    folio experience view 5"
    )]
    Experience {
        #[command(subcommand)]
        action: ExperienceCommands,
    },
    /// List work experience (alias for 'experience list')
    Experiences,
    /// Manage testimonials
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    folio testimonial create --name Ada --role CTO --text \"A pleasure to work with\"
    folio testimonial delete 4 --yes"
    )]
    Testimonial {
        #[command(subcommand)]
        action: TestimonialCommands,
    },
    /// List testimonials (alias for 'testimonial list')
    Testimonials,
    /// Manage hero content
    #[command(after_help = "EXAMPLES:
    folio hero create --super-text \"Hi, I'm Deb\" --sub-text \"I build things\" \\
        --phone \"+234 800 000\" --image ./me.png --resume ./cv.pdf
    folio hero update 1 --image ./another.png")]
    Hero {
        #[command(subcommand)]
        action: HeroCommands,
    },
    /// Manage about-me sections
    #[command(after_help = "EXAMPLES:
    folio about create -t \"Who I am\" -d \"...\"
    folio about list")]
    About {
        #[command(subcommand)]
        action: AboutCommands,
    },
    /// Sign in with email and password
    #[command(after_help = "EXAMPLES:
    folio login
    folio login --email me@example.com
    FOLIO_PASSWORD=... folio login --email me@example.com")]
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    folio completions bash > ~/.bash_completion.d/folio
    folio completions zsh > ~/.zfunc/_folio
    folio completions fish > ~/.config/fish/completions/folio.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects, newest first
    List,
    /// Show project details
    View { id: i64 },
    /// Create a project (uploads the logo first)
    Create(ProjectCreateArgs),
    /// Update a project; unspecified fields keep their current value
    Update(ProjectUpdateArgs),
    /// Delete a project
    Delete { id: i64 },
    /// Show project statistics
    Stats,
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    /// Project title
    #[arg(long, short)]
    pub title: Option<String>,

    /// Short description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Where the project was built or is based
    #[arg(long)]
    pub location: Option<String>,

    /// Public link to the project
    #[arg(long)]
    pub link: Option<String>,

    /// Application type (e.g. "Web App", "Mobile App")
    #[arg(long = "type")]
    pub application_type: Option<String>,

    /// Year of the project (1970 to this year)
    #[arg(long)]
    pub year: Option<String>,

    /// Tool or technology used (repeatable)
    #[arg(long = "tool", value_name = "TOOL")]
    pub tools: Vec<String>,

    /// Logo image to upload
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProjectUpdateArgs {
    pub id: i64,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub link: Option<String>,

    #[arg(long = "type")]
    pub application_type: Option<String>,

    #[arg(long)]
    pub year: Option<String>,

    /// Replace the tool list (repeatable)
    #[arg(long = "tool", value_name = "TOOL")]
    pub tools: Vec<String>,

    /// Upload a new logo
    #[arg(long, value_name = "PATH")]
    pub logo: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ServiceCommands {
    /// List services, newest first
    List,
    /// Show service details
    View { id: i64 },
    /// Create a service
    Create(ServiceCreateArgs),
    /// Update a service; unspecified fields keep their current value
    Update(ServiceUpdateArgs),
    /// Delete a service
    Delete { id: i64 },
}

#[derive(Args)]
pub struct ServiceCreateArgs {
    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,

    /// Role offered under this service (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,
}

#[derive(Args)]
pub struct ServiceUpdateArgs {
    pub id: i64,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,

    /// Replace the role list (repeatable)
    #[arg(long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,
}

#[derive(Subcommand)]
pub enum ExperienceCommands {
    /// List work experience, newest first
    List,
    /// Show experience details
    View { id: i64 },
    /// Add a work experience entry
    Create(ExperienceCreateArgs),
    /// Update an entry; unspecified fields keep their current value
    Update(ExperienceUpdateArgs),
    /// Delete an entry
    Delete { id: i64 },
}

#[derive(Args)]
pub struct ExperienceCreateArgs {
    /// Job title / role
    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    /// Start date (e.g. 2021-03-01)
    #[arg(long)]
    pub start: Option<String>,

    /// End date (e.g. 2023-06-30 or "Present")
    #[arg(long)]
    pub end: Option<String>,

    /// Job type (e.g. Full-time, Contract)
    #[arg(long = "type")]
    pub job_type: Option<String>,

    /// Responsibility (repeatable)
    #[arg(long = "responsibility", value_name = "TEXT")]
    pub responsibilities: Vec<String>,
}

#[derive(Args)]
pub struct ExperienceUpdateArgs {
    pub id: i64,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub start: Option<String>,

    #[arg(long)]
    pub end: Option<String>,

    #[arg(long = "type")]
    pub job_type: Option<String>,

    /// Replace the responsibility list (repeatable)
    #[arg(long = "responsibility", value_name = "TEXT")]
    pub responsibilities: Vec<String>,
}

#[derive(Subcommand)]
pub enum TestimonialCommands {
    /// List testimonials, newest first
    List,
    /// Show a testimonial
    View { id: i64 },
    /// Add a testimonial
    Create(TestimonialCreateArgs),
    /// Update a testimonial; unspecified fields keep their current value
    Update(TestimonialUpdateArgs),
    /// Delete a testimonial
    Delete { id: i64 },
}

#[derive(Args)]
pub struct TestimonialCreateArgs {
    /// Who gave the testimonial
    #[arg(long)]
    pub name: Option<String>,

    /// Their role or title
    #[arg(long)]
    pub role: Option<String>,

    /// Testimonial text
    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Args)]
pub struct TestimonialUpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub text: Option<String>,
}

#[derive(Subcommand)]
pub enum HeroCommands {
    /// List hero entries, newest first
    List,
    /// Show a hero entry
    View { id: i64 },
    /// Create a hero entry (uploads images and resume first)
    Create(HeroCreateArgs),
    /// Update a hero entry; new images are appended
    Update(HeroUpdateArgs),
    /// Delete a hero entry
    Delete { id: i64 },
}

#[derive(Args)]
pub struct HeroCreateArgs {
    /// Headline
    #[arg(long)]
    pub super_text: Option<String>,

    /// Text under the headline
    #[arg(long)]
    pub sub_text: Option<String>,

    /// Contact phone number (repeatable)
    #[arg(long = "phone", value_name = "PHONE")]
    pub phones: Vec<String>,

    /// Hero image to upload (repeatable)
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// Resume document to upload
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,
}

#[derive(Args)]
pub struct HeroUpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub super_text: Option<String>,

    #[arg(long)]
    pub sub_text: Option<String>,

    /// Replace the phone list (repeatable)
    #[arg(long = "phone", value_name = "PHONE")]
    pub phones: Vec<String>,

    /// Additional image to upload (repeatable)
    #[arg(long = "image", value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// Drop all stored image URLs before adding new ones
    #[arg(long)]
    pub clear_images: bool,

    /// Replacement resume to upload
    #[arg(long, value_name = "PATH")]
    pub resume: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum AboutCommands {
    /// List about-me sections, newest first
    List,
    /// Show a section
    View { id: i64 },
    /// Add a section
    Create(AboutCreateArgs),
    /// Update a section; unspecified fields keep their current value
    Update(AboutUpdateArgs),
    /// Delete a section
    Delete { id: i64 },
}

#[derive(Args)]
pub struct AboutCreateArgs {
    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,
}

#[derive(Args)]
pub struct AboutUpdateArgs {
    pub id: i64,

    #[arg(long, short)]
    pub title: Option<String>,

    #[arg(long, short)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_project_create() {
        let cli = Cli::try_parse_from([
            "folio", "project", "create", "-t", "Folio", "--type", "Web App", "--tool", "Rust",
            "--tool", "Svelte", "--logo", "logo.png",
        ])
        .unwrap();

        let Commands::Project {
            action: ProjectCommands::Create(args),
        } = cli.command
        else {
            panic!("expected project create");
        };
        assert_eq!(args.title.as_deref(), Some("Folio"));
        assert_eq!(args.application_type.as_deref(), Some("Web App"));
        assert_eq!(args.tools, vec!["Rust", "Svelte"]);
        assert!(args.description.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["folio", "testimonial", "delete", "4", "--yes", "--json"])
            .unwrap();
        assert!(cli.yes);
        assert!(matches!(cli.output_format(), OutputFormat::Json));
    }

    #[test]
    fn test_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["folio", "project", "view", "abc"]).is_err());
    }
}
