mod cli;
mod client;
mod commands;
mod config;
mod error;
mod logging;
mod output;
mod render;
mod screen;
mod session;
#[cfg(test)]
mod testing;
mod types;
mod upload;

use std::error::Error;
use std::io;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use client::SupabaseClient;
use commands::Context;
use config::Config;
use error::{FolioError, Result};
use session::Session;
use types::{Project, Service, Testimonial, WorkExperience};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    logging::init(verbose);

    if let Err(e) = run(cli).await {
        // Already shown as a notification
        if !matches!(e, FolioError::Reported(_)) {
            eprintln!("{}", output::error_line(&format!("Error: {e}")));

            if verbose {
                let mut source = e.source();
                while let Some(cause) = source {
                    eprintln!("Caused by: {cause}");
                    source = cause.source();
                }
            }
        }

        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    output::set_format(cli.output_format());
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "folio", &mut io::stdout());
            Ok(())
        }
        Commands::Init => commands::init::run().await,
        Commands::Logout => commands::auth::logout(),
        command => {
            let config = Config::load()?;
            let token = std::env::var("FOLIO_ACCESS_TOKEN")
                .ok()
                .or_else(|| Session::load().map(|s| s.access_token));
            if token.is_none() {
                tracing::info!("no session; requests use the anon key");
            }

            let client = SupabaseClient::new(config.url()?, config.anon_key()?, token);
            let ctx = Context::new(&client, config.buckets.clone(), cli.yes);

            match command {
                Commands::Login { email } => commands::auth::login(&client, email).await,
                Commands::Project { action } => commands::projects::run(&ctx, action).await,
                Commands::Projects => commands::list::<_, Project>(&ctx).await,
                Commands::Service { action } => commands::services::run(&ctx, action).await,
                Commands::Services => commands::list::<_, Service>(&ctx).await,
                Commands::Experience { action } => {
                    commands::experiences::run(&ctx, action).await
                }
                Commands::Experiences => commands::list::<_, WorkExperience>(&ctx).await,
                Commands::Testimonial { action } => {
                    commands::testimonials::run(&ctx, action).await
                }
                Commands::Testimonials => commands::list::<_, Testimonial>(&ctx).await,
                Commands::Hero { action } => commands::hero::run(&ctx, action).await,
                Commands::About { action } => commands::about::run(&ctx, action).await,
                Commands::Completions { .. } | Commands::Init | Commands::Logout => {
                    // Already handled above
                    Ok(())
                }
            }
        }
    }
}
