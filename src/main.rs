use clap::{Parser, Subcommand};
use m44rten_site::{generate, serve};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "m44rten-site")]
#[command(about = "Static site pipeline and terminal edge responder for m44rten.com")]
#[command(long_about = "\
Static site pipeline and terminal edge responder for m44rten.com

  build   Convert markdown posts into HTML pages plus an index.
          Posts are *.md files with YAML front-matter (title, date,
          optional description); sibling files are copied as assets.

  serve   Answer `GET /` from terminal clients (curl, wget, …) with an
          ANSI profile card; proxy everything else to the origin.

Try it:  curl https://m44rten.com")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert markdown posts into HTML pages plus an index
    Build {
        /// Directory of markdown posts and sibling assets
        #[arg(long, default_value = "posts")]
        posts: PathBuf,
        /// Output directory for the generated pages
        #[arg(long, default_value = "blog")]
        output: PathBuf,
        /// HTML shell containing the literal {{TITLE}}, {{META_DESCRIPTION}},
        /// {{BACK_LINK}}, {{BACK_TEXT}} and {{CONTENT}} tokens
        #[arg(long, default_value = "blog-template.html")]
        template: PathBuf,
    },
    /// Serve the profile card to terminal clients, proxy the rest
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8787")]
        listen: String,
        /// Origin that non-card traffic passes through to
        #[arg(long, default_value = "https://m44rten.com")]
        origin: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            posts,
            output,
            template,
        } => generate::build(&posts, &output, &template)?,
        Command::Serve { listen, origin } => serve::serve(&listen, &origin)?,
    }

    Ok(())
}
