use anyhow::Result;
use clap::{Parser, Subcommand};
use twig::areas::repository::Repository;
use twig::artifacts::merge::merge_outcome::MergeOutcome;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    about = "A minimal version control system",
    long_about = "twig keeps content-addressed snapshots of a directory, \
    with branches, three-way merges and conflict staging.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage files for the next commit")]
    Add {
        #[arg(index = 1, required = true, help = "Files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(name = "rm", about = "Stop tracking files and delete them")]
    Rm {
        #[arg(index = 1, required = true, help = "Tracked files or directories")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the staged changes as a new commit. \
        While a merge is in progress it completes the merge once every conflict is resolved."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "branch",
        about = "Create, delete or list branches",
        long_about = "Without arguments this lists the branches, marking the current one. \
        With a name it creates a branch at the current commit."
    )]
    Branch {
        #[arg(index = 1, help = "The branch to create")]
        name: Option<String>,
        #[arg(short, long, conflicts_with = "name", help = "The branch to delete")]
        delete: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch or a commit",
        long_about = "The target is a branch name or a full or abbreviated commit id; \
        a commit id detaches HEAD."
    )]
    Checkout {
        #[arg(index = 1)]
        target: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "log", about = "Show the history of the current commit")]
    Log,
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "ancestors", about = "List the ids of HEAD and its ancestors")]
    Ancestors,
    #[command(name = "ls-index", about = "Dump the raw index entries")]
    LsIndex,
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw content of an object in the repository. \
        The object id may be abbreviated."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id to print")]
        oid: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let pwd = std::env::current_dir()?;

    if let Commands::Init { path } = &cli.command {
        let path = path.as_ref().map(std::path::PathBuf::from).unwrap_or(pwd);
        let mut repository = Repository::new(path, Box::new(std::io::stdout()))?;

        return repository.init().await;
    }

    let mut repository = Repository::discover(&pwd, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init { .. } => {}
        Commands::Add { paths } => repository.add(paths).await?,
        Commands::Rm { paths } => repository.rm(paths).await?,
        Commands::Commit { message } => {
            repository.commit(message).await?;
        }
        Commands::Branch { name, delete } => match (name, delete) {
            (_, Some(branch)) => repository.delete_branch(branch).await?,
            (Some(branch), None) => repository.branch(branch).await?,
            (None, None) => repository.list_branches().await?,
        },
        Commands::Checkout { target } => repository.checkout(target).await?,
        Commands::Merge { branch } => {
            if let MergeOutcome::Conflicted(_) = repository.merge(branch).await? {
                std::process::exit(1);
            }
        }
        Commands::Log => repository.log().await?,
        Commands::Status => {
            repository.status().await?;
        }
        Commands::Ancestors => repository.ancestors().await?,
        Commands::LsIndex => repository.ls_index().await?,
        Commands::CatFile { oid } => repository.cat_file(oid).await?,
        Commands::HashObject { write, file } => repository.hash_object(file, *write).await?,
    }

    Ok(())
}
