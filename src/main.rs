use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use vcs::areas::repository::Repository;
use vcs::artifacts::diff::tree_diff::DiffFilter;
use vcs::commands::plumbing::cat_file::CatFileMode;
use vcs::commands::porcelain::diff::DiffOptions;
use vcs::commands::porcelain::log::LogOptions;

#[derive(Parser)]
#[command(
    name = "vcs",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "Stores file snapshots as content-addressed objects, stages changes \
    in an index, records them as commits on named branches and compares any two states.",
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
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Compute the blob id of a file and optionally store it",
        long_about = "This command hashes a file as a blob and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content or the kind of an object",
        long_about = "This command prints an object from the repository. \
        Exactly one of -p and -t must be given."
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object's content", conflicts_with = "kind")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's kind")]
        kind: bool,
        #[arg(index = 1, help = "Object id, branch or revision expression")]
        object: String,
    },
    #[command(
        name = "write-tree",
        about = "Create a tree object from the staging index"
    )]
    WriteTree,
    #[command(name = "ls-tree", about = "List the entries of a tree object")]
    LsTree {
        #[arg(short = 'r', help = "Recurse into subtrees")]
        recursive: bool,
        #[arg(index = 1, help = "Tree, commit or revision expression")]
        object: String,
    },
    #[command(
        name = "commit-tree",
        about = "Create a commit for an existing tree",
        long_about = "This command creates a commit object pointing at the given tree \
        and advances the current branch to it."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree object")]
        tree: String,
        #[arg(short = 'p', help = "The parent commit")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "add", about = "Add file contents to the index")]
    Add {
        #[arg(required = true, help = "Files or directories to stage")]
        paths: Vec<PathBuf>,
    },
    #[command(name = "rm", about = "Remove paths from the index")]
    Rm {
        #[arg(required = true, help = "Files or directories to unstage")]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit in the repository with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status {
        #[arg(long, help = "Give the output in a short, machine-readable format")]
        porcelain: bool,
    },
    #[command(
        name = "diff",
        about = "Show changes between the working tree, the index and commits",
        long_about = "Without revisions, compares the working tree with the tracked files; \
        with --cached, compares the index with the last commit; \
        with two revisions, compares them."
    )]
    Diff {
        #[arg(long, help = "Compare the index with the last commit")]
        cached: bool,
        #[arg(long, value_parser = parse_diff_filter, help = "Only show changes of the given kinds (A, D, M)")]
        diff_filter: Option<DiffFilter>,
        #[arg(long, help = "Only show the status letter and path of each change")]
        name_status: bool,
        #[arg(num_args = 0..=2, help = "Revisions to compare")]
        revisions: Vec<String>,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(short = 'n', long = "max-count", help = "Limit the number of commits shown")]
        max_count: Option<usize>,
        #[arg(long, help = "Show each commit on a single line")]
        oneline: bool,
        #[arg(index = 1, help = "Revision to start from (defaults to HEAD)")]
        revision: Option<String>,
    },
    #[command(
        name = "branch",
        about = "List branches or create a new one",
        long_about = "Without a name, lists all branches and marks the current one. \
        With a name, creates a branch at the current commit."
    )]
    Branch {
        #[arg(index = 1, help = "The name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "switch", about = "Make another branch the current one")]
    Switch {
        #[arg(index = 1, help = "The branch to switch to")]
        name: String,
    },
}

fn parse_diff_filter(s: &str) -> std::result::Result<DiffFilter, String> {
    DiffFilter::try_parse(s).ok_or_else(|| format!("invalid diff filter '{s}', expected letters from A, D, M"))
}

/// Diagnostics go to stderr; `VCS_LOG` takes the usual filter directives
fn init_tracing() {
    let filter = EnvFilter::try_from_env("VCS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn open_repository(path: Option<&PathBuf>) -> Result<Repository> {
    let path = match path {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    Repository::new(path, Box::new(std::io::stdout()))
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => open_repository(path.as_ref())?.init()?,
        Commands::HashObject { write, file } => open_repository(None)?.hash_object(file, *write)?,
        Commands::CatFile { pretty, kind, object } => {
            let mode = match (pretty, kind) {
                (_, true) => CatFileMode::Type,
                (true, false) => CatFileMode::Pretty,
                (false, false) => anyhow::bail!("one of -p or -t is required"),
            };

            open_repository(None)?.cat_file(object, mode)?
        }
        Commands::WriteTree => open_repository(None)?.write_tree_command()?,
        Commands::LsTree { recursive, object } => {
            open_repository(None)?.ls_tree(object, *recursive)?
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => open_repository(None)?.commit_tree(tree, parent.as_deref(), message)?,
        Commands::Add { paths } => open_repository(None)?.add_paths(paths)?,
        Commands::Rm { paths } => open_repository(None)?.remove_paths(paths)?,
        Commands::Commit { message } => open_repository(None)?.commit_command(message)?,
        Commands::Status { porcelain } => open_repository(None)?.status(*porcelain)?,
        Commands::Diff {
            cached,
            diff_filter,
            name_status,
            revisions,
        } => {
            let opts = DiffOptions {
                cached: *cached,
                filter: *diff_filter,
                name_status: *name_status,
                revisions: revisions.clone(),
            };

            open_repository(None)?.diff(&opts)?
        }
        Commands::Log {
            max_count,
            oneline,
            revision,
        } => {
            let opts = LogOptions {
                start: revision.clone(),
                max_count: *max_count,
                oneline: *oneline,
            };

            open_repository(None)?.log(&opts)?
        }
        Commands::Branch { name } => open_repository(None)?.branch(name.as_deref())?,
        Commands::Switch { name } => open_repository(None)?.switch(name)?,
    }

    Ok(())
}
