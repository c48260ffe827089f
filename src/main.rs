use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    about = "A tiny single-user version-control system",
    long_about = "A tiny single-user version-control system: a content-addressable \
    object store, an immutable commit graph, a staging area, branches, and a \
    three-way merge, all kept under a .gitlet directory.",
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
        about = "Initialize a new repository in the current directory"
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or mark it for removal")]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: String,
    },
    #[command(name = "log", about = "Show the current branch's first-parent history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of all commits with a given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message to look for")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and drift")]
    Status,
    #[command(
        name = "checkout",
        about = "Check out a branch, or restore a file from a commit",
        long_about = "Three forms: `checkout <branch>` switches branches, \
        `checkout -- <file>` restores a file from the current commit, and \
        `checkout <commitId> -- <file>` restores it from an arbitrary commit."
    )]
    Checkout {
        #[arg(
            index = 1,
            num_args = 1..=3,
            allow_hyphen_values = true,
            help = "A branch name, `-- <file>`, or `<commitId> -- <file>`"
        )]
        args: Vec<String>,
    },
    #[command(name = "branch", about = "Create a new branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Move the current branch to a commit and check it out"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id, abbreviations allowed")]
        commit_id: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1, help = "The branch to merge in")]
        branch: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(error) = run(cli) {
        // contract failures go to stdout, one line, exit code 1
        println!("{error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let pwd = pwd.to_string_lossy();

    if let Commands::Init = cli.command {
        let mut repository = Repository::init_at(&pwd, Box::new(std::io::stdout()))?;
        return repository.init();
    }

    let mut repository = Repository::open(&pwd, Box::new(std::io::stdout()))?;

    match &cli.command {
        Commands::Init => unreachable!(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { args } => {
            // clap swallows the first `--`, which checkout needs verbatim to
            // tell the branch form from the file forms; rebuild the literal
            // operand list from argv (binary name, then the subcommand)
            tracing::debug!(?args, "checkout operands after clap");
            let operands = std::env::args().skip(2).collect::<Vec<_>>();
            repository.checkout(&operands)
        }
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit_id } => repository.reset(commit_id),
        Commands::Merge { branch } => repository.merge(branch),
    }
}
