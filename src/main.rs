use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use gitlet::{ops, Error, Repo};

#[derive(Parser)]
#[command(name = "gitlet", version, about = "a self-contained version-control tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// create a new, empty repository in the current directory
    Init,
    /// stage a file for the next commit
    Add { file: String },
    /// record a new commit from the current staging area
    Commit { message: String },
    /// stage a file for removal
    Rm { file: String },
    /// print the commit history from HEAD
    Log,
    /// print every commit ever made, across all branches
    #[command(name = "global-log")]
    GlobalLog,
    /// print the ids of every commit with the given message
    Find { message: String },
    /// print branches, staged/removed files, and working-tree differences
    Status,
    /// restore a file from HEAD, a given commit, or switch branches entirely
    Checkout {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// create a new branch pointing at HEAD
    Branch { name: String },
    /// delete a branch
    #[command(name = "rm-branch")]
    RmBranch { name: String },
    /// move the current branch to a given commit, restoring its snapshot
    Reset { commit: String },
    /// merge another branch into the current one
    Merge { branch: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cwd = match std::env::current_dir() {
        Ok(p) => p,
        Err(e) => {
            println!("io error: {e}");
            return ExitCode::SUCCESS;
        }
    };

    // every failure here, parse or domain, prints its message and still
    // exits 0: this tool never signals failure through the process exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            print!("{e}");
            return ExitCode::SUCCESS;
        }
    };

    match run(cli, cwd) {
        Ok(message) => {
            if !message.is_empty() {
                print!("{message}");
            }
        }
        Err(e) => println!("{e}"),
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli, cwd: PathBuf) -> Result<String, Error> {
    let command = cli.command.ok_or(Error::NoCommand)?;

    match command {
        Command::Init => {
            Repo::init(&cwd)?;
            Ok(String::new())
        }
        Command::Add { file } => {
            let repo = Repo::open(&cwd)?;
            ops::add(&repo, &file)?;
            Ok(String::new())
        }
        Command::Commit { message } => {
            let repo = Repo::open(&cwd)?;
            ops::commit(&repo, &message)?;
            Ok(String::new())
        }
        Command::Rm { file } => {
            let repo = Repo::open(&cwd)?;
            ops::rm(&repo, &file)?;
            Ok(String::new())
        }
        Command::Log => {
            let repo = Repo::open(&cwd)?;
            ops::log(&repo)
        }
        Command::GlobalLog => {
            let repo = Repo::open(&cwd)?;
            ops::global_log(&repo)
        }
        Command::Find { message } => {
            let repo = Repo::open(&cwd)?;
            ops::find(&repo, &message)
        }
        Command::Status => {
            let repo = Repo::open(&cwd)?;
            ops::status(&repo)
        }
        Command::Checkout { args } => {
            let repo = Repo::open(&cwd)?;
            dispatch_checkout(&repo, &args)?;
            Ok(String::new())
        }
        Command::Branch { name } => {
            let repo = Repo::open(&cwd)?;
            ops::branch(&repo, &name)?;
            Ok(String::new())
        }
        Command::RmBranch { name } => {
            let repo = Repo::open(&cwd)?;
            ops::rm_branch(&repo, &name)?;
            Ok(String::new())
        }
        Command::Reset { commit } => {
            let repo = Repo::open(&cwd)?;
            ops::reset(&repo, &commit)?;
            Ok(String::new())
        }
        Command::Merge { branch } => {
            let repo = Repo::open(&cwd)?;
            ops::merge(&repo, &branch)
        }
    }
}

/// the three `checkout` forms collapse to one clap arg slot, so they're
/// disambiguated here: `-- <file>`, `<commit> -- <file>`, or `<branch>`.
fn dispatch_checkout(repo: &Repo, args: &[String]) -> Result<(), Error> {
    match args {
        [dash, file] if dash == "--" => ops::checkout_head_file(repo, file),
        [commit, dash, file] if dash == "--" => ops::checkout_commit_file(repo, commit, file),
        [branch] => ops::checkout_branch(repo, branch),
        _ => Err(Error::BadOperands),
    }
}
