use clap::{Parser, Subcommand};

use std::{
    io::{self, BufRead},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use inotebook::{
    client::{ApiClient, ClientError, FileTokenStore, NoteStore},
    dto::Note,
};

/// Manage your notes from the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Base URL of the notes API
    #[arg(long, env = "INOTEBOOK_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Directory holding the stored auth-token
    #[arg(long, env = "INOTEBOOK_TOKEN_DIR")]
    token_dir: Option<PathBuf>,

    /// Request timeout in seconds, none by default
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store an issued auth-token, read from stdin unless given
    Login {
        #[arg(long, env = "INOTEBOOK_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// Forget the stored auth-token
    Logout,
    /// List all notes
    List,
    /// Create a note
    Add {
        title: String,
        description: String,
        #[arg(long, default_value = "")]
        tag: String,
    },
    /// Change a note; omitted fields keep their value
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        tag: Option<String>,
    },
    /// Delete a note
    Delete { id: String },
}

fn print_note(note: &Note) {
    println!(
        "{}  [{}]  {}  ({})\n    {}",
        note.id,
        note.tag,
        note.title,
        note.created_at.format("%Y-%m-%d %H:%M"),
        note.description
    );
}

/// Takes the token from the flag or env, else the first line of `input`.
fn read_token(token: Option<String>, mut input: impl BufRead) -> io::Result<String> {
    let token = match token {
        Some(token) => token,
        None => {
            let mut line = String::new();
            input.read_line(&mut line)?;
            line
        }
    };

    let token = token.trim();
    if token.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no auth-token given on --token, INOTEBOOK_TOKEN or stdin",
        ));
    }
    Ok(token.to_string())
}

fn open_store(
    base_url: &str,
    timeout: Option<u64>,
    tokens: FileTokenStore,
) -> Result<NoteStore<FileTokenStore>, ClientError> {
    let api = ApiClient::new(base_url, timeout.map(Duration::from_secs))?;
    Ok(NoteStore::new(api, tokens))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let tokens = match cli.token_dir {
        Some(dir) => FileTokenStore::new(dir),
        None => FileTokenStore::default_location()?,
    };

    match cli.command {
        Command::Login { token } => {
            let token = read_token(token, io::stdin().lock())?;
            tokens.save(&token)?;
            println!("Token stored in {}", tokens.path().display());
        }
        Command::Logout => {
            tokens.clear()?;
            println!("Token removed from {}", tokens.dir().display());
        }
        Command::List => {
            let mut store = open_store(&cli.base_url, cli.timeout, tokens)?;
            let notes = store.fetch_all().await?;
            if notes.is_empty() {
                println!("No notes yet.");
            }
            notes.iter().for_each(print_note);
        }
        Command::Add {
            title,
            description,
            tag,
        } => {
            let mut store = open_store(&cli.base_url, cli.timeout, tokens)?;
            let note = store.add(&title, &description, &tag).await?;
            print_note(note);
        }
        Command::Edit {
            id,
            title,
            description,
            tag,
        } => {
            let mut store = open_store(&cli.base_url, cli.timeout, tokens)?;
            store.fetch_all().await?;
            let current = store
                .get(&id)
                .cloned()
                .ok_or_else(|| format!("no note with id {id}"))?;

            store
                .edit(
                    &id,
                    title.as_deref().unwrap_or(&current.title),
                    description.as_deref().unwrap_or(&current.description),
                    tag.as_deref().unwrap_or(&current.tag),
                )
                .await?;

            if let Some(note) = store.get(&id) {
                print_note(note);
            }
        }
        Command::Delete { id } => {
            let mut store = open_store(&cli.base_url, cli.timeout, tokens)?;
            store.delete(&id).await?;
            println!("Deleted {id}");
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_token_wins_over_stdin() {
        let token = read_token(Some(" abc ".to_string()), &b"from-stdin\n"[..]).unwrap();
        assert_eq!(token, "abc");
    }

    #[test]
    fn token_is_read_from_stdin() {
        let token = read_token(None, &b"from-stdin\nignored\n"[..]).unwrap();
        assert_eq!(token, "from-stdin");
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = read_token(None, &b"\n"[..]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
