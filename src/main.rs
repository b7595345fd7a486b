// contestlog command line
//
// Each command opens the database from the config file, loads the session's
// contacts, runs one engine operation and writes the changes back.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use contestlog::cabrillo::TextEncoding;
use contestlog::config::AppConfig;
use contestlog::contact::ContactDraft;
use contestlog::contest::registry::contest_names;
use contestlog::db;
use contestlog::engine::{new_session, Logbook};
use contestlog::reference::GeographyResolver;
use contestlog::session::SessionConfig;
use contestlog::store::MemoryLogStore;
use sqlx::{Pool, Sqlite};

#[derive(Parser, Debug)]
#[command(name = "contestlog", version)]
#[command(about = "Contest logging and scoring")]
struct Cli {
    /// Session to work on; defaults to the newest one
    #[arg(long, global = true)]
    session: Option<i64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List supported contests
    Contests,
    /// List stored sessions
    Sessions,
    /// Start a session for a contest
    NewSession {
        #[arg(long)]
        contest: String,
        /// Exchange this station sends, e.g. "A 99 ORG"
        #[arg(long)]
        sent_exchange: Option<String>,
        /// Session config JSON (categories, soapbox, start time)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Log one contact
    Log(LogArgs),
    /// Print the running score
    Score,
    /// Rescore every contact in time order
    Recalc,
    /// Write the Cabrillo submission file
    Cabrillo {
        #[arg(long, value_parser = parse_encoding)]
        encoding: Option<TextEncoding>,
        /// Output directory; defaults to output_dir from the config
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the log as ADIF
    Adif {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Log every record of an ADIF file, then recalculate
    ImportAdif {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct LogArgs {
    #[arg(long)]
    call: String,
    /// kHz
    #[arg(long)]
    freq: String,
    /// Band label when the frequency is not known exactly
    #[arg(long, default_value = "")]
    band: String,
    #[arg(long, default_value = "")]
    mode: String,
    #[arg(long, default_value = "")]
    rst_sent: String,
    #[arg(long, default_value = "")]
    rst_rcvd: String,
    /// Sent serial; filled in automatically for serial-number contests
    #[arg(long, default_value = "")]
    sent_nr: String,
    /// Received serial or number
    #[arg(long, default_value = "")]
    rcv_nr: String,
    /// Received contest-specific field (DOK, state, prefecture...)
    #[arg(long, default_value = "")]
    rcvd_exchange: String,
    #[arg(long, default_value = "")]
    sect: String,
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    zone: String,
    /// Sweepstakes precedence
    #[arg(long, default_value = "")]
    prec: String,
    /// Sweepstakes check
    #[arg(long, default_value = "")]
    ck: String,
    #[arg(long, default_value = "")]
    comment: String,
}

impl LogArgs {
    fn draft(self) -> ContactDraft {
        ContactDraft {
            call: self.call,
            freq: self.freq,
            band: self.band,
            mode: self.mode,
            rst_sent: self.rst_sent,
            rst_rcvd: self.rst_rcvd,
            sent_nr: self.sent_nr,
            rcv_nr: self.rcv_nr,
            exchange1: self.rcvd_exchange,
            sect: self.sect,
            name: self.name,
            zone: self.zone,
            prec: self.prec,
            ck: self.ck,
            comment: self.comment,
            ..Default::default()
        }
    }
}

fn parse_encoding(name: &str) -> Result<TextEncoding, String> {
    TextEncoding::parse(name).ok_or_else(|| format!("unknown encoding {name} (utf8, ascii, latin1)"))
}

type Book = Logbook<MemoryLogStore, Box<dyn GeographyResolver>>;

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

async fn open_book(pool: &Pool<Sqlite>, config: &AppConfig, session: Option<i64>) -> Result<Book, String> {
    let session = match session {
        Some(id) => db::load_session(pool, id).await.map_err(|e| e.to_string())?,
        None => db::latest_session(pool)
            .await
            .map_err(|e| e.to_string())?
            .ok_or("no contest session; run new-session first")?,
    };
    let store = db::load_store(pool, session.id).await.map_err(|e| e.to_string())?;
    let resolver = config.resolver().map_err(|e| e.to_string())?;
    Logbook::open(store, resolver, session, config.station.clone()).map_err(|e| e.to_string())
}

async fn save_book(pool: &Pool<Sqlite>, book: &mut Book) -> Result<(), String> {
    db::flush_store(pool, book.store_mut())
        .await
        .map(|_| ())
        .map_err(|e| e.to_string())
}

async fn run(cli: Cli) -> Result<(), String> {
    if let Command::Contests = cli.command {
        for name in contest_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    let pool = db::init_db(&config.database).await.map_err(|e| e.to_string())?;

    match cli.command {
        Command::Contests => {}
        Command::Sessions => {
            for session in db::list_sessions(&pool).await.map_err(|e| e.to_string())? {
                println!("{:>4}  {}", session.id, session.contest);
            }
            let stats = db::get_db_stats(&pool).await.map_err(|e| e.to_string())?;
            println!("{} sessions, {} contacts", stats.session_count, stats.contact_count);
        }
        Command::NewSession {
            contest,
            sent_exchange,
            config: session_file,
        } => {
            let mut session_config = match session_file {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .map_err(|e| format!("failed reading {}: {e}", path.display()))?;
                    serde_json::from_str(&raw)
                        .map_err(|e| format!("invalid session config {}: {e}", path.display()))?
                }
                None => SessionConfig {
                    start: chrono::Utc::now(),
                    ..Default::default()
                },
            };
            if let Some(exchange) = sent_exchange {
                session_config.sent_exchange = exchange;
            }
            let draft = new_session(0, &contest, session_config).map_err(|e| e.to_string())?;
            let session = db::insert_session(&pool, &draft).await.map_err(|e| e.to_string())?;
            println!("session {} ({})", session.id, session.contest);
        }
        Command::Log(args) => {
            let mut book = open_book(&pool, &config, cli.session).await?;
            let outcome = book.log_contact(&args.draft()).map_err(|e| e.to_string())?;
            save_book(&pool, &mut book).await?;
            print_json(&outcome)?;
        }
        Command::Score => {
            let book = open_book(&pool, &config, cli.session).await?;
            let score = book.running_score().map_err(|e| e.to_string())?;
            print_json(&score)?;
        }
        Command::Recalc => {
            let mut book = open_book(&pool, &config, cli.session).await?;
            let cancel = Arc::new(AtomicBool::new(false));
            let flag = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    log::warn!("Interrupted, stopping recalculation");
                    flag.store(true, Ordering::Relaxed);
                }
            });
            let report = book.recalculate(&cancel).map_err(|e| e.to_string())?;
            save_book(&pool, &mut book).await?;
            print_json(&report)?;
        }
        Command::Cabrillo { encoding, out } => {
            let book = open_book(&pool, &config, cli.session).await?;
            let dir = out.unwrap_or_else(|| config.output_dir.clone());
            let (path, output) = book
                .write_cabrillo_file(&dir, encoding.unwrap_or(config.encoding))
                .map_err(|e| e.to_string())?;
            println!("wrote {} ({} skipped)", path.display(), output.skipped.len());
        }
        Command::Adif { out } => {
            let book = open_book(&pool, &config, cli.session).await?;
            let dir = out.unwrap_or_else(|| config.output_dir.clone());
            let (path, output) = book.write_adif_file(&dir).map_err(|e| e.to_string())?;
            println!("wrote {} ({} skipped)", path.display(), output.skipped.len());
        }
        Command::ImportAdif { file } => {
            let mut book = open_book(&pool, &config, cli.session).await?;
            let content = std::fs::read_to_string(&file)
                .map_err(|e| format!("failed reading {}: {e}", file.display()))?;
            let report = book.import_adif(&content).map_err(|e| e.to_string())?;
            save_book(&pool, &mut book).await?;
            print_json(&report)?;
        }
    }

    pool.close().await;
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("contestlog=info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        log::error!("{}", e);
        eprintln!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_arguments() {
        let cli = Cli::try_parse_from([
            "contestlog", "--session", "3", "log", "--call", "W1AW", "--freq", "7025", "--rcv-nr", "12",
            "--prec", "A", "--ck", "72", "--sect", "CT",
        ])
        .unwrap();
        assert_eq!(cli.session, Some(3));
        let Command::Log(args) = cli.command else {
            panic!("expected log");
        };
        let draft = args.draft();
        assert_eq!((draft.prec.as_str(), draft.ck.as_str(), draft.sect.as_str()), ("A", "72", "CT"));
        assert_eq!(draft.rcv_nr, "12");
        assert!(draft.sent_nr.is_empty());
    }

    #[test]
    fn test_typed_values_are_checked() {
        assert!(Cli::try_parse_from(["contestlog", "--session", "x", "score"]).is_err());
        assert!(Cli::try_parse_from(["contestlog", "cabrillo", "--encoding", "ebcdic"]).is_err());
        let cli = Cli::try_parse_from(["contestlog", "cabrillo", "--encoding", "latin-1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Cabrillo {
                encoding: Some(TextEncoding::Latin1),
                ..
            }
        ));
    }
}
