use clap::{Parser, Subcommand};
use perfdiag::Result;
use perfdiag::app::{self, WebOptions};
use perfdiag::config::{DiagConfig, WebOverrides};
use perfdiag::diagnostics;
use perfdiag::render::COMMAND_WIDTH;
use perfdiag::source::{MysqlSource, PsSampler};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "perfdiag")]
#[command(about = "Find resource-hungry processes and slow PHP/MySQL work", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print running processes sorted by CPU usage, then by memory usage.
    Processes,

    /// Diagnose PHP/MySQL performance issues.
    Web {
        /// Path to Apache access log.
        #[arg(long)]
        log: Option<PathBuf>,

        /// MySQL username.
        #[arg(long)]
        mysql_user: Option<String>,

        /// MySQL password.
        #[arg(long)]
        mysql_password: Option<String>,

        /// Only count URLs containing this text (default: index.php).
        #[arg(long = "match", value_name = "SUBSTRING", conflicts_with = "all_urls")]
        url_match: Option<String>,

        /// Count every URL in the log.
        #[arg(long)]
        all_urls: bool,

        /// Number of URLs to report.
        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        mysql_host: Option<String>,

        #[arg(long)]
        mysql_port: Option<u16>,

        /// JSON settings file; flags override it.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    diagnostics::init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.cmd {
        Commands::Processes => {
            app::run_processes(&PsSampler, COMMAND_WIDTH, &mut out)?;
        }
        Commands::Web {
            log,
            mysql_user,
            mysql_password,
            url_match,
            all_urls,
            top,
            mysql_host,
            mysql_port,
            config,
        } => {
            // 1) Settings: defaults, then the file, then flags.
            let mut cfg = match config {
                Some(path) => match DiagConfig::load(&path) {
                    Ok(cfg) => cfg,
                    Err(err) => {
                        diagnostics::report_failure(&mut out, "Error", &err)?;
                        return Ok(());
                    }
                },
                None => DiagConfig::default(),
            };
            cfg.apply_overrides(WebOverrides {
                url_match,
                all_urls,
                top,
                mysql_host,
                mysql_port,
            });

            // 2) Run whatever was asked for.
            let opts = WebOptions {
                log,
                mysql_user,
                mysql_password,
            };
            app::run_web(&opts, &cfg, MysqlSource::connect, &mut out)?;
        }
    }

    Ok(())
}
