#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use shiftweek::{
    config::{export_config_json, load_config_from_file, Config},
    io,
    preferences::{CsvSource, DemoSource, InteractiveSource, PreferenceSource, Roster},
    report::{ConsoleRenderer, Report, ScheduleRenderer},
    scheduler::{schedule_week, FallbackPolicy, SeededPicker},
};
use std::path::PathBuf;
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planification hebdomadaire des shifts
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de configuration (règles, graine, libellés)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Planifier la semaine et exporter le résultat
    Run {
        /// Saisir les employés et préférences au clavier
        #[arg(long, conflicts_with = "preferences")]
        interactive: bool,
        /// CSV `employee,day,shift`
        #[arg(long)]
        preferences: Option<PathBuf>,
        #[arg(long, default_value = "docs")]
        out_dir: PathBuf,
        /// N'écrire aucun fichier
        #[arg(long)]
        no_export: bool,
        /// Écrire aussi schedule.json
        #[arg(long)]
        json: bool,
        /// Code 2 si des shifts restent sous le minimum
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        min_per_shift: Option<usize>,
        #[arg(long)]
        max_days: Option<u32>,
        #[arg(long)]
        shift_cap: Option<usize>,
        /// Pas de repli sur un autre shift quand la préférence est pleine
        #[arg(long)]
        no_fallback: bool,
        /// Date du premier jour (YYYY-MM-DD), affichée dans les rapports
        #[arg(long)]
        week_start: Option<NaiveDate>,
    },

    /// Écrire la configuration par défaut
    InitConfig {
        #[arg(long, default_value = "shiftweek.json")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init();
    }

    let mut config = match &cli.config {
        Some(path) => load_config_from_file(path)?,
        None => Config::default(),
    };

    let code = match cli.cmd {
        Commands::InitConfig { out } => {
            export_config_json(&out, &config)?;
            println!("Configuration written to {}", out.display());
            0
        }
        Commands::Run {
            interactive,
            preferences,
            out_dir,
            no_export,
            json,
            strict,
            seed,
            min_per_shift,
            max_days,
            shift_cap,
            no_fallback,
            week_start,
        } => {
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(min) = min_per_shift {
                config.rules.min_per_shift = min;
            }
            if let Some(max) = max_days {
                config.rules.max_days_per_employee = max;
            }
            if let Some(cap) = shift_cap {
                config.rules.shift_cap = cap;
            }
            if no_fallback {
                config.rules.fallback = FallbackPolicy::Disabled;
            }
            if week_start.is_some() {
                config.week_start = week_start;
            }
            config.validate()?;

            let calendar = config.calendar();
            let mut picker = SeededPicker::new(config.seed);

            let roster: Roster = if let Some(path) = preferences {
                CsvSource::new(&path)
                    .collect(&calendar)
                    .with_context(|| format!("importing preferences {}", path.display()))?
            } else if interactive {
                let stdin = std::io::stdin();
                InteractiveSource::new(stdin.lock(), std::io::stdout(), &mut picker)
                    .collect(&calendar)?
            } else {
                DemoSource::new(&mut picker).collect(&calendar)?
            };

            let outcome = schedule_week(
                &calendar,
                config.rules,
                &roster.employees,
                &roster.preferences,
                &mut picker,
            );
            let report = Report::new(&config, &calendar, &outcome);
            print!("\n{}", ConsoleRenderer.render(&report));

            if !no_export {
                let mut written = vec![
                    out_dir.join("schedule.csv"),
                    out_dir.join("summary.csv"),
                    out_dir.join("schedule.md"),
                ];
                io::export_schedule_csv(&written[0], &calendar, &outcome)?;
                io::export_summary_csv(&written[1], &outcome)?;
                io::export_markdown(&written[2], &report)?;
                if json {
                    let path = out_dir.join("schedule.json");
                    io::export_outcome_json(&path, &calendar, &outcome)?;
                    written.push(path);
                }
                println!("\nFiles written:");
                for path in &written {
                    println!(" - {}", path.display());
                }
            }

            if strict && !outcome.is_fully_staffed() {
                // Code 2 = WARNING/INCOMPLETE
                2
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}
