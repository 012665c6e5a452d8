use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mataan::config::{load_config, load_config_auto, TrackerConfig};
use mataan::defaults::ensure_config;
use mataan::export::export_summary;
use mataan::logging;
use mataan::session::{parse_leading_int, Session, TableId, PLAYER_COUNT, ROUNDS_PER_TABLE};
use mataan::store::SessionStore;
use mataan::view::{render_status, render_table};

#[derive(Parser)]
#[command(name = "mataan")]
#[command(about = "Track scores and settle payments for a four-player tally game")]
struct Cli {
	/// Session snapshot file
	#[arg(long, global = true, env = "MATAAN_STATE")]
	state: Option<PathBuf>,

	/// Tracker config file (defaults to the first tracker.toml found)
	#[arg(long, global = true, env = "MATAAN_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Start a new session with one empty table
	New {
		/// Up to four player names, in seat order
		names: Vec<String>,
		/// Multiplier applied to score differences
		#[arg(short, long)]
		stake: Option<String>,
		/// Replace an existing session
		#[arg(short, long)]
		force: bool,
	},
	/// Append an empty table to the session
	AddTable,
	/// Enter or clear a single score
	Set {
		/// Table number (1-based) or table id
		table: String,
		/// Round number, 1-10
		round: usize,
		/// Player seat, 1-4
		player: usize,
		/// Score to enter; omit to clear the cell
		#[arg(allow_hyphen_values = true)]
		value: Option<String>,
	},
	/// Print every table and the running settlement
	Show,
	/// Print the shareable session summary
	Export,
	/// Discard the current session
	Reset,
}

fn load_settings(cli: &Cli) -> Result<TrackerConfig, String> {
	match &cli.config {
		Some(path) => load_config(path),
		None => {
			ensure_config();
			load_config_auto()
		}
	}
}

fn open_store(cli: &Cli, config: &TrackerConfig) -> Result<SessionStore, String> {
	match cli.state.as_ref().or(config.storage.state_file.as_ref()) {
		Some(path) => Ok(SessionStore::at(path.clone())),
		None => SessionStore::open_default(),
	}
}

fn require_session(store: &SessionStore) -> Result<Session, String> {
	let session = store.load()?.ok_or_else(|| {
		format!(
			"No session found at {}. Start one with 'mataan new'.",
			store.path().display()
		)
	})?;
	if let Some(first) = session.table_at(0) {
		logging::set_session_label(first.id.as_str());
	}
	Ok(session)
}

fn resolve_table(session: &Session, table: &str) -> Result<TableId, String> {
	let id = TableId(table.to_string());
	if session.table(&id).is_some() {
		return Ok(id);
	}
	table
		.parse::<usize>()
		.ok()
		.and_then(|n| n.checked_sub(1))
		.and_then(|index| session.table_at(index))
		.map(|t| t.id.clone())
		.ok_or_else(|| format!("No table '{}' (session has {} tables)", table, session.tables().len()))
}

fn parse_score(value: Option<&str>) -> Result<Option<i64>, String> {
	match value.map(str::trim) {
		None | Some("") => Ok(None),
		Some(raw) => parse_leading_int(raw)
			.map(Some)
			.ok_or_else(|| format!("'{}' is not a score", raw)),
	}
}

fn seat_index(value: usize, count: usize, what: &str) -> Result<usize, String> {
	if (1..=count).contains(&value) {
		Ok(value - 1)
	} else {
		Err(format!("{} must be between 1 and {}, got {}", what, count, value))
	}
}

fn print_session(session: &Session) {
	for index in 0..session.tables().len() {
		if let Some(grid) = render_table(session, index) {
			println!("{}", grid);
		}
	}
	print_status(session);
}

fn print_status(session: &Session) {
	println!("Settlement:");
	print!("{}", render_status(session));
}

fn run(cli: Cli) -> Result<(), String> {
	let config = load_settings(&cli)?;
	if config.logging.enabled {
		logging::init(&config.logging.dir);
	}
	let store = open_store(&cli, &config)?;

	match &cli.command {
		Command::New { names, stake, force } => {
			if names.len() > PLAYER_COUNT {
				return Err(format!("At most {} players, got {}", PLAYER_COUNT, names.len()));
			}
			if store.exists() && !force {
				return Err(format!(
					"A session already exists at {}. Use --force or 'mataan reset' first.",
					store.path().display()
				));
			}
			let stake_unit = config.defaults.resolve_stake(stake.as_deref());
			let session = Session::new(config.defaults.player_names(names), stake_unit);
			logging::set_session_label(session.tables()[0].id.as_str());
			store.save(&session)?;
			print_session(&session);
		}
		Command::AddTable => {
			let mut session = require_session(&store)?;
			let id = session.add_table();
			store.save(&session)?;
			if let Some(index) = session.position(&id) {
				if let Some(grid) = render_table(&session, index) {
					println!("{}", grid);
				}
			}
		}
		Command::Set { table, round, player, value } => {
			let mut session = require_session(&store)?;
			let id = resolve_table(&session, table)?;
			let round = seat_index(*round, ROUNDS_PER_TABLE, "Round")?;
			let player = seat_index(*player, PLAYER_COUNT, "Player")?;
			let score = parse_score(value.as_deref())?;

			session
				.set_score(&id, round, player, score)
				.map_err(|e| e.to_string())?;
			store.save(&session)?;

			if let Some(grid) = session.position(&id).and_then(|i| render_table(&session, i)) {
				println!("{}", grid);
			}
			print_status(&session);
		}
		Command::Show => {
			let session = require_session(&store)?;
			print_session(&session);
		}
		Command::Export => {
			let session = require_session(&store)?;
			print!("{}", export_summary(&session));
		}
		Command::Reset => {
			store.clear()?;
			println!("Session cleared.");
		}
	}

	Ok(())
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("Error: {}", e);
			ExitCode::FAILURE
		}
	}
}
