use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;

struct LogState {
	dir: Option<PathBuf>,
	file: Option<std::fs::File>,
	current_date: String,
	session_label: String,
}

static LOG_STATE: Mutex<LogState> = Mutex::new(LogState {
	dir: None,
	file: None,
	current_date: String::new(),
	session_label: String::new(),
});

fn today() -> String {
	Local::now().format("%Y-%m-%d").to_string()
}

fn timestamp() -> String {
	Local::now().format("%H:%M:%S%.3f").to_string()
}

fn ensure_log_file(state: &mut LogState) {
	let Some(dir) = state.dir.clone() else {
		return;
	};
	let date = today();
	if state.current_date != date || state.file.is_none() {
		let _ = fs::create_dir_all(&dir);
		let path = dir.join(format!("mataan-{}.log", date));
		if let Ok(file) = OpenOptions::new()
			.create(true)
			.append(true)
			.open(&path)
		{
			state.file = Some(file);
			state.current_date = date;
		}
	}
}

/// Nothing is written until a directory is set.
pub fn init<P: AsRef<Path>>(dir: P) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.dir = Some(dir.as_ref().to_path_buf());
		state.file = None;
	}
}

pub fn set_session_label(label: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		state.session_label = label.to_string();
	}
}

pub fn log(module: &str, log_type: &str, message: &str) {
	if let Ok(mut state) = LOG_STATE.lock() {
		if state.dir.is_none() {
			return;
		}
		ensure_log_file(&mut state);

		let label = if state.session_label.is_empty() { "-----------" } else { &state.session_label };
		let line = format!(
			"[{}][{}][{}:{}] {}\n",
			timestamp(),
			label,
			module,
			log_type,
			message
		);

		if let Some(ref mut file) = state.file {
			let _ = file.write_all(line.as_bytes());
			let _ = file.flush();
		}
	}
}

pub mod session {
	use super::log;
	use crate::session::{InvalidEdit, TableId};

	pub fn created(players: &[String], stake_unit: i64) {
		log("Session", "NEW", &format!("players=[{}] stake={}", players.join(", "), stake_unit));
	}

	pub fn table_added(id: &TableId, count: usize) {
		log("Session", "TABLE", &format!("added {} (table {})", id, count));
	}

	pub fn score_set(id: &TableId, round: usize, player: usize, value: Option<i64>) {
		let value = value.map(|v| v.to_string()).unwrap_or_else(|| "unset".to_string());
		log("Session", "SCORE", &format!("{} r{} p{} = {}", id, round + 1, player + 1, value));
	}

	pub fn rejected(err: &InvalidEdit) {
		log("Session", "REJECT", &err.to_string());
	}
}

pub mod store {
	use super::log;
	use std::path::Path;

	pub fn loaded(path: &Path, tables: usize) {
		log("Store", "LOAD", &format!("{} ({} tables)", path.display(), tables));
	}

	pub fn saved(path: &Path) {
		log("Store", "SAVE", &path.display().to_string());
	}

	pub fn cleared(path: &Path) {
		log("Store", "CLEAR", &path.display().to_string());
	}

	pub fn error(msg: &str) {
		log("Store", "ERROR", msg);
	}
}
