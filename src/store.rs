use std::fs;
use std::path::{Path, PathBuf};

use crate::config::APP_DIR;
use crate::logging;
use crate::session::Session;

pub const STATE_FILE: &str = "score-tracker-state.json";

/// File-backed snapshot of the live session. The session itself never
/// touches disk; callers save after each mutation.
pub struct SessionStore {
	path: PathBuf,
}

impl SessionStore {
	pub fn at<P: Into<PathBuf>>(path: P) -> Self {
		Self { path: path.into() }
	}

	pub fn open_default() -> Result<Self, String> {
		let path = Self::default_path().inspect_err(|e| logging::store::error(e))?;
		Ok(Self { path })
	}

	fn default_path() -> Result<PathBuf, String> {
		if let Some(data_dir) = dirs::data_dir() {
			let dir = data_dir.join(APP_DIR);
			fs::create_dir_all(&dir)
				.map_err(|e| format!("Failed to create data dir: {}", e))?;
			Ok(dir.join(STATE_FILE))
		} else {
			Ok(PathBuf::from(STATE_FILE))
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn exists(&self) -> bool {
		self.path.exists()
	}

	/// `None` when no snapshot has been saved yet.
	pub fn load(&self) -> Result<Option<Session>, String> {
		let session = self.read_snapshot().inspect_err(|e| logging::store::error(e))?;
		if let Some(session) = &session {
			logging::store::loaded(&self.path, session.tables().len());
		}
		Ok(session)
	}

	fn read_snapshot(&self) -> Result<Option<Session>, String> {
		if !self.path.exists() {
			return Ok(None);
		}

		let content = fs::read_to_string(&self.path)
			.map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
		Session::from_json(&content).map(Some)
	}

	pub fn save(&self, session: &Session) -> Result<(), String> {
		self.write_snapshot(session).inspect_err(|e| logging::store::error(e))?;
		logging::store::saved(&self.path);
		Ok(())
	}

	fn write_snapshot(&self, session: &Session) -> Result<(), String> {
		let content = session.to_json()?;

		if let Some(parent) = self.path.parent() {
			if !parent.as_os_str().is_empty() {
				fs::create_dir_all(parent)
					.map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
			}
		}

		fs::write(&self.path, content)
			.map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
	}

	pub fn clear(&self) -> Result<(), String> {
		if self.path.exists() {
			fs::remove_file(&self.path)
				.map_err(|e| format!("Failed to remove {}: {}", self.path.display(), e))
				.inspect_err(|e| logging::store::error(e))?;
		}
		logging::store::cleared(&self.path);
		Ok(())
	}
}
