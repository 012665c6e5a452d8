use include_dir::{include_dir, Dir};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{APP_DIR, CONFIG_FILE};

static CONFIG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/config");

/// Copies the bundled config files into the user config dir, leaving
/// existing files alone. Returns the files that were written.
pub fn ensure_config() -> Vec<PathBuf> {
	let Some(user_config) = dirs::config_dir() else {
		return Vec::new();
	};
	let dest = user_config.join(APP_DIR);
	let mut written = Vec::new();
	install_missing(&CONFIG_DIR, &dest, &mut written);
	written
}

fn install_missing(bundle: &Dir, dest: &Path, written: &mut Vec<PathBuf>) {
	let missing = bundle
		.files()
		.map(|file| (dest.join(file.path()), file.contents()))
		.filter(|(target, _)| !target.exists());

	for (target, contents) in missing {
		let created = target
			.parent()
			.map_or(Ok(()), fs::create_dir_all)
			.and_then(|_| fs::write(&target, contents));
		if created.is_ok() {
			written.push(target);
		}
	}

	for subdir in bundle.dirs() {
		install_missing(subdir, dest, written);
	}
}

pub fn bundled_config() -> Option<&'static str> {
	CONFIG_DIR.get_file(CONFIG_FILE)?.contents_utf8()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::parse_config;

	#[test]
	fn test_bundled_config_parses() {
		let content = bundled_config().expect("tracker.toml is bundled");
		let config = parse_config(content).unwrap();
		assert_eq!(config.defaults.stake_unit(), 1);
		assert!(!config.logging.enabled);
	}

	#[test]
	fn test_install_missing_does_not_overwrite() {
		let dest = std::env::temp_dir().join(format!("mataan-defaults-{}", std::process::id()));
		let _ = fs::remove_dir_all(&dest);
		fs::create_dir_all(&dest).unwrap();
		fs::write(dest.join(CONFIG_FILE), "# mine\n").unwrap();

		let mut written = Vec::new();
		install_missing(&CONFIG_DIR, &dest, &mut written);
		assert!(written.is_empty());
		assert_eq!(fs::read_to_string(dest.join(CONFIG_FILE)).unwrap(), "# mine\n");

		fs::remove_file(dest.join(CONFIG_FILE)).unwrap();
		install_missing(&CONFIG_DIR, &dest, &mut written);
		assert_eq!(written, vec![dest.join(CONFIG_FILE)]);
		assert_eq!(fs::read_to_string(dest.join(CONFIG_FILE)).unwrap(), bundled_config().unwrap());

		let _ = fs::remove_dir_all(&dest);
	}
}
