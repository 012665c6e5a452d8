use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::logging;

pub const PLAYER_COUNT: usize = 4;
pub const ROUNDS_PER_TABLE: usize = 10;

/// Largest score magnitude a single cell accepts.
pub const MAX_SCORE: i64 = 100_000;
/// Largest stake unit accepted; anything above reads as invalid.
pub const MAX_STAKE_UNIT: i64 = 10_000;

const DEFAULT_STAKE_UNIT: i64 = 1;
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub String);

impl TableId {
	pub fn generate() -> Self {
		let mut rng = rand::rng();
		let suffix: String = (0..ID_LEN)
			.map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
			.collect();
		TableId(format!("id{}", suffix))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for TableId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// One scoring slot per player. `None` means nothing has been entered yet,
/// which is distinct from an entered zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
	pub scores: [Option<i64>; PLAYER_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
	pub id: TableId,
	pub rounds: [Round; ROUNDS_PER_TABLE],
}

impl Table {
	pub fn new(id: TableId) -> Self {
		Self {
			id,
			rounds: std::array::from_fn(|_| Round::default()),
		}
	}

	pub fn score(&self, round: usize, player: usize) -> Option<i64> {
		self.rounds.get(round)?.scores.get(player).copied().flatten()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidEdit {
	UnknownTable(TableId),
	RoundOutOfRange(usize),
	PlayerOutOfRange(usize),
	ScoreOutOfRange(i64),
}

impl std::fmt::Display for InvalidEdit {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			InvalidEdit::UnknownTable(id) => write!(f, "no table with id '{}'", id),
			InvalidEdit::RoundOutOfRange(round) => write!(
				f,
				"round index {} is out of range (0-{})",
				round,
				ROUNDS_PER_TABLE - 1
			),
			InvalidEdit::PlayerOutOfRange(player) => write!(
				f,
				"player index {} is out of range (0-{})",
				player,
				PLAYER_COUNT - 1
			),
			InvalidEdit::ScoreOutOfRange(score) => write!(
				f,
				"score {} is out of range (-{}..={})",
				score,
				MAX_SCORE,
				MAX_SCORE
			),
		}
	}
}

impl std::error::Error for InvalidEdit {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
	#[serde(deserialize_with = "lenient_players")]
	players: [String; PLAYER_COUNT],
	#[serde(
		rename = "betAmount",
		alias = "stakeUnit",
		default = "default_stake_unit",
		deserialize_with = "lenient_stake_unit"
	)]
	stake_unit: i64,
	tables: Vec<Table>,
}

fn default_stake_unit() -> i64 {
	DEFAULT_STAKE_UNIT
}

pub fn placeholder_name(index: usize) -> String {
	format!("Player {}", index + 1)
}

pub fn normalize_stake_unit(stake_unit: i64) -> i64 {
	if (1..=MAX_STAKE_UNIT).contains(&stake_unit) { stake_unit } else { DEFAULT_STAKE_UNIT }
}

pub fn score_in_range(score: i64) -> bool {
	(-MAX_SCORE..=MAX_SCORE).contains(&score)
}

fn normalize_players<S: AsRef<str>>(players: &[S; PLAYER_COUNT]) -> [String; PLAYER_COUNT] {
	std::array::from_fn(|i| {
		let name = players[i].as_ref().trim();
		if name.is_empty() {
			placeholder_name(i)
		} else {
			name.to_string()
		}
	})
}

fn lenient_players<'de, D>(deserializer: D) -> Result<[String; PLAYER_COUNT], D::Error>
where
	D: Deserializer<'de>,
{
	let raw = <[String; PLAYER_COUNT]>::deserialize(deserializer)?;
	Ok(normalize_players(&raw))
}

// Snapshots written by hand or by older front ends may carry the stake as a
// string, a float or garbage. Anything that does not yield an integer in
// 1..=MAX_STAKE_UNIT falls back to 1.
fn lenient_stake_unit<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
	D: Deserializer<'de>,
{
	let value = serde_json::Value::deserialize(deserializer)?;
	let parsed = match value {
		serde_json::Value::Number(n) => n.as_i64().or_else(|| {
			n.as_f64()
				.filter(|f| f.is_finite() && f.abs() <= MAX_STAKE_UNIT as f64)
				.map(|f| f.trunc() as i64)
		}),
		serde_json::Value::String(s) => parse_leading_int(&s),
		_ => None,
	};
	Ok(normalize_stake_unit(parsed.unwrap_or(DEFAULT_STAKE_UNIT)))
}

/// Leading-integer parse: optional sign followed by digits, trailing junk ignored.
pub fn parse_leading_int(s: &str) -> Option<i64> {
	let s = s.trim_start();
	let (sign, rest) = match s.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, s.strip_prefix('+').unwrap_or(s)),
	};
	let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
	digits.parse::<i64>().ok().map(|n| sign * n)
}

impl Session {
	pub fn new<S: AsRef<str>>(players: [S; PLAYER_COUNT], stake_unit: i64) -> Self {
		let mut session = Self {
			players: normalize_players(&players),
			stake_unit: normalize_stake_unit(stake_unit),
			tables: Vec::new(),
		};
		session.add_table();
		logging::session::created(&session.players, session.stake_unit);
		session
	}

	pub fn players(&self) -> &[String; PLAYER_COUNT] {
		&self.players
	}

	pub fn player_name(&self, player: usize) -> Option<&str> {
		self.players.get(player).map(|s| s.as_str())
	}

	pub fn stake_unit(&self) -> i64 {
		self.stake_unit
	}

	pub fn tables(&self) -> &[Table] {
		&self.tables
	}

	pub fn table(&self, id: &TableId) -> Option<&Table> {
		self.tables.iter().find(|t| &t.id == id)
	}

	pub fn table_at(&self, index: usize) -> Option<&Table> {
		self.tables.get(index)
	}

	pub fn position(&self, id: &TableId) -> Option<usize> {
		self.tables.iter().position(|t| &t.id == id)
	}

	pub fn add_table(&mut self) -> TableId {
		let mut id = TableId::generate();
		while self.table(&id).is_some() {
			id = TableId::generate();
		}
		self.tables.push(Table::new(id.clone()));
		logging::session::table_added(&id, self.tables.len());
		id
	}

	pub fn set_score(
		&mut self,
		table_id: &TableId,
		round: usize,
		player: usize,
		value: Option<i64>,
	) -> Result<(), InvalidEdit> {
		let result = self.write_cell(table_id, round, player, value);
		match &result {
			Ok(()) => logging::session::score_set(table_id, round, player, value),
			Err(e) => logging::session::rejected(e),
		}
		result
	}

	fn write_cell(
		&mut self,
		table_id: &TableId,
		round: usize,
		player: usize,
		value: Option<i64>,
	) -> Result<(), InvalidEdit> {
		if round >= ROUNDS_PER_TABLE {
			return Err(InvalidEdit::RoundOutOfRange(round));
		}
		if player >= PLAYER_COUNT {
			return Err(InvalidEdit::PlayerOutOfRange(player));
		}
		if let Some(score) = value.filter(|s| !score_in_range(*s)) {
			return Err(InvalidEdit::ScoreOutOfRange(score));
		}
		let table = self
			.tables
			.iter_mut()
			.find(|t| &t.id == table_id)
			.ok_or_else(|| InvalidEdit::UnknownTable(table_id.clone()))?;
		table.rounds[round].scores[player] = value;
		Ok(())
	}

	pub fn to_json(&self) -> Result<String, String> {
		serde_json::to_string_pretty(self)
			.map_err(|e| format!("Failed to serialize session: {}", e))
	}

	pub fn from_json(content: &str) -> Result<Self, String> {
		let mut session: Session = serde_json::from_str(content)
			.map_err(|e| format!("Failed to parse session: {}", e))?;
		session.check_scores()?;
		session.dedupe_table_ids();
		if session.tables.is_empty() {
			session.add_table();
		}
		Ok(session)
	}

	fn check_scores(&self) -> Result<(), String> {
		for (index, table) in self.tables.iter().enumerate() {
			for (round, cells) in table.rounds.iter().enumerate() {
				if let Some(score) = cells.scores.iter().flatten().find(|s| !score_in_range(**s)) {
					return Err(format!(
						"Failed to parse session: table {} round {} has score {} outside -{}..={}",
						index + 1,
						round + 1,
						score,
						MAX_SCORE,
						MAX_SCORE
					));
				}
			}
		}
		Ok(())
	}

	// Later tables sharing an id with an earlier one get a fresh id so every
	// table stays addressable.
	fn dedupe_table_ids(&mut self) {
		let mut seen = std::collections::HashSet::new();
		for index in 0..self.tables.len() {
			if seen.insert(self.tables[index].id.clone()) {
				continue;
			}
			let mut id = TableId::generate();
			while self.table(&id).is_some() {
				id = TableId::generate();
			}
			seen.insert(id.clone());
			self.tables[index].id = id;
		}
	}
}
