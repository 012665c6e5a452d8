use crate::session::{Session, Table, PLAYER_COUNT};

/// Sum of a player's entered scores on one table, or `None` when the player
/// has no entered score there. An entered zero still counts as a total.
pub fn player_table_total(table: &Table, player: usize) -> Option<i64> {
	if player >= PLAYER_COUNT {
		return None;
	}
	table
		.rounds
		.iter()
		.filter_map(|round| round.scores[player])
		.fold(None, |acc, score| Some(acc.unwrap_or(0i64).saturating_add(score)))
}

/// Sum of a player's table totals, skipping tables where they have none.
pub fn player_grand_total(session: &Session, player: usize) -> Option<i64> {
	session
		.tables()
		.iter()
		.filter_map(|table| player_table_total(table, player))
		.fold(None, |acc, total| Some(acc.unwrap_or(0i64).saturating_add(total)))
}

/// Table totals with `None` read as 0, for settlement only.
pub fn effective_scores(table: &Table) -> [i64; PLAYER_COUNT] {
	std::array::from_fn(|player| player_table_total(table, player).unwrap_or(0))
}

pub fn effective_grand_scores(session: &Session) -> [i64; PLAYER_COUNT] {
	std::array::from_fn(|player| player_grand_total(session, player).unwrap_or(0))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::session::TableId;

	fn table_with(cells: &[(usize, usize, i64)]) -> Table {
		let mut table = Table::new(TableId("idtest".to_string()));
		for &(round, player, score) in cells {
			table.rounds[round].scores[player] = Some(score);
		}
		table
	}

	#[test]
	fn test_table_total_sums_entered_scores() {
		let table = table_with(&[(0, 0, 5), (1, 0, 7), (9, 0, 3), (0, 1, 2)]);
		assert_eq!(player_table_total(&table, 0), Some(15));
		assert_eq!(player_table_total(&table, 1), Some(2));
	}

	#[test]
	fn test_table_total_none_without_entries() {
		let table = table_with(&[(0, 0, 5)]);
		assert_eq!(player_table_total(&table, 2), None);
	}

	#[test]
	fn test_entered_zero_is_a_total() {
		let table = table_with(&[(4, 3, 0)]);
		assert_eq!(player_table_total(&table, 3), Some(0));
	}

	#[test]
	fn test_negative_scores_are_summed() {
		let table = table_with(&[(0, 0, -4), (1, 0, 10)]);
		assert_eq!(player_table_total(&table, 0), Some(6));
	}

	#[test]
	fn test_out_of_range_player_has_no_total() {
		let table = table_with(&[(0, 0, 1)]);
		assert_eq!(player_table_total(&table, PLAYER_COUNT), None);
	}

	#[test]
	fn test_grand_total_skips_empty_tables() {
		let mut session = Session::new(["A", "B", "C", "D"], 1);
		let first = session.tables()[0].id.clone();
		let second = session.add_table();
		let third = session.add_table();
		session.set_score(&first, 0, 0, Some(4)).unwrap();
		session.set_score(&third, 2, 0, Some(6)).unwrap();
		session.set_score(&second, 0, 1, Some(0)).unwrap();

		assert_eq!(player_grand_total(&session, 0), Some(10));
		assert_eq!(player_grand_total(&session, 1), Some(0));
		assert_eq!(player_grand_total(&session, 2), None);
	}

	#[test]
	fn test_table_total_saturates() {
		let table = table_with(&[(0, 0, i64::MAX), (1, 0, 1), (0, 1, i64::MIN), (1, 1, -1)]);
		assert_eq!(player_table_total(&table, 0), Some(i64::MAX));
		assert_eq!(player_table_total(&table, 1), Some(i64::MIN));
	}

	#[test]
	fn test_effective_scores_substitute_zero() {
		let table = table_with(&[(0, 1, 8), (0, 3, -2)]);
		assert_eq!(effective_scores(&table), [0, 8, 0, -2]);
	}
}
