use serde::{Deserialize, Serialize};

use crate::session::{Session, Table, PLAYER_COUNT};
use crate::totals::effective_scores;

/// Signed amount per player, index-aligned with `Session::players`.
/// Positive is money received. Always sums to zero.
pub type Payments = [i64; PLAYER_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
	pub player: usize,
	pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
	pub from: usize,
	pub to: usize,
	pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
	/// Best (lowest score) first.
	pub ranking: [Standing; PLAYER_COUNT],
	/// Worst pays best, then third pays second.
	pub transfers: [Transfer; 2],
	pub payments: Payments,
}

impl Settlement {
	pub fn best(&self) -> usize {
		self.ranking[0].player
	}

	pub fn worst(&self) -> usize {
		self.ranking[PLAYER_COUNT - 1].player
	}
}

/// Orders players by ascending score. Ties keep seat order.
pub fn rank(scores: [i64; PLAYER_COUNT]) -> [Standing; PLAYER_COUNT] {
	let mut ranking: [Standing; PLAYER_COUNT] =
		std::array::from_fn(|player| Standing { player, score: scores[player] });
	ranking.sort_by_key(|s| s.score);
	ranking
}

/// Amounts saturate at the `i64` limits instead of panicking. Scores and
/// stakes within the bounds a `Session` accepts never get near them, so
/// session settlements stay exactly zero-sum.
pub fn settle(scores: [i64; PLAYER_COUNT], stake_unit: i64) -> Settlement {
	let ranking = rank(scores);
	let transfers = [
		transfer(&ranking[3], &ranking[0], stake_unit),
		transfer(&ranking[2], &ranking[1], stake_unit),
	];

	let mut payments = [0i64; PLAYER_COUNT];
	for t in &transfers {
		payments[t.from] = payments[t.from].saturating_sub(t.amount);
		payments[t.to] = payments[t.to].saturating_add(t.amount);
	}

	Settlement { ranking, transfers, payments }
}

fn transfer(payer: &Standing, payee: &Standing, stake_unit: i64) -> Transfer {
	Transfer {
		from: payer.player,
		to: payee.player,
		amount: payer.score.saturating_sub(payee.score).saturating_mul(stake_unit),
	}
}

pub fn table_settlement(session: &Session, table: &Table) -> Settlement {
	settle(effective_scores(table), session.stake_unit())
}

pub fn table_payments(session: &Session, table: &Table) -> Payments {
	table_settlement(session, table).payments
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_rank_ascending() {
		let ranking = rank([30, 10, 40, 20]);
		let order: Vec<usize> = ranking.iter().map(|s| s.player).collect();
		assert_eq!(order, vec![1, 3, 0, 2]);
	}

	#[test]
	fn test_rank_ties_keep_seat_order() {
		let ranking = rank([5, 0, 5, 0]);
		let order: Vec<usize> = ranking.iter().map(|s| s.player).collect();
		assert_eq!(order, vec![1, 3, 0, 2]);
	}

	#[test]
	fn test_settle_distinct_scores() {
		let settlement = settle([10, 20, 30, 40], 1);
		assert_eq!(settlement.payments, [30, 10, -10, -30]);
		assert_eq!(settlement.transfers[0], Transfer { from: 3, to: 0, amount: 30 });
		assert_eq!(settlement.transfers[1], Transfer { from: 2, to: 1, amount: 10 });
		assert_eq!(settlement.best(), 0);
		assert_eq!(settlement.worst(), 3);
	}

	#[test]
	fn test_settle_applies_stake_unit() {
		let settlement = settle([40, 30, 20, 10], 3);
		assert_eq!(settlement.payments, [-90, -30, 30, 90]);
	}

	#[test]
	fn test_settle_all_equal_is_zero() {
		assert_eq!(settle([5, 5, 5, 5], 5).payments, [0, 0, 0, 0]);
	}

	#[test]
	fn test_settle_is_zero_sum() {
		for scores in [[0, 0, 0, 7], [-3, 12, 12, 1], [100, -100, 0, 50], [2, 2, 9, 9]] {
			for stake in [1, 2, 10] {
				let settlement = settle(scores, stake);
				assert_eq!(settlement.payments.iter().sum::<i64>(), 0, "{:?} x{}", scores, stake);
			}
		}
	}

	#[test]
	fn test_settle_extreme_inputs_do_not_panic() {
		let settlement = settle([i64::MAX, -1, 0, i64::MIN], i64::MAX);
		assert_eq!(settlement.transfers[0].amount, i64::MAX);
		assert_eq!(settlement.payments[3], i64::MAX);
		assert_eq!(settlement.payments[0], -i64::MAX);
	}

	#[test]
	fn test_settle_at_session_bounds_is_exact() {
		use crate::session::{MAX_SCORE, MAX_STAKE_UNIT, ROUNDS_PER_TABLE};
		let top = MAX_SCORE * ROUNDS_PER_TABLE as i64;
		let settlement = settle([-top, top, -top, top], MAX_STAKE_UNIT);
		let swing = 2 * top * MAX_STAKE_UNIT;
		assert_eq!(settlement.payments, [swing, -swing, swing, -swing]);
		assert_eq!(settlement.payments.iter().sum::<i64>(), 0);
	}

	#[test]
	fn test_settle_tied_middle_pair() {
		// Second and third tie, so only the outer transfer moves money.
		let settlement = settle([1, 8, 8, 20], 1);
		assert_eq!(settlement.payments, [19, 0, 0, -19]);
	}

	#[test]
	fn test_table_payments_treat_missing_as_zero() {
		let mut session = Session::new(["A", "B", "C", "D"], 1);
		let id = session.tables()[0].id.clone();
		session.set_score(&id, 0, 0, Some(10)).unwrap();
		session.set_score(&id, 0, 1, Some(4)).unwrap();

		// C and D have nothing entered: both count as 0 and rank first, C ahead of D.
		let table = &session.tables()[0];
		let settlement = table_settlement(&session, table);
		assert_eq!(settlement.best(), 2);
		assert_eq!(settlement.worst(), 0);
		assert_eq!(table_payments(&session, table), [-10, -4, 10, 4]);
	}
}
