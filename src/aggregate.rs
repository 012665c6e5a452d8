use crate::session::{Session, PLAYER_COUNT};
use crate::settlement::{rank, table_payments, Payments, Standing};
use crate::totals::effective_grand_scores;

/// Element-wise sum of every table's payments. Recomputed from scratch on
/// each call since an edit to any round can change any table's settlement.
pub fn accumulated_payments(session: &Session) -> Payments {
	session
		.tables()
		.iter()
		.map(|table| table_payments(session, table))
		.fold([0; PLAYER_COUNT], |mut acc, payments| {
			for (slot, amount) in acc.iter_mut().zip(payments) {
				*slot = slot.saturating_add(amount);
			}
			acc
		})
}

/// Session ranking by grand total, missing totals read as 0.
pub fn final_ranking(session: &Session) -> [Standing; PLAYER_COUNT] {
	rank(effective_grand_scores(session))
}
