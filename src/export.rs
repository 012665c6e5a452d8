use crate::aggregate::{accumulated_payments, final_ranking};
use crate::session::{Session, PLAYER_COUNT};
use crate::settlement::table_settlement;

pub const SESSION_TITLE: &str = "Mataan Session";

pub fn format_payment(amount: i64) -> String {
	if amount > 0 {
		format!("+{}", amount)
	} else {
		amount.to_string()
	}
}

/// Plain-text session summary, suitable for pasting into a chat.
pub fn export_summary(session: &Session) -> String {
	let mut lines = vec![
		SESSION_TITLE.to_string(),
		format!("Players: {}", session.players().join(", ")),
		format!("Bet Amount: {}", session.stake_unit()),
		String::new(),
	];

	for (index, table) in session.tables().iter().enumerate() {
		lines.push(format!("=== TABLE {} ===", index + 1));
		let settlement = table_settlement(session, table);
		for (player, name) in session.players().iter().enumerate() {
			let badge = if player == settlement.best() {
				" 🏆 Congratulations!"
			} else if player == settlement.worst() {
				" 👎 Boo!"
			} else {
				""
			};
			lines.push(format!("{}: {}{}", name, format_payment(settlement.payments[player]), badge));
		}
		lines.push(String::new());
	}

	lines.push("=== FINAL SUMMARY ===".to_string());
	let accumulated = accumulated_payments(session);
	let ranking = final_ranking(session);
	for (player, name) in session.players().iter().enumerate() {
		let badge = if player == ranking[0].player {
			" 🏆"
		} else if player == ranking[PLAYER_COUNT - 1].player {
			" 👎"
		} else {
			""
		};
		lines.push(format!("{}: {}{}", name, format_payment(accumulated[player]), badge));
	}

	lines.push(String::new());
	lines.join("\n")
}
