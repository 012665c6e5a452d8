use crate::aggregate::accumulated_payments;
use crate::export::format_payment;
use crate::session::{Session, PLAYER_COUNT};
use crate::settlement::table_payments;
use crate::totals::player_table_total;

const LABEL_WIDTH: usize = 9;
const MIN_CELL_WIDTH: usize = 6;

fn cell_width(session: &Session) -> usize {
	session
		.players()
		.iter()
		.map(|name| name.chars().count())
		.max()
		.unwrap_or(0)
		.max(MIN_CELL_WIDTH)
}

fn row(label: &str, cells: &[String], width: usize) -> String {
	let cells: Vec<String> = cells.iter().map(|cell| format!("{:>w$}", cell, w = width)).collect();
	format!("{:<w$} | {}", label, cells.join(" | "), w = LABEL_WIDTH)
}

/// Grid for one table: round rows, then totals (`-` when nothing entered)
/// and payments.
pub fn render_table(session: &Session, index: usize) -> Option<String> {
	let table = session.table_at(index)?;
	let width = cell_width(session);

	let mut lines = vec![
		format!("Table {} [{}]", index + 1, table.id),
		row("Round", session.players(), width),
		"-".repeat(LABEL_WIDTH + PLAYER_COUNT * (width + 3)),
	];

	for (round_index, round) in table.rounds.iter().enumerate() {
		let cells: Vec<String> = round
			.scores
			.iter()
			.map(|s| s.map(|v| v.to_string()).unwrap_or_default())
			.collect();
		lines.push(row(&format!("Round {}", round_index + 1), &cells, width));
	}

	let totals: Vec<String> = (0..PLAYER_COUNT)
		.map(|p| {
			player_table_total(table, p)
				.map(|t| t.to_string())
				.unwrap_or_else(|| "-".to_string())
		})
		.collect();
	lines.push(row("Total", &totals, width));

	let payments: Vec<String> = table_payments(session, table)
		.iter()
		.map(|&p| format_payment(p))
		.collect();
	lines.push(row("Payment", &payments, width));

	lines.push(String::new());
	Some(lines.join("\n"))
}

/// Running settlement per player across all tables.
pub fn render_status(session: &Session) -> String {
	let accumulated = accumulated_payments(session);
	session
		.players()
		.iter()
		.zip(accumulated)
		.map(|(name, amount)| format!("{}: {}\n", name, format_payment(amount)))
		.collect()
}
