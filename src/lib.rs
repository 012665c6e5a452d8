pub mod aggregate;
pub mod config;
pub mod defaults;
pub mod export;
pub mod logging;
pub mod session;
pub mod settlement;
pub mod store;
pub mod totals;
pub mod view;

pub use aggregate::{accumulated_payments, final_ranking};
pub use session::{InvalidEdit, Round, Session, Table, TableId, PLAYER_COUNT, ROUNDS_PER_TABLE};
pub use settlement::{settle, table_payments, Payments, Settlement, Standing, Transfer};
pub use totals::{player_grand_total, player_table_total};
