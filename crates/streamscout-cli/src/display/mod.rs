//! Terminal rendering of results and status messages.
//!
//! Everything writes to a caller-supplied `io::Write`, normally a locked
//! stdout. Progress and warnings go through `tracing` instead.

mod messages;
mod record;
mod styles;

pub use messages::{
    write_actor_rows, write_criteria, write_genre_table, write_search_complete,
    write_search_no_results, write_separator, write_summary,
};
pub use record::{TitleRecord, truncate};
pub use styles::Palette;
