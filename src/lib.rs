//! sweepdir - sort a cluttered directory into category folders
//!
//! This library classifies files by extension into a fixed set of category
//! subdirectories, normalizes filenames (transliterating Cyrillic and
//! Ukrainian characters, replacing unsafe characters), expands archives,
//! prunes directories the moves left empty, and writes a plain-text audit
//! log of everything it did.

pub mod category;
pub mod cli;
pub mod config;
pub mod mover;
pub mod normalize;
pub mod output;
pub mod prune;
pub mod report;
pub mod sorter;
pub mod unpack;

pub use category::{Category, CategoryMap};
pub use config::{CompiledSkips, ConfigError, SkipConfig};
pub use mover::{FileMover, MoveOutcome, SortError, SortResult};
pub use normalize::normalize;
pub use report::{LOG_FILE_NAME, RunLog};
pub use sorter::{RunOutcome, run_sort, run_sort_with_skips};
pub use unpack::{UnpackError, unpack_archive};

pub use cli::{Cli, run_cli};
