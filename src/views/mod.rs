// Views: each mount owns one cancellable fetch and the state derived from it.

pub mod catalog;
pub mod detail;
mod task;

pub use catalog::{CatalogState, CatalogView};
pub use detail::{DetailFailure, DetailState, DetailView};
use task::ViewTask;
