pub mod exclude;
pub mod store;
pub mod walker;

pub use exclude::ExclusionFilter;
pub use store::IndexStore;
pub use walker::{rebuild, rebuild_with_progress};
