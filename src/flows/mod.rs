pub mod crowd;
pub mod search;

pub use crowd::{CrowdFlow, CrowdState};
pub use search::{InputError, SearchFlow, SearchQuery, SearchState};
