mod agent;
mod word_search;

pub use agent::{Agent, SearchStats};
pub use word_search::WordSearchAgent;
