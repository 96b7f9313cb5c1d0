pub mod centrality;
pub mod settlement;
