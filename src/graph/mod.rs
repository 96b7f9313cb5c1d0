pub mod adjacency;
pub mod debt_graph;
pub mod dot;
pub mod shortest_path;
