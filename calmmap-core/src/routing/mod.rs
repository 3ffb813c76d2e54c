// Path search over route adjacency

pub mod bfs;

pub use bfs::shortest_simple_path;
