pub mod config_tree;
pub mod dependency;
pub mod file_node;
pub mod hosting;

pub use config_tree::ConfigTree;
pub use dependency::DependencySnapshot;
pub use file_node::FileNode;
pub use hosting::{Attributes, HostingAsset};
