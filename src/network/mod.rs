pub mod gradients;
pub mod link;
pub mod network;
pub mod node;
pub mod spec;

pub use gradients::{Gradients, LinkGradient, NodeGradient};
pub use link::Link;
pub use network::Network;
pub use node::{Node, NodeRef};
pub use spec::NetworkSpec;
