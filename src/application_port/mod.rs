mod friend_graph_service;
mod identity_service;

pub use friend_graph_service::*;
pub use identity_service::*;
