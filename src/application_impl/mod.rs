mod friend_graph_service_impl;
mod identity_service_fake;
mod identity_service_impl;

pub use friend_graph_service_impl::*;
pub use identity_service_fake::*;
pub use identity_service_impl::*;
