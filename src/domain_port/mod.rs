mod edge_repo;
mod member_repo;

pub use edge_repo::*;
pub use member_repo::*;

mod repo_tx;

pub use repo_tx::*;
