mod edge_repo_mem;
mod member_repo_mem;
mod repo_tx_mem;

pub use edge_repo_mem::*;
pub use member_repo_mem::*;
pub use repo_tx_mem::*;
