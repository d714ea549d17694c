mod edge_repo_mysql;
mod member_repo_mysql;

pub use edge_repo_mysql::*;
pub use member_repo_mysql::*;

mod repo_tx_mysql;

pub use repo_tx_mysql::*;

mod util;
