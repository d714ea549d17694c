mod edge;
mod member;

pub use edge::*;
pub use member::*;
