pub mod banner;
pub mod operator;
pub mod time;


pub use banner::*;
pub use operator::*;
pub use time::*;
