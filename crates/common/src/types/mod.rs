mod assessment;
mod detection;
mod report;
mod threshold;

pub use assessment::*;
pub use detection::*;
pub use report::*;
pub use threshold::*;
