//! Range computation, linear scaling and range files

pub mod linear;
pub mod range;
pub mod range_file;

pub use self::linear::{scale_dataset, LinearScaler};
pub use self::range::{compute_ranges, RangeTable};
pub use self::range_file::{read_ranges_file, write_ranges_file, RangeFile};
