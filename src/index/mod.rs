pub mod fileset;
pub mod suffix_array;

pub use fileset::{FileSet, FileSpan};
pub use suffix_array::store::SuffixArrayFile;
