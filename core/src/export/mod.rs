//! Export of selected records as a table or as copied files

pub mod copy;
pub mod table;

pub use copy::copy_segmentation_files;
pub use table::{tabulate, write_table};
