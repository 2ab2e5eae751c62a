pub mod file_paths;
pub mod sanitize_title;

pub use file_paths::{assign_unique_bases, find_part_file, infer_extension, part_path_for, PART_SUFFIX};
pub use sanitize_title::{sanitize_title, MAX_TITLE_CHARS, UNTITLED};
