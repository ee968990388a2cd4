pub mod text;
pub mod test_utils;
