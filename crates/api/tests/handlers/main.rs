#[path = "../test_utils.rs"]
mod test_utils;

mod classes_test;
mod middleware_test;
