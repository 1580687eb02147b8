mod collections_tests;
mod core_tests;
mod rest_tests;
