mod cars_api_tests;
mod pages_tests;
