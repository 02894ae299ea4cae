mod driver_tests;
mod stats_tests;
mod utils;
