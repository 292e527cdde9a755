// Main test module that includes all sub-modules
// Run specific tests with `cargo test <module>::<submodule>`
// For example: `cargo test pipeline::end_to_end_test`
// Shared fixtures
pub mod utils;

// Calculator properties
pub mod algorithm {
    pub mod properties_test;
}

// Artifact stores
pub mod store {
    pub mod round_trip_test;
}

// Data sources
pub mod source {
    pub mod directory_test;
}

// Whole pipeline
pub mod pipeline {
    pub mod end_to_end_test;
}
