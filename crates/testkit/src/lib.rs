mod yaml_runner;

pub use sqlfrost_core::RecordingLogger;
pub use yaml_runner::{
    CaseOptions, LoadError, TestCase, TestResult, load_test_cases_from_path,
    load_test_cases_from_str, run_compile_test,
};
