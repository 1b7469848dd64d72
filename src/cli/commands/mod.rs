pub mod run;

pub use run::{execute_run, execute_run_with_reporter};
