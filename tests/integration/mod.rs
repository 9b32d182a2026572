//! Integration tests for sp-release
//!
//! Each test builds a temporary plugin tree and runs the real binary against
//! it. Release CLI and compiler are replaced by shell scripts, so the tests
//! that need them only run on Unix.


mod test_doctor;
mod test_errors;
mod test_init;
mod test_local;
mod test_release;
