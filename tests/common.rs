//! Test utilities & fixtures.
//! Seed files live under `tests/test-data-int`.

use std::path::{Path, PathBuf};

use coinage::currency::{builtin, Currency, CurrencyRegistry};

/// Return the path to the static integration test fixture directory.
pub fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test-data-int")
}

#[allow(dead_code)]
pub fn fixture(name: &str) -> PathBuf {
    fixture_root().join(name)
}

/// Copy one fixture into a temp dir so a test can edit it.
#[allow(dead_code)]
pub fn writable_fixture(name: &str) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let dest = tmp.path().join(name);
    std::fs::copy(fixture(name), &dest).expect("copy fixture");
    (tmp, dest)
}

#[allow(dead_code)]
pub fn dollars() -> Currency {
    Currency::load(builtin::dollars()).expect("dollars")
}

#[allow(dead_code)]
pub fn sterling() -> Currency {
    Currency::load(builtin::pounds_sterling()).expect("pounds sterling")
}

#[allow(dead_code)]
pub fn roman() -> Currency {
    Currency::load(builtin::roman()).expect("roman")
}

#[allow(dead_code)]
pub fn builtin_registry() -> CurrencyRegistry {
    CurrencyRegistry::with_currencies(builtin::load_all().expect("stock currencies"))
}
