//! Inventory of integration tests, collected at link time

use std::{future::Future, pin::Pin};

use eyre::Result;

use crate::test_args::TestArgs;

/// The signature of an integration test
type TestFn = fn(TestArgs) -> Pin<Box<dyn Future<Output = Result<()>>>>;

/// A registered integration test
pub struct IntegrationTest {
    /// The name of the test
    pub name: &'static str,
    /// The test function
    pub test_fn: TestFn,
}

// Collect the integration tests into an iterable
inventory::collect!(IntegrationTest);

/// Macro to register an integration test
#[macro_export]
macro_rules! integration_test {
    ($test_fn:ident) => {
        inventory::submit!($crate::test_inventory::IntegrationTest {
            name: stringify!($test_fn),
            test_fn: move |args| std::boxed::Box::pin($test_fn(args)),
        });
    };
}
