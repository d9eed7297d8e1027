#![allow(dead_code, unused_imports)]

pub(crate) mod test_context;

pub(crate) use test_context::{TestContext, base_context, python3_available};
