//! Test suite modules

mod legacy;
mod registry;
mod shell;
