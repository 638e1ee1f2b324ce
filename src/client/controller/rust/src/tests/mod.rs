/* src/client/controller/rust/src/tests/mod.rs */

mod form;
