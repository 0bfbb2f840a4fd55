#![allow(missing_docs)]

mod scenario;
mod store;
