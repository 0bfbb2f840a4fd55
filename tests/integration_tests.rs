mod common;
mod integration;
