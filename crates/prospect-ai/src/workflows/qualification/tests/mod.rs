mod common;

mod classifier;
mod scoring;
