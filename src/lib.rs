// Skimmer: on-demand timeline toxicity gateway.
//
// This is the library root. Each module corresponds to one stage of the
// fetch -> clean -> batch -> score -> merge pipeline.

pub mod batch;
pub mod config;
pub mod feed;
pub mod normalize;
pub mod pipeline;
pub mod toxicity;
pub mod web;
