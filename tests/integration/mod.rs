//! Integration tests for listing ingestion, classification, manifests and rules

mod config_loading;
mod listing_roundtrip;
mod manifest_pipeline;
mod rule_engine;
mod similarity_report;
mod test_utils;
mod tree_building;
