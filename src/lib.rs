pub mod config;
pub mod discovery;
pub mod document;
pub mod entities;
pub mod extractor;
pub mod fetcher;
pub mod geocoder;
pub mod pipeline;
pub mod render;
pub mod storage;
pub mod telemetry;
pub mod throttle;
