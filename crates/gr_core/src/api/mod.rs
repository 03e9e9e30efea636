pub mod json_api;

pub use json_api::{
    build_replay_json, interpolate_position_json, score_quality_json, validate_record_json,
    ReplayResponse, TrackRef,
};
