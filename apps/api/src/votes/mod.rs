// Client reactions on proposed thumbnails.
// A vote is keyed by (thumbnail, project token) and re-submission overwrites in place.

pub mod handlers;
pub mod recorder;
