// handlers/protected/mod.rs - proxy routes (key cookie required)
//
// Each handler validates its body, performs exactly one call to the
// extraction service with the visitor's key, and reshapes the answer into
// `{ "success": true, ...fields }`. Failures become `{ "success": false, "error" }`.

pub mod collection;
pub mod insert;
pub mod markdown;
pub mod query;
pub mod structured;
pub mod transcript;
pub mod utils;

pub use collection::create as collection_post;
pub use collection::delete as collection_delete;
pub use insert::post as insert_post;
pub use markdown::post as generate_md_post;
pub use query::post as query_post;
pub use structured::post as structured_output_post;
pub use transcript::post as youtube_transcript_post;
