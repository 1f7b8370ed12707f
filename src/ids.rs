use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of client-generated collection ids
pub const COLLECTION_ID_LENGTH: usize = 60;

/// Random string over `[A-Za-z0-9]`
pub fn random_alphanumeric(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Fresh id for a collection created on behalf of the visitor
pub fn generate_collection_id() -> String {
    random_alphanumeric(COLLECTION_ID_LENGTH)
}
