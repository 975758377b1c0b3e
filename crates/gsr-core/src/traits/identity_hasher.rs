/// Produces stable opaque tokens for reporter identities.
///
/// Same input and secret always yield the same token. Rotating the secret
/// breaks correlation with previously hashed reporters; that is accepted.
pub trait IIdentityHasher: Send + Sync {
    fn hash_identity(&self, raw_identity: &str) -> String;
}
