/// Git commit the bundle was built from, or `unknown` outside a checkout.
pub fn git_commit_hash() -> &'static str {
    match option_env!("USERS_CRUD_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

/// First seven characters of the commit, for compact display.
pub fn short_commit_hash() -> &'static str {
    abbreviate(git_commit_hash())
}

// The commit may come from the build environment, so cut on a char boundary.
fn abbreviate(hash: &str) -> &str {
    match hash.char_indices().nth(7) {
        Some((end, _)) => &hash[..end],
        None => hash,
    }
}
