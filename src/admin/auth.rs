//! Admin credential check.
//!
//! A fixed username/password pair, kept deliberately as a thin check:
//! the admin panel guards a local upload list, not anything sensitive.

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

pub fn verify(username: &str, password: &str) -> bool {
    username == ADMIN_USERNAME && password == ADMIN_PASSWORD
}
