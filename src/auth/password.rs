/// The shared admin password. It locks the admin screen; it is not a credential store.
pub const ADMIN_PASSWORD: &str = "admin";

pub fn verify_admin_password(candidate: &str) -> bool {
    candidate == ADMIN_PASSWORD
}
