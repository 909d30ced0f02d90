pub mod paths;

pub use paths::{login_keychain, CurrentUser, ProfileResolver};
