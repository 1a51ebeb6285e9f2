//! API route paths, relative to the configured origin

pub const GET_USER_INFO: &str = "/api/auth/user-info";
pub const LOGIN_ROUTE: &str = "/api/auth/login";
pub const SIGNUP_ROUTE: &str = "/api/auth/signup";
pub const UPDATE_PROFILE_ROUTE: &str = "/api/auth/update-profile";
