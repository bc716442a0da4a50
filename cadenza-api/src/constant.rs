pub const SERVER_NAME: &str = "cadenza";
