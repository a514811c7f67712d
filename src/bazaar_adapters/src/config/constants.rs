pub mod env {
    pub const CONFIG_DIR_ENV_VAR: &str = "BAZAAR_CONFIG_DIR";
    pub const ENV_PREFIX: &str = "BAZAAR";
    pub const ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_CONFIG_DIR: &str = "config";

pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 60 * 60 * 24;
pub const DEFAULT_PASSWORD_RESET_TTL_SECONDS: i64 = 60 * 60;
pub const DEFAULT_MAX_DB_CONNECTIONS: u32 = 5;

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
