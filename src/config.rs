use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Glycora";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
/// ~/Glycora/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Glycora")
}

/// Get the path of the patient database file
pub fn database_path() -> PathBuf {
    app_data_dir().join("glycora.db")
}

/// Default tracing filter when RUST_LOG is unset
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
