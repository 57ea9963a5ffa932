use std::path::{Path, PathBuf};

use crate::application::policy::UploadPolicy;
use crate::domain::value_objects::SizeBounds;

/// Allowance for multipart framing on top of the largest accepted file
pub const MULTIPART_OVERHEAD: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub storage_root: PathBuf,
    /// Optional subdirectory of `storage_root` that receives uploads
    pub temp_subdir: Option<String>,
    /// Prefix of the path reported back for an accepted upload
    pub public_path_prefix: Option<String>,
    pub durable_writes: bool,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            storage_root: std::env::var("STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./public")),
            temp_subdir: non_empty_var("UPLOAD_PATH_TEMP"),
            public_path_prefix: non_empty_var("UPLOAD_PATH"),
            durable_writes: std::env::var("DURABLE_WRITES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            log_format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.listen_addr.is_empty() {
            return Err("LISTEN_ADDR cannot be empty".to_string());
        }

        if let Some(subdir) = &self.temp_subdir {
            if Path::new(subdir).is_absolute() {
                return Err("UPLOAD_PATH_TEMP must be relative to STORAGE_ROOT".to_string());
            }
            if has_parent_component(subdir) {
                return Err("UPLOAD_PATH_TEMP must not contain '..'".to_string());
            }
        }

        if let Some(prefix) = &self.public_path_prefix {
            if has_parent_component(prefix) {
                return Err("UPLOAD_PATH must not contain '..'".to_string());
            }
        }

        if !matches!(self.log_format.as_str(), "text" | "json") {
            return Err("LOG_FORMAT must be 'text' or 'json'".to_string());
        }

        Ok(())
    }

    /// Settings handed to the upload use case
    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(SizeBounds::default(), self.public_path_prefix.clone())
    }

    /// Transport-level cap on a request body
    pub fn request_body_limit(&self) -> usize {
        (self.upload_policy().size_bounds.max() + MULTIPART_OVERHEAD) as usize
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn has_parent_component(path: &str) -> bool {
    path.split(['/', '\\']).any(|segment| segment == "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::MAX_FILE_SIZE;

    fn config() -> Config {
        Config {
            listen_addr: "127.0.0.1:0".to_string(),
            storage_root: PathBuf::from("./public"),
            temp_subdir: Some("temp".to_string()),
            public_path_prefix: Some("images".to_string()),
            durable_writes: true,
            log_format: "text".to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_listen_addr() {
        let mut cfg = config();
        cfg.listen_addr.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let mut cfg = config();
        cfg.temp_subdir = Some("../outside".to_string());
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.temp_subdir = Some("/tmp/uploads".to_string());
        assert!(cfg.validate().is_err());

        let mut cfg = config();
        cfg.public_path_prefix = Some("a/../../b".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_dotted_names_are_not_parent_dirs() {
        let mut cfg = config();
        cfg.temp_subdir = Some("..cache".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let mut cfg = config();
        cfg.log_format = "xml".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_upload_policy() {
        let policy = config().upload_policy();
        assert_eq!(policy.size_bounds, SizeBounds::default());
        assert_eq!(policy.public_path_prefix.as_deref(), Some("images"));
    }

    #[test]
    fn test_request_body_limit_exceeds_max_file_size() {
        let limit = config().request_body_limit() as u64;
        assert_eq!(limit, MAX_FILE_SIZE + MULTIPART_OVERHEAD);
    }
}
