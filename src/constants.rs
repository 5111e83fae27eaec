//! Common constants used throughout the starter application.

/// Template configuration file, expected at the root of the destination
pub const CONFIG_FILE: &str = ".starter.yml";

/// Template's own state directory
pub const STATE_DIR: &str = ".starter/";

/// Path prefixes that are never visited, renamed or rewritten
pub const SKIP_LIST: [&str; 3] = [STATE_DIR, CONFIG_FILE, ".git/"];

/// Prefix of environment variables carrying template variables
pub const ENV_PREFIX: &str = "STARTER_";

/// Scheme used when a template reference has none
pub const DEFAULT_SCHEME: &str = "https";

/// Host used when a template reference has none
pub const DEFAULT_HOST: &str = "github.com";

/// Owner used when a template reference is a bare repository name
pub const DEFAULT_OWNER: &str = "magento-mcom";

/// Branch checked out from the template repository
pub const DEFAULT_BRANCH: &str = "master";

/// Default placeholder markers, `<NAME>`
pub const DEFAULT_PREFIX: &str = "<";
pub const DEFAULT_SUFFIX: &str = ">";
