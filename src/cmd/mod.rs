//! CLI command implementations.
//!
//! Each submodule owns one `Commands` variant:
//!
//! | Module     | Commands handled |
//! |------------|------------------|
//! | `new`      | `New`            |
//! | `location` | `Location`       |
//! | `config`   | `Config`         |

pub mod config;
pub mod location;
pub mod new;

pub use config::cmd_config;
pub use location::cmd_location;
pub use new::cmd_new;
