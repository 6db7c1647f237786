//! Administration DTOs

use serde::Deserialize;

/// Reset request; nothing is removed unless `confirm` is true
#[derive(Debug, Default, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}
